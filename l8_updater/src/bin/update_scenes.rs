/*
 * Copyright © 2024, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

//! this application regenerates the derived site metadata files from the latest Landsat-8 scene list.
//! It is normally run periodically against the public `landsat-pds` bucket and the site's static bucket,
//! but can also work on a local scene list and/or write into a local directory

use std::path::PathBuf;
use anyhow::Result;
use clap::Parser;
use tracing::info;

use l8_common::{config::load_config, init_tracing, s3::{create_s3_client, S3Store}, static_bucket, store::{DirStore, ObjectStore}};
use l8_updater::{run_update, UpdaterConfig};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "regenerate Landsat-8 path/row index files, featured scenes and sitemap")]
pub struct Args {
    /// pathname of the UpdaterConfig RON file
    #[arg(short,long, default_value = "configs/update_scenes.ron")]
    pub config: PathBuf,

    /// use this (uncompressed) scene list instead of downloading it
    #[arg(short,long)]
    pub scene_list: Option<PathBuf>,

    /// write derived files into this directory instead of the static bucket
    #[arg(short,long)]
    pub output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main()->Result<()> {
    init_tracing();

    let args = Args::parse();
    let config: UpdaterConfig = load_config( &args.config)?;
    config.check()?;

    let source = S3Store::new( create_s3_client( &config.s3_region, true).await, &config.source_bucket, false);

    let target: Box<dyn ObjectStore> = if let Some(dir) = &args.output_dir {
        Box::new( DirStore::new(dir))
    } else {
        let bucket = static_bucket( &config.static_url)?;
        Box::new( S3Store::new( create_s3_client( &config.s3_region, false).await, bucket, true))
    };

    let index = run_update( &config, &source, target.as_ref(), args.scene_list.as_deref()).await?;
    info!("updated {} path/rows in {}", index.n_pathrows(), target.name());

    Ok(())
}
