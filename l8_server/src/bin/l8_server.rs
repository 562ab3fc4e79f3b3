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

//! HTTP server for the Landsat-8 site pages

use std::path::PathBuf;
use anyhow::Result;
use clap::Parser;

use l8_common::{config::load_config, init_tracing};
use l8_server::{serve, ServerConfig};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "serve Landsat-8 path/row and scene pages")]
pub struct Args {
    /// pathname of the ServerConfig RON file
    #[arg(short,long, default_value = "configs/l8_server.ron")]
    pub config: PathBuf,

    /// serve derived site files from this directory instead of the static bucket
    #[arg(short,long)]
    pub static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main()->Result<()> {
    init_tracing();

    let args = Args::parse();
    let mut config: ServerConfig = load_config( &args.config)?;
    if args.static_dir.is_some() {
        config.static_dir = args.static_dir;
    }

    serve( &config).await?;
    Ok(())
}
