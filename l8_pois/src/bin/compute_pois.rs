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

//! batch tool to compute points of interest for all WRS-2 path/rows from an OSM GeoJSON extract

use std::{fs::File, io::BufReader, path::PathBuf, sync::Arc};
use anyhow::Result;
use clap::Parser;
use tracing::info;

use l8_common::init_tracing;
use l8_pois::{group_by_path, read_wrs2_corners, run_pois, write_path_files, FeatureSource, GeoJsonSource, DEFAULT_ZOOM, MAX_ZOOM};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "compute points of interest per Landsat-8 path/row")]
pub struct Args {
    /// GeoJSON FeatureCollection with OSM features (name, boundary, historic, place, population, url, is_in:* tags)
    #[arg(short,long)]
    pub source: PathBuf,

    /// USGS WRS-2 corner points CSV
    #[arg(short,long, default_value = "WRScornerPoints.csv")]
    pub wrs2: PathBuf,

    /// directory to store the PPP.json files in
    #[arg(short,long, default_value = ".")]
    pub output_dir: PathBuf,

    /// zoom level of the tiles that cover scenes
    #[arg(short,long, default_value_t = DEFAULT_ZOOM, value_parser = clap::value_parser!(u8).range(0..=MAX_ZOOM as i64))]
    pub zoom: u8,

    /// max number of scenes that are processed concurrently
    #[arg(short,long, default_value_t = 1)]
    pub parallel_limit: usize,
}

#[tokio::main]
async fn main()->Result<()> {
    init_tracing();
    let args = Args::parse();

    let scenes = read_wrs2_corners( BufReader::new( File::open( &args.wrs2)?))?;
    info!("read {} path/rows from {:?}", scenes.len(), args.wrs2);

    let source: Arc<dyn FeatureSource> = Arc::new( GeoJsonSource::from_path( &args.source)?);

    let results = run_pois( source, scenes, args.zoom, args.parallel_limit).await?;
    let groups = group_by_path( results);
    write_path_files( &args.output_dir, &groups)?;

    Ok(())
}
