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

//! regenerates the derived site metadata files from the global Landsat-8 scene list:
//!  - `unique_prs.csv`  - all path/row combinations
//!  - `sitemap.txt`     - site URL for each path/row
//!  - `paths/PPP.csv`   - scenes per path
//!  - `featured.csv`    - newest low cloud cover scenes for the main page

use std::{fs::File, io::{BufReader, Read}, path::{Path, PathBuf}};
use bytes::Bytes;
use flate2::read::MultiGzDecoder;
use futures::{stream, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};
use tracing::info;

use l8_common::{fs::write_file, store::ObjectStore, LANDSAT_BUCKET};

mod errors;
pub use errors::*;

pub mod scene_index;
pub use scene_index::*;

pub const UNIQUES_FILE: &str = "unique_prs.csv";
pub const SITEMAP_FILE: &str = "sitemap.txt";
pub const FEATURED_FILE: &str = "featured.csv";
pub const PATHS_DIR: &str = "paths";

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct UpdaterConfig {
    pub s3_region: String,

    #[serde(default="default_source_bucket")]
    pub source_bucket: String,

    #[serde(default="default_scene_list_key")]
    pub scene_list_key: String,

    /// where the site's static files are served from. The last path element is the target bucket,
    /// which is only required if the derived files are not written to a local directory
    pub static_url: String,

    /// site URL prefix used for sitemap entries (including the trailing '/')
    pub base_url: String,

    /// where we store the uncompressed scene list
    #[serde(default="default_cache_path")]
    pub cache_path: PathBuf,

    #[serde(default="default_num_featured")]
    pub num_featured: usize,

    /// cloud cover under which scenes become featured candidates
    #[serde(default="default_featured_cloud_cover")]
    pub featured_cloud_cover: f64,

    /// max number of concurrent path file uploads
    #[serde(default="default_parallel_limit")]
    pub parallel_limit: usize,
}

fn default_source_bucket()->String { LANDSAT_BUCKET.to_string() }
fn default_scene_list_key()->String { "scene_list.gz".to_string() }
fn default_cache_path()->PathBuf { PathBuf::from("/tmp/scene_list") }
fn default_num_featured()->usize { 4 }
fn default_featured_cloud_cover()->f64 { 0.02 }
fn default_parallel_limit()->usize { 10 }

impl UpdaterConfig {
    pub fn check (&self)->Result<()> {
        if self.parallel_limit == 0 { return Err( config_error("parallel_limit has to be > 0")) }
        if !self.base_url.is_empty() && !self.base_url.ends_with('/') {
            return Err( config_error( format!("base_url has to end with '/': {}", self.base_url)))
        }
        Ok(())
    }
}

/// download the gzipped scene list from `source`, unzip it and store it as `cache_path`
pub async fn fetch_scene_list (source: &dyn ObjectStore, key: &str, cache_path: &Path)->Result<PathBuf> {
    info!("getting latest {} from {}", key, source.name());
    let gz = source.get_object(key).await?;

    let mut data: Vec<u8> = Vec::new();
    MultiGzDecoder::new( gz.as_ref()).read_to_end( &mut data)?;

    info!("saving {} bytes of scene list to {:?}", data.len(), cache_path);
    write_file( cache_path, &data)?;
    Ok( cache_path.to_path_buf())
}

/// parse scene list file into a [`SceneIndex`]
pub fn read_scene_list (path: &Path, config: &UpdaterConfig)->Result<SceneIndex> {
    info!("reading in scenes data from {:?}", path);
    let reader = BufReader::new( File::open(path)?);
    let index = SceneIndex::from_reader( reader, config.num_featured, config.featured_cloud_cover)?;
    info!("built up {} unique path/rows from {} scenes ({} records skipped)", index.n_pathrows(), index.n_scenes(), index.n_skipped());
    Ok(index)
}

/// write all derived files of `index` to the `target` store
pub async fn write_outputs (target: &dyn ObjectStore, index: &SceneIndex, base_url: &str, parallel_limit: usize)->Result<()> {
    info!("writing out files to {}", target.name());

    tokio::try_join!(
        write_uniques( target, index),
        write_sitemap( target, index, base_url),
        write_path_scenes( target, index, parallel_limit),
        write_featured_scenes( target, index)
    )?;

    info!("all done!");
    Ok(())
}

async fn write_uniques (target: &dyn ObjectStore, index: &SceneIndex)->Result<()> {
    target.put_object( UNIQUES_FILE, Bytes::from( index.unique_prs_csv())).await?;
    info!("wrote {} unique path/row combos to {}", index.n_pathrows(), UNIQUES_FILE);
    Ok(())
}

async fn write_sitemap (target: &dyn ObjectStore, index: &SceneIndex, base_url: &str)->Result<()> {
    target.put_object( SITEMAP_FILE, Bytes::from( index.sitemap_txt( base_url))).await?;
    info!("wrote sitemap to {}", SITEMAP_FILE);
    Ok(())
}

async fn write_featured_scenes (target: &dyn ObjectStore, index: &SceneIndex)->Result<()> {
    target.put_object( FEATURED_FILE, Bytes::from( index.featured_csv())).await?;
    info!("wrote {} featured scenes to {}", index.featured().len(), FEATURED_FILE);
    Ok(())
}

async fn write_path_scenes (target: &dyn ObjectStore, index: &SceneIndex, parallel_limit: usize)->Result<()> {
    let files = index.path_files();
    let n_files = files.len();

    stream::iter( files)
        .map( |(path,contents)| async move {
            target.put_object( &format!("{PATHS_DIR}/{path}.csv"), Bytes::from(contents)).await
        })
        .buffer_unordered( parallel_limit.max(1))
        .try_collect::<Vec<()>>()
        .await?;

    info!("wrote {} path scene files", n_files);
    Ok(())
}

/// the whole update cycle: (optionally) download the scene list, parse it and write the derived files
pub async fn run_update (config: &UpdaterConfig, source: &dyn ObjectStore, target: &dyn ObjectStore, scene_list: Option<&Path>)->Result<SceneIndex> {
    let path = match scene_list {
        Some(path) => path.to_path_buf(),
        None => fetch_scene_list( source, &config.scene_list_key, &config.cache_path).await?
    };

    let index = read_scene_list( &path, config)?;
    write_outputs( target, &index, &config.base_url, config.parallel_limit).await?;
    Ok(index)
}
