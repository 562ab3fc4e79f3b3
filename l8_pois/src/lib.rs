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

//! spatial join of WRS-2 scene bounding boxes with OpenStreetMap features. For each path/row we collect
//! the national parks, monuments, large cities, states, countries and continents of the tiles that cover
//! the scene, and store them as one `PPP.json` file per path

use std::{collections::BTreeMap, path::{Path, PathBuf}, sync::Arc};
use futures::{stream, StreamExt};
use tracing::{error, info};

use l8_common::{fs::{ensure_writable_dir, write_file}, pathrow::{zero_pad, PR_WIDTH}};

mod errors;
pub use errors::*;

pub mod wrs2;
pub use wrs2::*;

pub mod tiles;
pub use tiles::*;

pub mod features;
pub use features::*;

pub mod pois;
pub use pois::*;

/// POI set per zero padded row of one path
pub type PathPois = BTreeMap<String,PoiSet>;

/// the result of joining a single scene
#[derive(Debug,Clone)]
pub struct ScenePois {
    pub path: u32,
    pub row: u32,
    pub pois: PoiSet,
}

/// compute the POIs of all features within the tiles covering the scene
pub fn compute_scene_pois (source: &dyn FeatureSource, scene: &Wrs2Scene, zoom: u8)->Result<ScenePois> {
    let cover = TileCover::new( &scene.bbox, zoom)?;
    info!("path: {}, row: {}, bbox: {:?}, tiles: {}", scene.path, scene.row, scene.bbox.to_wsen_array(), cover.n_tiles());

    let features = source.features_in( &cover.extent());
    let pois = collect_pois( features);

    Ok( ScenePois { path: scene.path, row: scene.row, pois })
}

/// run the join for all scenes with at most `parallel_limit` scenes being processed at the same time.
/// A scene whose task fails is logged and reported with an empty POI set. An unsupported zoom level
/// is rejected before any scene is processed
pub async fn run_pois (source: Arc<dyn FeatureSource>, scenes: Vec<Wrs2Scene>, zoom: u8, parallel_limit: usize)->Result<Vec<ScenePois>> {
    check_zoom( zoom)?;

    let results: Vec<ScenePois> = stream::iter( scenes)
        .map( |scene| {
            let source = source.clone();
            async move {
                let (path,row) = (scene.path, scene.row);
                match tokio::task::spawn_blocking( move || compute_scene_pois( source.as_ref(), &scene, zoom)).await {
                    Ok(Ok(res)) => res,
                    Ok(Err(e)) => {
                        error!("POI join for path {} row {} failed: {}", path, row, e);
                        ScenePois { path, row, pois: PoiSet::new() }
                    }
                    Err(e) => {
                        error!("POI task for path {} row {} failed: {}", path, row, e);
                        ScenePois { path, row, pois: PoiSet::new() }
                    }
                }
            }
        })
        .buffer_unordered( parallel_limit.max(1))
        .collect()
        .await;

    Ok(results)
}

/// group scene results by (zero padded) path and row
pub fn group_by_path (results: Vec<ScenePois>)->BTreeMap<String,PathPois> {
    let mut groups: BTreeMap<String,PathPois> = BTreeMap::new();
    for r in results {
        groups.entry( zero_pad( r.path, PR_WIDTH))
            .or_default()
            .insert( zero_pad( r.row, PR_WIDTH), r.pois);
    }
    groups
}

/// write one `PPP.json` file per path into `dir`, returning the written paths
pub fn write_path_files (dir: &Path, groups: &BTreeMap<String,PathPois>)->Result<Vec<PathBuf>> {
    ensure_writable_dir( dir)?;
    let mut files = Vec::with_capacity( groups.len());

    for (path, rows) in groups {
        let file = dir.join( format!("{path}.json"));
        write_file( &file, &serde_json::to_vec( rows)?)?;
        files.push( file);
    }
    info!("wrote {} path files to {:?}", files.len(), dir);
    Ok(files)
}
