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

use std::{collections::BTreeMap, io::Read};
use csv::{ReaderBuilder, StringRecord};
use itertools::Itertools;
use tracing::debug;

use l8_common::pathrow::{key_path, pathrow_key, split_key, zero_pad, PR_WIDTH};
use crate::errors::Result;

// scene_list columns:
//   entityId,acquisitionDate,cloudCover,processingLevel,path,row,min_lat,min_lon,max_lat,max_lon,download_url
const COL_ID: usize = 0;
const COL_DATE: usize = 1;
const COL_CLOUD: usize = 2;
const COL_PATH: usize = 4;
const COL_ROW: usize = 5;

/// cloud cover value of night time acquisitions, which we don't show
const NIGHT_CLOUD_COVER: &str = "-1";

/* #region featured scenes *****************************************************************/

/// a recent low cloud cover scene that is shown on the main page
#[derive(Debug,Clone,PartialEq)]
pub struct FeaturedScene {
    pub id: String,
    pub date: String,
    pub cloud_cover: String,
    pub path: String,
    pub row: String,
}

impl FeaturedScene {
    pub fn to_csv_line (&self)->String {
        format!("{},{},{},{},{}", self.id, self.date, self.cloud_cover, self.path, self.row)
    }
}

/// keeps the `max_scenes` newest candidates, newest first.
/// Dates are ISO formatted so we can compare them as strings
#[derive(Debug,Clone)]
pub struct FeaturedScenes {
    max_scenes: usize,
    scenes: Vec<FeaturedScene>,
}

impl FeaturedScenes {
    pub fn new (max_scenes: usize)->Self {
        FeaturedScenes { max_scenes, scenes: Vec::with_capacity(max_scenes+1) }
    }

    /// add candidate if there is still room or it is newer than one of the kept scenes.
    /// Candidates with the same date as a kept scene are ordered after it
    pub fn offer (&mut self, scene: FeaturedScene) {
        let pos = self.scenes.iter().position( |s| scene.date > s.date).unwrap_or( self.scenes.len());
        if pos < self.max_scenes {
            self.scenes.insert( pos, scene);
            self.scenes.truncate( self.max_scenes);
        }
    }

    pub fn scenes (&self)->&[FeaturedScene] { &self.scenes }

    pub fn len (&self)->usize { self.scenes.len() }

    pub fn is_empty (&self)->bool { self.scenes.is_empty() }

    pub fn to_csv (&self)->String {
        self.scenes.iter().map( |s| s.to_csv_line()).join("\n")
    }
}

/* #endregion featured scenes */

/* #region scene index *********************************************************************/

/// all (daytime) scenes of the scene list, bucketed by "PPP-RRR" path/row keys
#[derive(Debug,Clone)]
pub struct SceneIndex {
    buckets: BTreeMap<String,Vec<String>>, // "PPP-RRR" -> ["id,date,cloudCover",..]
    featured: FeaturedScenes,
    featured_cloud_cover: f64,

    n_scenes: usize,
    n_skipped: usize,
}

impl SceneIndex {
    pub fn new (num_featured: usize, featured_cloud_cover: f64)->Self {
        SceneIndex {
            buckets: BTreeMap::new(),
            featured: FeaturedScenes::new(num_featured),
            featured_cloud_cover,
            n_scenes: 0,
            n_skipped: 0
        }
    }

    /// parse a complete scene list. The header line (or any other line without a numeric path) is ignored
    pub fn from_reader<R: Read> (reader: R, num_featured: usize, featured_cloud_cover: f64)->Result<Self> {
        let mut index = SceneIndex::new( num_featured, featured_cloud_cover);
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        for res in csv_reader.records() {
            let rec = res?;
            index.add_record( &rec);
        }
        Ok(index)
    }

    /// process a single scene list record, returning true if it was added
    pub fn add_record (&mut self, rec: &StringRecord)->bool {
        let (Some(id), Some(date), Some(cloud), Some(path), Some(row)) =
            (rec.get(COL_ID), rec.get(COL_DATE), rec.get(COL_CLOUD), rec.get(COL_PATH), rec.get(COL_ROW)) else {
            self.n_skipped += 1;
            return false
        };

        let (Ok(path), Ok(row)) = (path.trim().parse::<u32>(), row.trim().parse::<u32>()) else {
            debug!("skipping non-scene record {:?}", rec);
            self.n_skipped += 1;
            return false
        };

        if cloud == NIGHT_CLOUD_COVER {
            self.n_skipped += 1;
            return false
        }

        let key = pathrow_key( path, row);
        self.buckets.entry(key).or_default().push( format!("{id},{date},{cloud}"));
        self.n_scenes += 1;

        if let Ok(cc) = cloud.trim().parse::<f64>() {
            if cc < self.featured_cloud_cover {
                self.featured.offer( FeaturedScene {
                    id: id.to_string(),
                    date: date.to_string(),
                    cloud_cover: cloud.to_string(),
                    path: zero_pad( path, PR_WIDTH),
                    row: zero_pad( row, PR_WIDTH)
                });
            }
        }
        true
    }

    pub fn n_scenes (&self)->usize { self.n_scenes }
    pub fn n_skipped (&self)->usize { self.n_skipped }
    pub fn n_pathrows (&self)->usize { self.buckets.len() }

    /// the sorted path/row keys
    pub fn keys (&self)->impl Iterator<Item=&str> {
        self.buckets.keys().map( |k| k.as_str())
    }

    pub fn scenes_of (&self, key: &str)->Option<&[String]> {
        self.buckets.get(key).map( |v| v.as_slice())
    }

    pub fn featured (&self)->&FeaturedScenes { &self.featured }

    //--- the derived files

    /// contents of `unique_prs.csv`: the sorted path/row keys, one per line
    pub fn unique_prs_csv (&self)->String {
        self.keys().join("\n")
    }

    /// contents of `sitemap.txt`: one "{base_url}L8/PPP/RRR/" line per path/row
    pub fn sitemap_txt (&self, base_url: &str)->String {
        let mut buf = String::with_capacity( self.buckets.len() * (base_url.len() + 12));
        for key in self.keys() {
            if let Some((path,row)) = split_key(key) {
                buf.push_str( base_url);
                buf.push_str( &format!("L8/{path}/{row}/\n"));
            }
        }
        buf
    }

    /// contents of the `paths/PPP.csv` files: all scene lines of a path, in path/row key order.
    /// Only paths that have scenes are returned
    pub fn path_files (&self)->Vec<(String,String)> {
        let chunks = self.buckets.iter().chunk_by( |(key,_)| key_path(key).to_string());
        let mut files = Vec::new();

        for (path, group) in &chunks {
            let contents = group.flat_map( |(_,lines)| lines.iter()).join("\n");
            if !contents.is_empty() {
                files.push( (path, contents));
            }
        }
        files
    }

    /// contents of `featured.csv`
    pub fn featured_csv (&self)->String {
        self.featured.to_csv()
    }
}

/* #endregion scene index */
