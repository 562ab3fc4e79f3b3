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

//! functions to extract page data from the derived site files

use std::collections::BTreeSet;
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use l8_common::{datetime::{nice_date, parse_date_prefix}, fs::{basename, extension_lowercase}, pathrow::split_key};

lazy_static! {
    static ref SCENE_ID_RE: Regex = Regex::new(r"^[A-Za-z0-9_]{9,64}$").unwrap();
}

/// the stage that is served without a base path prefix
pub const PRODUCTION_STAGE: &str = "production";

/// URL prefix of site links for a deployment stage. Production (or an unset stage) is presumably served
/// from a naked domain and does not need a prefix
pub fn base_path (stage: &str)->String {
    if stage.is_empty() || stage == PRODUCTION_STAGE { String::new() } else { format!("/{stage}") }
}

/// plausibility check for scene ids that become part of object keys
pub fn is_valid_scene_id (id: &str)->bool {
    SCENE_ID_RE.is_match(id)
}

/// a scene row of a path/row page
#[derive(Debug,Clone,PartialEq)]
pub struct SceneSummary {
    pub id: String,
    pub acquired: Option<NaiveDate>,
    pub date: String, // display date
    pub cloud_cover: i64,
}

/// get the scenes of a path/row from the lines of a `paths/PPP.csv` file. Scene ids encode the
/// path/row as chars 3..9 (e.g. "LC8 044034 2015017LGN00"). Lines that can't be parsed are ignored
pub fn scenes_for_pathrow<'a> (lines: impl IntoIterator<Item=&'a str>, path: &str, row: &str)->Vec<SceneSummary> {
    let pr = format!("{path}{row}");
    lines.into_iter()
        .filter( |line| line.get(3..9) == Some(pr.as_str()))
        .filter_map( |line| {
            let mut fields = line.split(',');
            let id = fields.next()?;
            let date = fields.next()?;
            let cloud_cover = fields.next()?.trim().parse::<f64>().ok()?.round() as i64;
            Some( SceneSummary { id: id.to_string(), acquired: parse_date_prefix(date), date: nice_date(date), cloud_cover })
        })
        .collect()
}

/// order scenes newest first (undated ones last)
pub fn sort_newest_first (scenes: &mut [SceneSummary]) {
    scenes.sort_by( |a,b| b.acquired.cmp( &a.acquired));
}

/// the rows of a path as found in `unique_prs.csv` lines
pub fn rows_for_path<'a> (prs: impl IntoIterator<Item=&'a str>, path: &str)->Vec<String> {
    prs.into_iter()
        .filter_map( |pr| split_key(pr.trim()))
        .filter( |(p,_)| *p == path)
        .map( |(_,r)| r.to_string())
        .collect()
}

/// all unique paths of `unique_prs.csv` lines, sorted
pub fn all_paths<'a> (prs: impl IntoIterator<Item=&'a str>)->Vec<String> {
    let paths: BTreeSet<&str> = prs.into_iter()
        .filter_map( |pr| split_key(pr.trim()))
        .map( |(p,_)| p)
        .collect();
    paths.into_iter().map( |p| p.to_string()).collect()
}

/// a scene of the main page
#[derive(Debug,Clone,PartialEq)]
pub struct FeaturedScene {
    pub id: String,
    pub date: String,
    pub cloud_cover: String,
    pub path: String,
    pub row: String,
}

/// parse the `id,date,cloudCover,path,row` lines of `featured.csv`
pub fn parse_featured (csv: &str)->Vec<FeaturedScene> {
    csv.lines()
        .filter_map( |line| {
            let fields: Vec<&str> = line.split(',').map( |f| f.trim()).collect();
            if let [id, date, cloud_cover, path, row] = fields.as_slice() {
                Some( FeaturedScene {
                    id: id.to_string(),
                    date: nice_date(date),
                    cloud_cover: cloud_cover.to_string(),
                    path: path.to_string(),
                    row: row.to_string()
                })
            } else {
                None
            }
        })
        .collect()
}

/* #region scene details *******************************************************************/

/// the parts of a `<scene>_MTL.json` file we show
#[derive(Debug,Deserialize)]
pub struct MtlFile {
    #[serde(rename="L1_METADATA_FILE")]
    pub l1_metadata: L1Metadata
}

#[derive(Debug,Deserialize)]
pub struct L1Metadata {
    #[serde(rename="IMAGE_ATTRIBUTES")]
    pub image_attributes: ImageAttributes,
    #[serde(rename="PRODUCT_METADATA")]
    pub product_metadata: ProductMetadata,
}

#[derive(Debug,Deserialize)]
pub struct ImageAttributes {
    #[serde(rename="CLOUD_COVER")]
    pub cloud_cover: f64,
}

#[derive(Debug,Deserialize)]
pub struct ProductMetadata {
    #[serde(rename="DATE_ACQUIRED")]
    pub date_acquired: String,
}

/// the files of a scene, binned by type
#[derive(Debug,Clone,Default,PartialEq)]
pub struct SceneFiles {
    pub tiffs: Vec<String>,
    pub overviews: Vec<String>,
    pub previews: Vec<String>,
    pub metadata: Vec<String>,
}

impl SceneFiles {
    /// bin object keys by (case insensitive) extension. Files of other types are not shown
    pub fn from_keys<'a> (keys: impl IntoIterator<Item=&'a str>)->Self {
        let mut files = SceneFiles::default();
        for key in keys {
            let name = basename(key).to_string();
            match extension_lowercase(key).as_str() {
                ".tif" => files.tiffs.push(name),
                ".ovr" => files.overviews.push(name),
                ".jpg" => files.previews.push(name),
                ".txt" | ".json" => files.metadata.push(name),
                _ => {}
            }
        }
        files
    }
}

#[derive(Debug,Clone,PartialEq)]
pub struct SceneDetails {
    pub id: String,
    pub path: String,
    pub row: String,
    pub thumbnail: String,
    pub cloud_cover: f64,
    pub date: String,
    pub files: SceneFiles,
}

/* #endregion scene details */
