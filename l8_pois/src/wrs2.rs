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

//! WRS-2 scene corner points as published by USGS (`WRScornerPoints.csv`)

use std::io::Read;
use serde::Deserialize;
use tracing::debug;

use l8_common::BoundingBox;
use crate::errors::Result;

/// the columns we need from the corner point CSV. Other columns (e.g. CTR LAT/LON) are ignored
#[derive(Debug,Deserialize)]
struct RawCornerPoints {
    #[serde(rename="PATH")] path: f64,
    #[serde(rename="ROW")] row: f64,
    #[serde(rename="UL LAT")] ul_lat: f64,
    #[serde(rename="UL LON")] ul_lon: f64,
    #[serde(rename="UR LAT")] ur_lat: f64,
    #[serde(rename="UR LON")] ur_lon: f64,
    #[serde(rename="LL LAT")] ll_lat: f64,
    #[serde(rename="LL LON")] ll_lon: f64,
    #[serde(rename="LR LAT")] lr_lat: f64,
    #[serde(rename="LR LON")] lr_lon: f64,
}

/// a WRS-2 path/row with the bounding box of its four scene corners
#[derive(Debug,Clone,PartialEq)]
pub struct Wrs2Scene {
    pub path: u32,
    pub row: u32,
    pub bbox: BoundingBox,
}

impl Wrs2Scene {
    fn from_raw (raw: &RawCornerPoints)->Option<Self> {
        if raw.path < 1.0 || raw.row < 1.0 { return None } // there are some 0 entries in the USGS data

        let bbox = BoundingBox::from_lon_lats( &[
            (raw.ul_lon, raw.ul_lat),
            (raw.ur_lon, raw.ur_lat),
            (raw.ll_lon, raw.ll_lat),
            (raw.lr_lon, raw.lr_lat),
        ])?;
        Some( Wrs2Scene { path: raw.path as u32, row: raw.row as u32, bbox })
    }
}

/// read all valid path/rows from a corner point CSV (with header line)
pub fn read_wrs2_corners<R: Read> (reader: R)->Result<Vec<Wrs2Scene>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim( csv::Trim::All)
        .from_reader(reader);
    let mut scenes = Vec::new();

    for res in csv_reader.deserialize() {
        let raw: RawCornerPoints = res?;
        match Wrs2Scene::from_raw( &raw) {
            Some(scene) => scenes.push(scene),
            None => debug!("ignoring corner points of path {} row {}", raw.path, raw.row)
        }
    }
    Ok(scenes)
}
