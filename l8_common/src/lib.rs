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

//! common functions and types shared by the Landsat-8 site utilities (updater, POI join and page server)

use serde::{Serialize,Deserialize};
use regex::Regex;
use lazy_static::lazy_static;

pub mod macros;
pub mod errors;
pub mod strings;
pub mod fs;
pub mod datetime;
pub mod pathrow;
pub mod config;
pub mod store;

#[cfg(feature="s3")]
pub mod s3;

pub use errors::{CommonError,StoreError};

/// name of the public bucket that holds the Landsat-8 archive
pub const LANDSAT_BUCKET: &str = "landsat-pds";

lazy_static! {
    static ref BUCKET_URL_RE: Regex = Regex::new(r"^https?://.*/(.*)/$").unwrap();
}

/// name of the bucket that serves the site's derived files, which is the last path element
/// of a static URL such as "https://s3-us-west-2.amazonaws.com/landsat-site-static/"
pub fn static_bucket (static_url: &str)->errors::Result<String> {
    BUCKET_URL_RE.captures( static_url)
        .and_then( |caps| caps.get(1))
        .map( |m| m.as_str().to_string())
        .filter( |b| !b.is_empty())
        .ok_or_else( || CommonError::InvalidUrl( static_url.to_string()))
}

/// a geographic bounding box in degrees (no antimeridian handling)
#[derive(Debug,Copy,Clone,Serialize,Deserialize,PartialEq)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64
}

impl BoundingBox {
    pub fn new (west: f64, south: f64, east: f64, north: f64)->Self {
        BoundingBox{ west, south, east, north }
    }

    /// smallest box that contains all given (lon,lat) points. Returns `None` for an empty slice
    pub fn from_lon_lats (pts: &[(f64,f64)])->Option<Self> {
        let (first,rest) = pts.split_first()?;
        let mut bbox = BoundingBox::new( first.0, first.1, first.0, first.1);
        for &(lon,lat) in rest {
            if lon < bbox.west { bbox.west = lon }
            if lon > bbox.east { bbox.east = lon }
            if lat < bbox.south { bbox.south = lat }
            if lat > bbox.north { bbox.north = lat }
        }
        Some(bbox)
    }

    pub fn to_wsen_array (&self) -> [f64;4] {
        [self.west,self.south,self.east,self.north]
    }
}

/// set up a global `tracing` subscriber that is configured by the RUST_LOG env var (default level is "info").
/// note this only succeeds if there is no global subscriber set yet
pub fn init_tracing () {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
