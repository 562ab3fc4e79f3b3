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

//! sources of OpenStreetMap features for the POI join

use std::{fs::File, io::{BufReader, Read}, path::Path};
use geo::{BoundingRect, Intersects};
use geo_types::{coord, Geometry, Rect};
use geojson::{GeoJson, JsonObject, JsonValue};
use tracing::{debug, info};

use l8_common::BoundingBox;
use crate::errors::{invalid_source, Result};

/// an OSM feature with its tags (properties) and geometry
#[derive(Debug,Clone)]
pub struct OsmFeature {
    pub properties: JsonObject,
    pub geometry: Geometry<f64>,
    pub bounds: Rect<f64>,
}

impl OsmFeature {
    pub fn new (properties: JsonObject, geometry: Geometry<f64>)->Option<Self> {
        let bounds = geometry.bounding_rect()?; // empty geometries have no bounds
        Some( OsmFeature { properties, geometry, bounds })
    }

    /// non-empty string value of a tag. Numeric values are returned in their JSON representation
    pub fn tag (&self, key: &str)->Option<String> {
        match self.properties.get(key)? {
            JsonValue::String(s) if !s.is_empty() => Some(s.clone()),
            JsonValue::Number(n) => Some(n.to_string()),
            _ => None
        }
    }

    pub fn has_tag_value (&self, key: &str, value: &str)->bool {
        matches!( self.properties.get(key), Some(JsonValue::String(s)) if s == value)
    }

    /// numeric tag value, which can be stored as JSON number or (as in OSM) as string
    pub fn numeric_tag (&self, key: &str)->Option<f64> {
        match self.properties.get(key)? {
            JsonValue::Number(n) => n.as_f64(),
            JsonValue::String(s) => s.trim().parse::<f64>().ok(),
            _ => None
        }
    }

    pub fn intersects_rect (&self, rect: &Rect<f64>)->bool {
        self.bounds.intersects(rect) && self.geometry.intersects(rect)
    }
}

pub fn bbox_to_rect (bbox: &BoundingBox)->Rect<f64> {
    Rect::new( coord!{ x: bbox.west, y: bbox.south }, coord!{ x: bbox.east, y: bbox.north })
}

/// something that can give us the OSM features within a geographic extent
pub trait FeatureSource: Send + Sync {
    fn features_in (&self, extent: &BoundingBox)->Vec<&OsmFeature>;

    fn len (&self)->usize;
}

/// in-memory feature source that is initialized from a GeoJSON FeatureCollection
#[derive(Debug,Default)]
pub struct GeoJsonSource {
    features: Vec<OsmFeature>,
}

impl GeoJsonSource {
    pub fn new (features: Vec<OsmFeature>)->Self {
        GeoJsonSource { features }
    }

    pub fn from_path (path: impl AsRef<Path>)->Result<Self> {
        let path = path.as_ref();
        info!("loading OSM features from {:?}", path);
        let source = Self::from_reader( BufReader::new( File::open(path)?))?;
        info!("loaded {} features", source.features.len());
        Ok(source)
    }

    pub fn from_reader<R: Read> (reader: R)->Result<Self> {
        let features = match GeoJson::from_reader(reader)? {
            GeoJson::FeatureCollection(fc) => fc.features,
            GeoJson::Feature(f) => vec![f],
            GeoJson::Geometry(_) => return Err( invalid_source("GeoJSON geometry without properties"))
        };

        let mut osm_features = Vec::with_capacity( features.len());
        for f in features {
            let properties = f.properties.unwrap_or_default();
            if let Some(geometry) = f.geometry {
                let geometry: Geometry<f64> = geometry.try_into()?;
                match OsmFeature::new( properties, geometry) {
                    Some(feature) => osm_features.push(feature),
                    None => debug!("ignoring feature with empty geometry")
                }
            }
        }

        Ok( GeoJsonSource::new( osm_features))
    }
}

impl FeatureSource for GeoJsonSource {
    fn features_in (&self, extent: &BoundingBox)->Vec<&OsmFeature> {
        let rect = bbox_to_rect(extent);
        self.features.iter().filter( |f| f.intersects_rect(&rect)).collect()
    }

    fn len (&self)->usize { self.features.len() }
}
