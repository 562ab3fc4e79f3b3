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

//! web mercator (slippy map) tile covers of geographic bounding boxes

use std::f64::consts::PI;
use l8_common::BoundingBox;
use crate::errors::{PoisError, Result};

/// latitude limit of the web mercator projection
pub const MAX_MERCATOR_LAT: f64 = 85.0511287798066;

pub const DEFAULT_ZOOM: u8 = 12;

/// highest zoom level we compute tile covers for (tile indices and their +1 edges have to fit into u32)
pub const MAX_ZOOM: u8 = 24;

pub fn check_zoom (zoom: u8)->Result<()> {
    if zoom > MAX_ZOOM { Err( PoisError::InvalidZoom( zoom, MAX_ZOOM)) } else { Ok(()) }
}

/// tile x index of a longitude at given zoom level
pub fn lon_to_tile_x (lon: f64, zoom: u8)->u32 {
    let n = (1u64 << zoom) as f64;
    let x = ((lon + 180.0) / 360.0 * n).floor();
    x.clamp( 0.0, n - 1.0) as u32
}

/// tile y index of a latitude at given zoom level (y grows southwards)
pub fn lat_to_tile_y (lat: f64, zoom: u8)->u32 {
    let n = (1u64 << zoom) as f64;
    let lat_rad = lat.clamp( -MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
    let y = ((1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * n).floor();
    y.clamp( 0.0, n - 1.0) as u32
}

/// longitude of the west edge of tile column x
pub fn tile_x_to_lon (x: u32, zoom: u8)->f64 {
    let n = (1u64 << zoom) as f64;
    x as f64 / n * 360.0 - 180.0
}

/// latitude of the north edge of tile row y
pub fn tile_y_to_lat (y: u32, zoom: u8)->f64 {
    let n = (1u64 << zoom) as f64;
    (PI * (1.0 - 2.0 * y as f64 / n)).sinh().atan().to_degrees()
}

/// the rectangular range of tiles that covers a bounding box at a given zoom level
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct TileCover {
    pub zoom: u8,
    pub x_min: u32,
    pub x_max: u32,
    pub y_min: u32, // northern most row
    pub y_max: u32, // southern most row
}

impl TileCover {
    pub fn new (bbox: &BoundingBox, zoom: u8)->Result<Self> {
        check_zoom( zoom)?;
        Ok( TileCover {
            zoom,
            x_min: lon_to_tile_x( bbox.west, zoom),
            x_max: lon_to_tile_x( bbox.east, zoom),
            y_min: lat_to_tile_y( bbox.north, zoom),
            y_max: lat_to_tile_y( bbox.south, zoom),
        })
    }

    pub fn n_tiles (&self)->usize {
        (self.x_max - self.x_min + 1) as usize * (self.y_max - self.y_min + 1) as usize
    }

    /// the geographic extent of all covering tiles, which is never smaller than the covered bbox
    /// (as long as that is within mercator latitude bounds)
    pub fn extent (&self)->BoundingBox {
        BoundingBox::new(
            tile_x_to_lon( self.x_min, self.zoom),
            tile_y_to_lat( self.y_max + 1, self.zoom),
            tile_x_to_lon( self.x_max + 1, self.zoom),
            tile_y_to_lat( self.y_min, self.zoom)
        )
    }

    /// iterate over all (x,y) tile coordinates of this cover, row by row
    pub fn tiles (&self)->impl Iterator<Item=(u32,u32)> + '_ {
        (self.y_min..=self.y_max).flat_map( move |y| (self.x_min..=self.x_max).map( move |x| (x,y)))
    }
}
