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

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::features::OsmFeature;

/// population above which a `place=city` counts as POI
pub const POPULATION_THRESHOLD: f64 = 500_000.0;

/// a named POI with an optional web page
#[derive(Debug,Clone,PartialEq,Eq,Hash,Serialize,Deserialize)]
pub struct NamedLink {
    pub name: String,
    #[serde(skip_serializing_if="Option::is_none", default)]
    pub url: Option<String>,
}

/// the points of interest of a scene, grouped by category
#[derive(Debug,Clone,Default,PartialEq,Serialize,Deserialize)]
pub struct PoiSet {
    pub parks: Vec<NamedLink>,
    pub monuments: Vec<NamedLink>,
    pub cities: Vec<String>,
    pub states: Vec<String>,
    pub countries: Vec<String>,
    pub continents: Vec<String>,
}

impl PoiSet {
    pub fn new ()->Self { PoiSet::default() }

    /// the map step: what a single OSM feature contributes. Features without a name don't contribute anything
    pub fn from_feature (f: &OsmFeature)->Self {
        let mut pois = PoiSet::new();
        let Some(name) = f.tag("name") else { return pois };

        if f.has_tag_value( "boundary", "national_park") {
            pois.parks.push( NamedLink { name: name.clone(), url: f.tag("url") });
        }

        if f.has_tag_value( "historic", "monument") {
            if let Some(url) = f.tag("url") {
                pois.monuments.push( NamedLink { name: name.clone(), url: Some(url) });
            }
        }

        if f.has_tag_value( "place", "city") {
            if f.numeric_tag("population").map( |p| p > POPULATION_THRESHOLD).unwrap_or(false) {
                pois.cities.push( name.clone());
            }
        }

        if f.has_tag_value( "place", "state") { pois.states.push( name.clone()) }
        if f.has_tag_value( "place", "country") { pois.countries.push( name.clone()) }
        if f.has_tag_value( "place", "continent") { pois.continents.push( name) }

        // features can also tell us which areas they are in
        if let Some(s) = f.tag("is_in:state") { pois.states.push(s) }
        if let Some(s) = f.tag("is_in:country") { pois.countries.push(s) }
        if let Some(s) = f.tag("is_in:continent") { pois.continents.push(s) }

        pois
    }

    /// the reduce step
    pub fn merge (&mut self, other: PoiSet) {
        self.parks.extend( other.parks);
        self.monuments.extend( other.monuments);
        self.cities.extend( other.cities);
        self.states.extend( other.states);
        self.countries.extend( other.countries);
        self.continents.extend( other.continents);
    }

    /// remove duplicates (keeping the first occurrence) and entries without name
    pub fn finish (&mut self) {
        dedup_links( &mut self.parks);
        dedup_links( &mut self.monuments);
        dedup_names( &mut self.cities);
        dedup_names( &mut self.states);
        dedup_names( &mut self.countries);
        dedup_names( &mut self.continents);
    }

    pub fn len (&self)->usize {
        self.parks.len() + self.monuments.len() + self.cities.len() + self.states.len() + self.countries.len() + self.continents.len()
    }

    pub fn is_empty (&self)->bool { self.len() == 0 }
}

// `unique` keeps the first occurrence
fn dedup_names (v: &mut Vec<String>) {
    *v = std::mem::take(v).into_iter().filter( |s| !s.is_empty()).unique().collect();
}

fn dedup_links (v: &mut Vec<NamedLink>) {
    *v = std::mem::take(v).into_iter().filter( |l| !l.name.is_empty()).unique().collect();
}

/// map and reduce a set of features
pub fn collect_pois<'a> (features: impl IntoIterator<Item=&'a OsmFeature>)->PoiSet {
    let mut pois = features.into_iter().fold( PoiSet::new(), |mut acc, f| {
        acc.merge( PoiSet::from_feature(f));
        acc
    });
    pois.finish();
    pois
}
