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

use std::sync::Arc;
use l8_common::BoundingBox;
use l8_pois::*;

// run with "cargo test test_join -- --nocapture"

const OSM: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    { "type": "Feature",
      "properties": { "name": "Yosemite National Park", "boundary": "national_park", "url": "https://www.nps.gov/yose" },
      "geometry": { "type": "Polygon", "coordinates": [[[-119.9,37.5],[-119.2,37.5],[-119.2,38.1],[-119.9,38.1],[-119.9,37.5]]] } },
    { "type": "Feature",
      "properties": { "name": "San Francisco", "place": "city", "population": "864816", "is_in:state": "California", "is_in:country": "United States of America" },
      "geometry": { "type": "Point", "coordinates": [-122.4194, 37.7749] } },
    { "type": "Feature",
      "properties": { "name": "Fresno", "place": "city", "population": 494665, "is_in:state": "California" },
      "geometry": { "type": "Point", "coordinates": [-119.7871, 36.7378] } },
    { "type": "Feature",
      "properties": { "name": "Cabrillo National Monument", "historic": "monument" },
      "geometry": { "type": "Point", "coordinates": [-120.0, 36.5] } },
    { "type": "Feature",
      "properties": { "name": "Lincoln Memorial", "historic": "monument", "url": "https://www.nps.gov/linc" },
      "geometry": { "type": "Point", "coordinates": [-77.0502, 38.8893] } },
    { "type": "Feature",
      "properties": { "name": "California", "place": "state", "is_in:continent": "North America" },
      "geometry": { "type": "Point", "coordinates": [-120.5, 37.0] } },
    { "type": "Feature",
      "properties": { "place": "country", "is_in:continent": "Atlantis" },
      "geometry": { "type": "Point", "coordinates": [-121.0, 37.0] } }
  ]
}"#;

fn source ()->GeoJsonSource {
    GeoJsonSource::from_reader( OSM.as_bytes()).unwrap()
}

fn sf_scene ()->Wrs2Scene {
    Wrs2Scene { path: 44, row: 34, bbox: BoundingBox::new( -122.6, 35.7, -119.5, 38.0) }
}

#[test]
fn test_source() {
    let src = source();
    assert_eq!( src.len(), 7);

    let dc = BoundingBox::new( -77.1, 38.8, -77.0, 39.0);
    let found = src.features_in( &dc);
    assert_eq!( found.len(), 1);
    assert_eq!( found[0].tag("name").as_deref(), Some("Lincoln Memorial"));
}

#[test]
fn test_classification() {
    let src = source();
    let all = src.features_in( &BoundingBox::new( -180.0, -85.0, 180.0, 85.0));
    let pois = collect_pois( all);

    assert_eq!( pois.parks, vec![ NamedLink{ name: "Yosemite National Park".into(), url: Some("https://www.nps.gov/yose".into()) }]);
    assert_eq!( pois.monuments.len(), 1); // Cabrillo has no url
    assert_eq!( pois.cities, vec!["San Francisco"]); // Fresno is below threshold
    assert_eq!( pois.states, vec!["California"]); // deduplicated
    assert_eq!( pois.countries, vec!["United States of America"]); // unnamed country feature ignored
    assert_eq!( pois.continents, vec!["North America"]);
}

#[test]
fn test_join() {
    let src = source();
    let res = compute_scene_pois( &src, &sf_scene(), DEFAULT_ZOOM).unwrap();
    assert_eq!( (res.path, res.row), (44, 34));
    assert_eq!( res.pois.parks.len(), 1);
    assert!( res.pois.monuments.is_empty());
    assert_eq!( res.pois.cities, vec!["San Francisco"]);

    let json = serde_json::to_string( &res.pois).unwrap();
    println!("{json}");
    assert!( json.starts_with(r#"{"parks":[{"name":"Yosemite National Park","url":"https://www.nps.gov/yose"}],"monuments":[],"cities":["San Francisco"]"#));
}

#[tokio::test]
async fn test_run_and_write() {
    let source: Arc<dyn FeatureSource> = Arc::new( source());
    let scenes = vec![
        sf_scene(),
        Wrs2Scene { path: 44, row: 35, bbox: BoundingBox::new( -123.1, 34.6, -120.5, 36.7) },
        Wrs2Scene { path: 15, row: 33, bbox: BoundingBox::new( -78.0, 38.0, -76.0, 40.0) },
    ];

    let results = run_pois( source, scenes, DEFAULT_ZOOM, 2).await.unwrap();
    assert_eq!( results.len(), 3);

    let groups = group_by_path( results);
    let keys: Vec<&str> = groups.keys().map( |k| k.as_str()).collect();
    assert_eq!( keys, vec!["015", "044"]);
    assert_eq!( groups["044"].len(), 2);
    assert_eq!( groups["015"]["033"].monuments[0].name, "Lincoln Memorial");

    let tmp = tempfile::tempdir().unwrap();
    let files = write_path_files( tmp.path(), &groups).unwrap();
    assert_eq!( files.len(), 2);

    let data = std::fs::read_to_string( tmp.path().join("044.json")).unwrap();
    let rows: PathPois = serde_json::from_str( &data).unwrap();
    assert_eq!( rows.keys().collect::<Vec<_>>(), vec!["034", "035"]);
    assert_eq!( rows["034"], groups["044"]["034"]);
}

/// a feature source that fails for scenes west of 100°W
struct FailingWestSource {
    inner: GeoJsonSource,
}

impl FeatureSource for FailingWestSource {
    fn features_in (&self, extent: &BoundingBox)->Vec<&OsmFeature> {
        if extent.west < -100.0 { panic!("feature source not available for {:?}", extent.to_wsen_array()) }
        self.inner.features_in( extent)
    }

    fn len (&self)->usize { self.inner.len() }
}

#[tokio::test]
async fn test_failing_scene() {
    let source: Arc<dyn FeatureSource> = Arc::new( FailingWestSource { inner: source() });
    let scenes = vec![
        sf_scene(),
        Wrs2Scene { path: 15, row: 33, bbox: BoundingBox::new( -78.0, 38.0, -76.0, 40.0) },
    ];

    let results = run_pois( source, scenes, DEFAULT_ZOOM, 2).await.unwrap();
    assert_eq!( results.len(), 2);

    let groups = group_by_path( results);
    assert!( groups["044"]["034"].is_empty()); // failed task
    assert_eq!( groups["015"]["033"].monuments[0].name, "Lincoln Memorial");
}

#[tokio::test]
async fn test_unsupported_zoom() {
    let source: Arc<dyn FeatureSource> = Arc::new( source());
    match run_pois( source, vec![sf_scene()], 40, 1).await {
        Err(PoisError::InvalidZoom(zoom, max)) => assert_eq!( (zoom, max), (40, MAX_ZOOM)),
        other => panic!("unexpected result {other:?}")
    }
}
