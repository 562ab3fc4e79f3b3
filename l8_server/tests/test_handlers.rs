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

use std::{path::Path, sync::Arc};
use axum::{body::{to_bytes, Body}, http::{Request, StatusCode}, Router};
use tower::ServiceExt; // for oneshot

use l8_common::{fs::write_file, store::DirStore};
use l8_server::*;

// run with "cargo test test_pages -- --nocapture"

const UNIQUE_PRS: &str = "044-033\n044-034\n045-034";

const PATH_044: &str = "LC80440332015017LGN00,2015-01-17 18:56:17.380412,12.31\n\
LC80440342015017LGN00,2015-01-17 18:56:41.290389,0.4\n\
LC80440342015033LGN00,2015-02-02 18:56:37.193283,27.6";

const FEATURED: &str = "LC80440342015017LGN00,2015-01-17 18:56:41.290389,0.4,044,034";

const SCENE: &str = "LC80440342015017LGN00";

const MTL: &str = r#"{
  "L1_METADATA_FILE": {
    "IMAGE_ATTRIBUTES": { "CLOUD_COVER": 0.4, "SUN_AZIMUTH": 150.2 },
    "PRODUCT_METADATA": { "DATE_ACQUIRED": "2015-01-17", "SPACECRAFT_ID": "LANDSAT_8" }
  }
}"#;

fn populate (static_dir: &Path, landsat_dir: &Path) {
    write_file( static_dir.join("unique_prs.csv"), UNIQUE_PRS.as_bytes()).unwrap();
    write_file( static_dir.join("paths/044.csv"), PATH_044.as_bytes()).unwrap();
    write_file( static_dir.join("featured.csv"), FEATURED.as_bytes()).unwrap();

    let scene_dir = landsat_dir.join( format!("L8/044/034/{SCENE}"));
    for f in ["B1.TIF", "B1.TIF.ovr", "thumb_large.jpg", "MTL.txt", "BQA.TIF", "index.html"] {
        write_file( scene_dir.join( format!("{SCENE}_{f}")), b"x").unwrap();
    }
    write_file( scene_dir.join( format!("{SCENE}_MTL.json")), MTL.as_bytes()).unwrap();
}

fn router (static_dir: &Path, landsat_dir: &Path, stage: &str)->Router {
    let site = SiteContext {
        base_path: helpers::base_path( stage),
        static_url: "https://s3-us-west-2.amazonaws.com/landsat-site-static/".into(),
        landsat_url: "https://landsat-pds.s3.amazonaws.com".into(),
        landsat_bucket: "landsat-pds".into(),
    };
    let state = AppState::new( Arc::new( DirStore::new(static_dir)), Arc::new( DirStore::new(landsat_dir)), site);
    build_router( state)
}

async fn get (router: &Router, uri: &str)->(StatusCode,String) {
    let response = router.clone()
        .oneshot( Request::builder().uri(uri).body( Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes( response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8( bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_pages() {
    let static_dir = tempfile::tempdir().unwrap();
    let landsat_dir = tempfile::tempdir().unwrap();
    populate( static_dir.path(), landsat_dir.path());
    let router = router( static_dir.path(), landsat_dir.path(), "production");

    let (status, html) = get( &router, "/").await;
    assert_eq!( status, StatusCode::OK);
    assert!( html.contains("href=\"/L8/044/034/LC80440342015017LGN00/\""));
    assert!( html.contains("Sat Jan 17 2015"));

    let (status, html) = get( &router, "/L8/").await;
    assert_eq!( status, StatusCode::OK);
    assert!( html.contains("<a href=\"/L8/044/\">044</a>"));
    assert!( html.contains("<a href=\"/L8/045/\">045</a>"));

    let (status, html) = get( &router, "/L8/044").await;
    assert_eq!( status, StatusCode::OK);
    assert!( html.contains("<title>Landsat on AWS - L8 - Rows for Path 044</title>"));
    assert!( html.contains("<a href=\"/L8/044/033/\">033</a>"));
    assert!( !html.contains("/L8/045/"));

    let (status, html) = get( &router, "/L8/044/034/").await;
    println!("{html}");
    assert_eq!( status, StatusCode::OK);
    assert!( html.contains("<title>Landsat on AWS - L8 - Scenes for Path 044 / Row 034</title>"));
    assert!( !html.contains("LC80440332015017LGN00")); // row 033
    let newest = html.find("LC80440342015033LGN00").unwrap();
    let older = html.rfind("LC80440342015017LGN00").unwrap();
    assert!( newest < older);
    assert!( html.contains("<td>28%</td>")); // rounded cloud cover
}

#[tokio::test]
async fn test_scene_page() {
    let static_dir = tempfile::tempdir().unwrap();
    let landsat_dir = tempfile::tempdir().unwrap();
    populate( static_dir.path(), landsat_dir.path());
    let router = router( static_dir.path(), landsat_dir.path(), "production");

    let (status, html) = get( &router, &format!("/L8/044/034/{SCENE}/")).await;
    assert_eq!( status, StatusCode::OK);
    assert!( html.contains( &format!("<title>Landsat on AWS - {SCENE}</title>")));
    assert!( html.contains( &format!("https://landsat-pds.s3.amazonaws.com/L8/044/034/{SCENE}/{SCENE}_thumb_large.jpg")));
    assert!( html.contains("<dd>Sat Jan 17 2015</dd>"));
    assert!( html.contains("<dd>0.4%</dd>"));
    assert!( html.contains( &format!(">{SCENE}_BQA.TIF</a>")));
    assert!( html.contains( &format!(">{SCENE}_MTL.json</a>")));
    assert!( !html.contains("index.html"));
}

#[tokio::test]
async fn test_errors() {
    let static_dir = tempfile::tempdir().unwrap();
    let landsat_dir = tempfile::tempdir().unwrap();
    populate( static_dir.path(), landsat_dir.path());
    let router = router( static_dir.path(), landsat_dir.path(), "production");

    let (status, html) = get( &router, "/L8/045/034/").await; // no paths/045.csv
    assert_eq!( status, StatusCode::NOT_FOUND);
    assert!( html.contains("404 Not Found"));

    let (status, _) = get( &router, "/L8/099/").await;
    assert_eq!( status, StatusCode::NOT_FOUND);

    let (status, _) = get( &router, "/L8/44/034/").await;
    assert_eq!( status, StatusCode::BAD_REQUEST);

    let (status, _) = get( &router, "/L8/044/034/LC80440342099017LGN00/").await; // unknown scene
    assert_eq!( status, StatusCode::NOT_FOUND);

    let (status, _) = get( &router, "/nowhere").await;
    assert_eq!( status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stage_base_path() {
    let static_dir = tempfile::tempdir().unwrap();
    let landsat_dir = tempfile::tempdir().unwrap();
    populate( static_dir.path(), landsat_dir.path());
    let router = router( static_dir.path(), landsat_dir.path(), "dev");

    let (status, html) = get( &router, "/dev/L8/044/").await;
    assert_eq!( status, StatusCode::OK);
    assert!( html.contains("<a href=\"/dev/L8/044/034/\">034</a>"));

    let (status, _) = get( &router, "/dev").await;
    assert_eq!( status, StatusCode::OK);

    let (status, _) = get( &router, "/L8/044/").await;
    assert_eq!( status, StatusCode::NOT_FOUND);
}
