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

use std::io::Write;
use bytes::Bytes;
use flate2::{write::GzEncoder, Compression};

use l8_common::{config::config_from_str, store::{DirStore, ObjectStore}};
use l8_updater::*;

// run with "cargo test test_scene_index -- --nocapture"

const SCENE_LIST: &str = "\
entityId,acquisitionDate,cloudCover,processingLevel,path,row,min_lat,min_lon,max_lat,max_lon,download_url
LC80440342015017LGN00,2015-01-17 18:56:41.290389,0.01,L1T,44,34,36.0,-122.6,38.1,-119.9,https://x/index.html
LC80030172015001LGN00,2015-01-01 15:10:39.302439,12.89,L1T,3,17,58.9,-69.8,61.1,-64.8,https://x/index.html
LC80440342015033LGN00,2015-02-02 18:56:37.193283,0.0,L1T,44,34,36.0,-122.6,38.1,-119.9,https://x/index.html
LC80440352015033LGN00,2015-02-02 18:57:01.081229,3.5,L1T,44,35,34.6,-123.1,36.7,-120.5,https://x/index.html
LC80030172015017LGN00,2015-01-17 15:10:35.474227,-1,L1T,3,17,58.9,-69.8,61.1,-64.8,https://x/index.html
LC82330992015022LGN00,2015-01-22 13:44:03.111111,0.015,L1T,233,99,-65.0,-60.0,-63.0,-55.0,https://x/index.html
";

fn test_config ()->UpdaterConfig {
    config_from_str( r#"(
        s3_region: "us-west-2",
        static_url: "https://s3-us-west-2.amazonaws.com/landsat-site-static/",
        base_url: "https://landsat.example.org/",
        num_featured: 2,
    )"#).unwrap()
}

#[test]
fn test_scene_index() {
    let config = test_config();
    let index = SceneIndex::from_reader( SCENE_LIST.as_bytes(), config.num_featured, config.featured_cloud_cover).unwrap();

    // header and night scene skipped
    assert_eq!( index.n_scenes(), 5);
    assert_eq!( index.n_skipped(), 2);

    let keys: Vec<&str> = index.keys().collect();
    assert_eq!( keys, vec!["003-017", "044-034", "044-035", "233-099"]);
    assert_eq!( index.unique_prs_csv(), "003-017\n044-034\n044-035\n233-099");

    let sitemap = index.sitemap_txt( &config.base_url);
    assert_eq!( sitemap.lines().count(), 4);
    assert!( sitemap.starts_with("https://landsat.example.org/L8/003/017/\n"));

    let files = index.path_files();
    let paths: Vec<&str> = files.iter().map( |(p,_)| p.as_str()).collect();
    assert_eq!( paths, vec!["003", "044", "233"]);
    assert_eq!( files[1].1, "LC80440342015017LGN00,2015-01-17 18:56:41.290389,0.01\n\
                             LC80440342015033LGN00,2015-02-02 18:56:37.193283,0.0\n\
                             LC80440352015033LGN00,2015-02-02 18:57:01.081229,3.5");
    assert!( !files[0].1.contains("LC80030172015017LGN00"));

    // three candidates below 0.02, the two newest are kept
    assert_eq!( index.featured_csv(),
        "LC80440342015033LGN00,2015-02-02 18:56:37.193283,0.0,044,034\n\
         LC82330992015022LGN00,2015-01-22 13:44:03.111111,0.015,233,099");
}

#[test]
fn test_check_config() {
    let mut config = test_config();
    assert!( config.check().is_ok());
    assert_eq!( config.parallel_limit, 10);

    config.base_url = "https://landsat.example.org".to_string();
    assert!( config.check().is_err());
}

#[test]
fn test_check_local_config() {
    // a config for local runs does not need a static bucket URL
    let config: UpdaterConfig = config_from_str( r#"(
        s3_region: "us-west-2",
        static_url: "${L8_SURELY_UNDEFINED_STATIC_URL}",
        base_url: "https://landsat.example.org/",
    )"#).unwrap();

    assert_eq!( config.static_url, "");
    assert!( config.check().is_ok());
}

#[tokio::test]
async fn test_run_update() {
    let tmp = tempfile::tempdir().unwrap();
    let source = DirStore::new( tmp.path().join("source"));
    let target = DirStore::new( tmp.path().join("target"));

    let mut encoder = GzEncoder::new( Vec::new(), Compression::default());
    encoder.write_all( SCENE_LIST.as_bytes()).unwrap();
    source.put_object( "scene_list.gz", Bytes::from( encoder.finish().unwrap())).await.unwrap();

    let mut config = test_config();
    config.cache_path = tmp.path().join("cache").join("scene_list");

    let index = run_update( &config, &source, &target, None).await.unwrap();
    assert_eq!( index.n_pathrows(), 4);
    assert!( config.cache_path.is_file());

    let keys = target.list_keys("").await.unwrap();
    assert_eq!( keys, vec![
        "featured.csv", "paths/003.csv", "paths/044.csv", "paths/233.csv", "sitemap.txt", "unique_prs.csv"
    ]);

    // there is no path 001 in the scene list, hence no (empty) file for it
    assert!( target.get_object("paths/001.csv").await.unwrap_err().is_not_found());
    assert_eq!( target.get_string("paths/233.csv").await.unwrap(), "LC82330992015022LGN00,2015-01-22 13:44:03.111111,0.015");
}

#[tokio::test]
async fn test_run_update_local_scene_list() {
    let tmp = tempfile::tempdir().unwrap();
    let source = DirStore::new( tmp.path().join("no-source")); // has no scene_list.gz
    let target = DirStore::new( tmp.path().join("target"));

    let scene_list = tmp.path().join("scene_list.csv");
    std::fs::write( &scene_list, SCENE_LIST).unwrap();

    let mut config = test_config();
    config.cache_path = tmp.path().join("cache").join("scene_list");

    let index = run_update( &config, &source, &target, Some(scene_list.as_path())).await.unwrap();
    assert_eq!( index.n_scenes(), 5);
    assert!( !config.cache_path.exists()); // nothing downloaded
    assert_eq!( target.get_string("unique_prs.csv").await.unwrap(), "003-017\n044-034\n044-035\n233-099");
}
