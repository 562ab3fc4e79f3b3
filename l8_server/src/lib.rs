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

//! the Landsat-8 site server. Pages are rendered on request from the derived files in the site's
//! static bucket (see `l8_updater`) and from the scene files of the public Landsat bucket

use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use axum::{routing::get, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::info;

use l8_common::{s3::{create_s3_client, S3Store}, static_bucket, store::{DirStore, ObjectStore}, LANDSAT_BUCKET};

mod errors;
pub use errors::*;

pub mod helpers;
pub mod views;
pub mod handlers;

use handlers::*;

pub const UNIQUES_FILE: &str = "unique_prs.csv";
pub const FEATURED_FILE: &str = "featured.csv";
pub const PATHS_DIR: &str = "paths";

#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct ServerConfig {
    pub sock_addr: SocketAddr,

    /// URL of the site's static bucket (with trailing '/'). This is also where page assets are loaded from
    pub static_url: String,

    /// deployment stage, which determines the base path of site links
    #[serde(default)]
    pub stage: String,

    pub s3_region: String,

    #[serde(default="default_landsat_bucket")]
    pub landsat_bucket: String,

    /// public URL of the Landsat bucket (without trailing '/')
    #[serde(default="default_landsat_url")]
    pub landsat_url: String,

    /// read derived site files from this directory instead of the static bucket
    #[serde(default)]
    pub static_dir: Option<PathBuf>,

    /// read scene files from this directory instead of the Landsat bucket
    #[serde(default)]
    pub landsat_dir: Option<PathBuf>,
}

fn default_landsat_bucket()->String { LANDSAT_BUCKET.to_string() }
fn default_landsat_url()->String { format!("https://{LANDSAT_BUCKET}.s3.amazonaws.com") }

/// what pages need to know about the site
#[derive(Debug,Clone)]
pub struct SiteContext {
    pub base_path: String,
    pub static_url: String,
    pub landsat_url: String,
    pub landsat_bucket: String,
}

impl SiteContext {
    pub fn from_config (config: &ServerConfig)->Self {
        SiteContext {
            base_path: helpers::base_path( &config.stage),
            static_url: config.static_url.clone(),
            landsat_url: config.landsat_url.trim_end_matches('/').to_string(),
            landsat_bucket: config.landsat_bucket.clone(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub static_store: Arc<dyn ObjectStore>,
    pub landsat_store: Arc<dyn ObjectStore>,
    pub site: Arc<SiteContext>,
}

impl AppState {
    pub fn new (static_store: Arc<dyn ObjectStore>, landsat_store: Arc<dyn ObjectStore>, site: SiteContext)->Self {
        AppState { static_store, landsat_store, site: Arc::new(site) }
    }

    /// create the stores from the config. Directories take precedence over buckets
    pub async fn from_config (config: &ServerConfig)->ServerResult<Self> {
        let static_store: Arc<dyn ObjectStore> = if let Some(dir) = &config.static_dir {
            Arc::new( DirStore::new(dir))
        } else {
            let bucket = static_bucket( &config.static_url)?;
            Arc::new( S3Store::new( create_s3_client( &config.s3_region, false).await, bucket, false))
        };

        let landsat_store: Arc<dyn ObjectStore> = if let Some(dir) = &config.landsat_dir {
            Arc::new( DirStore::new(dir))
        } else {
            Arc::new( S3Store::new( create_s3_client( &config.s3_region, true).await, &config.landsat_bucket, false))
        };

        info!("serving static files from {}, scenes from {}", static_store.name(), landsat_store.name());
        Ok( AppState::new( static_store, landsat_store, SiteContext::from_config(config)))
    }
}

/// all site routes, prefixed with the base path of the stage. Directory-like routes are also
/// matched with a trailing '/' since that is how pages link to each other
pub fn build_router (state: AppState)->Router {
    let bp = state.site.base_path.clone();

    let mut router = Router::new()
        .route( "/", get( root_handler));

    if !bp.is_empty() {
        router = router
            .route( &bp, get( root_handler))
            .route( &format!("{bp}/"), get( root_handler));
    }

    router
        .route( &format!("{bp}/L8"), get( sensor_handler))
        .route( &format!("{bp}/L8/"), get( sensor_handler))
        .route( &format!("{bp}/L8/{{path}}"), get( path_handler))
        .route( &format!("{bp}/L8/{{path}}/"), get( path_handler))
        .route( &format!("{bp}/L8/{{path}}/{{row}}"), get( pathrow_handler))
        .route( &format!("{bp}/L8/{{path}}/{{row}}/"), get( pathrow_handler))
        .route( &format!("{bp}/L8/{{path}}/{{row}}/{{scene}}"), get( scene_handler))
        .route( &format!("{bp}/L8/{{path}}/{{row}}/{{scene}}/"), get( scene_handler))
        .fallback( fallback_handler)
        .layer( TraceLayer::new_for_http())
        .with_state( state)
}

/// serve the site until the process is terminated
pub async fn serve (config: &ServerConfig)->ServerResult<()> {
    let state = AppState::from_config( config).await?;
    let router = build_router( state);

    let listener = tokio::net::TcpListener::bind( config.sock_addr).await?;
    info!("serving http://{}{}/", config.sock_addr, helpers::base_path( &config.stage));
    axum::serve( listener, router).await?;
    Ok(())
}
