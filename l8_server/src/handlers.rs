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

//! request handlers. Each one gets its data from the static or the Landsat store and renders a complete page

use axum::{
    extract::{Path as AxumPath, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, warn, error};

use l8_common::{datetime::nice_date, pathrow::is_valid_path_or_row};
use crate::{
    errors::{bad_request, not_found, ServerResult},
    helpers::{all_paths, is_valid_scene_id, parse_featured, rows_for_path, scenes_for_pathrow, sort_newest_first, MtlFile, SceneDetails, SceneFiles},
    views, AppState, FEATURED_FILE, PATHS_DIR, UNIQUES_FILE,
};

fn html_response (status: StatusCode, html: String)->Response {
    (status, [(header::CONTENT_TYPE, "text/html; charset=utf-8")], html).into_response()
}

/// turn a page result into a response, rendering failures as error pages
fn render (state: &AppState, res: ServerResult<String>)->Response {
    match res {
        Ok(html) => html_response( StatusCode::OK, html),
        Err(e) => {
            let status = e.status();
            if status.is_server_error() { error!("request failed: {e}") } else { warn!("request rejected: {e}") }
            html_response( status, views::error_page( &state.site, status))
        }
    }
}

fn check_path_row (path: &str, row: Option<&str>)->ServerResult<()> {
    if !is_valid_path_or_row(path) { return Err( bad_request( format!("invalid path: {path}"))) }
    if let Some(row) = row {
        if !is_valid_path_or_row(row) { return Err( bad_request( format!("invalid row: {row}"))) }
    }
    Ok(())
}

pub async fn root_handler (State(state): State<AppState>)->Response {
    let res = root_page( &state).await;
    render( &state, res)
}

async fn root_page (state: &AppState)->ServerResult<String> {
    let csv = state.static_store.get_string( FEATURED_FILE).await?;
    let featured = parse_featured( &csv);
    debug!("rendering {} featured scenes", featured.len());
    Ok( views::index_page( &state.site, &featured))
}

pub async fn sensor_handler (State(state): State<AppState>)->Response {
    let res = sensor_page( &state).await;
    render( &state, res)
}

async fn sensor_page (state: &AppState)->ServerResult<String> {
    let prs = state.static_store.get_string( UNIQUES_FILE).await?;
    let paths = all_paths( prs.lines());
    Ok( views::sensor_page( &state.site, &paths))
}

pub async fn path_handler (State(state): State<AppState>, AxumPath(path): AxumPath<String>)->Response {
    let res = path_page( &state, &path).await;
    render( &state, res)
}

async fn path_page (state: &AppState, path: &str)->ServerResult<String> {
    check_path_row( path, None)?;
    let prs = state.static_store.get_string( UNIQUES_FILE).await?;
    let rows = rows_for_path( prs.lines(), path);
    if rows.is_empty() {
        return Err( not_found( format!("path {path}")))
    }
    Ok( views::path_page( &state.site, path, &rows))
}

pub async fn pathrow_handler (State(state): State<AppState>, AxumPath((path,row)): AxumPath<(String,String)>)->Response {
    let res = pathrow_page( &state, &path, &row).await;
    render( &state, res)
}

async fn pathrow_page (state: &AppState, path: &str, row: &str)->ServerResult<String> {
    check_path_row( path, Some(row))?;
    let csv = state.static_store.get_string( &format!("{PATHS_DIR}/{path}.csv")).await?;
    let mut scenes = scenes_for_pathrow( csv.lines(), path, row);
    sort_newest_first( &mut scenes);
    Ok( views::pathrow_page( &state.site, path, row, &scenes))
}

pub async fn scene_handler (State(state): State<AppState>, AxumPath((path,row,scene)): AxumPath<(String,String,String)>)->Response {
    let res = scene_page( &state, &path, &row, &scene).await;
    render( &state, res)
}

async fn scene_page (state: &AppState, path: &str, row: &str, scene: &str)->ServerResult<String> {
    check_path_row( path, Some(row))?;
    if !is_valid_scene_id( scene) { return Err( bad_request( format!("invalid scene id: {scene}"))) }

    let prefix = format!("L8/{path}/{row}/{scene}/");
    let mtl_key = format!("{prefix}{scene}_MTL.json");

    let (keys, mtl) = tokio::try_join!(
        state.landsat_store.list_keys( &prefix),
        state.landsat_store.get_object( &mtl_key)
    )?;
    let mtl: MtlFile = serde_json::from_slice( &mtl)?;

    let details = SceneDetails {
        id: scene.to_string(),
        path: path.to_string(),
        row: row.to_string(),
        thumbnail: format!("{}/{prefix}{scene}_thumb_large.jpg", state.site.landsat_url),
        cloud_cover: mtl.l1_metadata.image_attributes.cloud_cover,
        date: nice_date( &mtl.l1_metadata.product_metadata.date_acquired),
        files: SceneFiles::from_keys( keys.iter().map( |k| k.as_str())),
    };
    Ok( views::scene_page( &state.site, &details))
}

pub async fn fallback_handler (State(state): State<AppState>)->Response {
    html_response( StatusCode::NOT_FOUND, views::error_page( &state.site, StatusCode::NOT_FOUND))
}
