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

use http::StatusCode;
use thiserror::Error;

pub type ServerResult<T> = std::result::Result<T, ServerError>;

#[derive(Error,Debug)]
pub enum ServerError {
    #[error("IO error: {0}")]
    IoError( #[from] std::io::Error),

    #[error("object store error: {0}")]
    StoreError( #[from] l8_common::StoreError),

    #[error("common error: {0}")]
    CommonError( #[from] l8_common::CommonError),

    #[error("JSON error: {0}")]
    JsonError( #[from] serde_json::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),
}

impl ServerError {
    pub fn status (&self)->StatusCode {
        match self {
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::StoreError(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub fn not_found (msg: impl ToString)->ServerError {
    ServerError::NotFound(msg.to_string())
}

pub fn bad_request (msg: impl ToString)->ServerError {
    ServerError::BadRequest(msg.to_string())
}
