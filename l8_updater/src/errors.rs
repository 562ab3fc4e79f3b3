/*
 * Copyright (c) 2024, United States Government, as represented by the
 * Administrator of the National Aeronautics and Space Administration.
 * All rights reserved.
 *
 * The ODIN - Open Data Integration Framework is licensed under the
 * Apache License, Version 2.0 (the "License"); you may not use this file
 * except in compliance with the License. You may obtain a copy of the
 * License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use thiserror::Error;

pub type Result<T> = std::result::Result<T, UpdaterError>;

#[derive(Error,Debug)]
pub enum UpdaterError {
    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("CSV error {0}")]
    CsvError( #[from] csv::Error),

    #[error("object store error {0}")]
    StoreError( #[from] l8_common::StoreError),

    #[error("common error {0}")]
    CommonError( #[from] l8_common::CommonError),

    #[error("config error {0}")]
    ConfigError( String ),
}

pub fn config_error (msg: impl ToString)->UpdaterError {
    UpdaterError::ConfigError(msg.to_string())
}
