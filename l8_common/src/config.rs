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

//! RON based configuration files. `${VAR}` references within the file are replaced with the
//! values of the respective environment variables before the config is deserialized, which
//! is how deployment specific settings such as STATIC_URL or BASE_URL get into configs

use std::path::Path;
use serde::de::DeserializeOwned;

use crate::errors::Result;
use crate::strings::env_expand;

/// load a config struct from a RON file
pub fn load_config<C,P> (path: P) -> Result<C> where C: DeserializeOwned, P: AsRef<Path> {
    let src = std::fs::read_to_string( path.as_ref())?;
    config_from_str( &src)
}

pub fn config_from_str<C> (src: &str) -> Result<C> where C: DeserializeOwned {
    let expanded = env_expand(src);
    Ok( ron::de::from_str( &expanded)? )
}
