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

use std::fs::{self,File};
use std::io::{self,Write,ErrorKind::*};
use std::path::Path;

use crate::macros::io_error;

type Result<T> = std::result::Result<T,std::io::Error>;

/// the last '/' separated element of an object key or URL path (the whole string if there is no '/')
pub fn basename (key: &str)->&str {
    match key.rfind('/') {
        Some(idx) => &key[idx+1..],
        None => key
    }
}

/// lower case extension of a key or path, including the leading '.' (e.g. ".tif"), or "" if there is none
pub fn extension_lowercase (key: &str)->String {
    let name = basename(key);
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[idx..].to_ascii_lowercase(),
        _ => String::new()
    }
}

pub fn ensure_dir (path: impl AsRef<Path>)->io::Result<()> {
    let path = path.as_ref();
    if !path.is_dir() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// check if dir pathname exists and is writable, try to create dir otherwise
pub fn ensure_writable_dir (path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    if path.is_dir() {
        let md = fs::metadata(&path)?;
        if md.permissions().readonly() {
            Err(io_error!(PermissionDenied, "output_dir {:?} not writable", &path))
        } else {
            Ok(())
        }

    } else {
        fs::create_dir_all(path)
    }
}

/// write contents to path, creating missing parent dirs
pub fn write_file (path: impl AsRef<Path>, contents: &[u8]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() { ensure_dir(parent)?; }
    }
    let mut file = File::create(path)?;
    file.write_all(contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_parts() {
        assert_eq!( basename("L8/044/034/LC80440342015017LGN00/LC80440342015017LGN00_B1.TIF"), "LC80440342015017LGN00_B1.TIF");
        assert_eq!( basename("index.html"), "index.html");
        assert_eq!( extension_lowercase("L8/044/034/X/X_B1.TIF"), ".tif");
        assert_eq!( extension_lowercase("L8/044/034/X/X_MTL.json"), ".json");
        assert_eq!( extension_lowercase("a.dir/README"), "");
        assert_eq!( extension_lowercase(".hidden"), "");
    }
}
