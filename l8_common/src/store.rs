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

//! a minimal object store abstraction over S3 buckets and local directories

use std::{io::ErrorKind, path::{Component, Path, PathBuf}};
use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::{StoreError, no_such_object};

pub type Result<T> = std::result::Result<T, StoreError>;

/// the operations we need from a bucket-like key/value store
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// name of the store for log messages (bucket name or directory)
    fn name (&self)->String;

    /// retrieve the whole object. Missing objects are reported as `StoreError::NoSuchObject`
    async fn get_object (&self, key: &str)->Result<Bytes>;

    /// create or replace object
    async fn put_object (&self, key: &str, body: Bytes)->Result<()>;

    /// all keys that start with `prefix`, in ascending order
    async fn list_keys (&self, prefix: &str)->Result<Vec<String>>;

    /// retrieve object as (lossy) utf8 text
    async fn get_string (&self, key: &str)->Result<String> {
        let bytes = self.get_object(key).await?;
        Ok( String::from_utf8_lossy( &bytes).into_owned())
    }
}

/// an `ObjectStore` that maps keys to files below a root directory. Keys use '/' as separator
#[derive(Debug,Clone)]
pub struct DirStore {
    root: PathBuf
}

impl DirStore {
    pub fn new (root: impl AsRef<Path>)->Self {
        DirStore { root: root.as_ref().to_path_buf() }
    }

    pub fn root (&self)->&Path { &self.root }

    fn path_of (&self, key: &str)->Result<PathBuf> {
        let rel = Path::new(key);
        if key.is_empty() || !rel.components().all( |c| matches!(c, Component::Normal(_))) {
            return Err( StoreError::InvalidKey(key.to_string()))
        }
        Ok( self.root.join(rel))
    }

    fn collect_keys (dir: &Path, rel: &str, prefix: &str, keys: &mut Vec<String>)->std::io::Result<()> {
        for e in std::fs::read_dir(dir)? {
            let e = e?;
            let name = e.file_name().to_string_lossy().into_owned();
            let key = if rel.is_empty() { name } else { format!("{rel}/{name}") };

            if e.file_type()?.is_dir() {
                // only descend if the dir can still contain matching keys
                if prefix.starts_with( &key) || key.starts_with(prefix) {
                    Self::collect_keys( &e.path(), &key, prefix, keys)?;
                }
            } else if key.starts_with(prefix) {
                keys.push(key);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for DirStore {
    fn name (&self)->String {
        self.root.to_string_lossy().into_owned()
    }

    async fn get_object (&self, key: &str)->Result<Bytes> {
        let path = self.path_of(key)?;
        match tokio::fs::read(&path).await {
            Ok(data) => Ok( Bytes::from(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err( no_such_object(key)),
            Err(e) => Err( e.into())
        }
    }

    async fn put_object (&self, key: &str, body: Bytes)->Result<()> {
        let path = self.path_of(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write( &path, &body).await?;
        Ok(())
    }

    async fn list_keys (&self, prefix: &str)->Result<Vec<String>> {
        let root = self.root.clone();
        let prefix = prefix.to_string();

        // directory traversal is blocking
        let keys = tokio::task::spawn_blocking( move || {
            let mut keys = Vec::new();
            if root.is_dir() {
                Self::collect_keys( &root, "", &prefix, &mut keys)?;
            }
            keys.sort();
            Ok::<Vec<String>,std::io::Error>(keys)
        }).await.map_err( std::io::Error::other)??;

        Ok(keys)
    }
}
