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

//! support functions for AWS S3 objects

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, meta::region::RegionProviderChain};
use aws_sdk_s3::{Client, primitives::ByteStream, types::ObjectCannedAcl};
use bytes::Bytes;
use tracing::debug;

use crate::errors::{StoreError, no_such_object};
use crate::store::{ObjectStore, Result};

pub type S3Client = Client;

/// create S3 Client for given region. Anonymous clients can only read public buckets such as `landsat-pds`,
/// writing requires credentials from the standard AWS environment (env vars, profiles, instance roles)
pub async fn create_s3_client (region: &str, anonymous: bool) -> S3Client {
    let region_provider = RegionProviderChain::first_try( Region::new( region.to_string()));
    let mut loader = aws_config::defaults( BehaviorVersion::latest()).region(region_provider);
    if anonymous {
        loader = loader.no_credentials();
    }
    let aws_config = loader.load().await;
    Client::new(&aws_config)
}

/// `ObjectStore` for a single S3 bucket
#[derive(Debug,Clone)]
pub struct S3Store {
    client: S3Client,
    bucket: String,
    public_read: bool, // if set uploaded objects get a "public-read" ACL
}

impl S3Store {
    pub fn new (client: S3Client, bucket: impl ToString, public_read: bool)->Self {
        S3Store { client, bucket: bucket.to_string(), public_read }
    }

    pub fn bucket (&self)->&str { &self.bucket }
}

#[async_trait]
impl ObjectStore for S3Store {
    fn name (&self)->String {
        format!("s3://{}", self.bucket)
    }

    async fn get_object (&self, key: &str)->Result<Bytes> {
        let res = self.client.get_object().bucket(&self.bucket).key(key).send().await;
        match res {
            Ok(output) => {
                let data = output.body.collect().await?;
                Ok( data.into_bytes())
            }
            Err(e) => {
                if e.as_service_error().map( |se| se.is_no_such_key()).unwrap_or(false) {
                    Err( no_such_object(key))
                } else {
                    Err( e.into())
                }
            }
        }
    }

    async fn put_object (&self, key: &str, body: Bytes)->Result<()> {
        debug!("put s3://{}/{} ({} bytes)", self.bucket, key, body.len());
        let mut req = self.client.put_object()
            .bucket(&self.bucket)
            .key(key)
            .body( ByteStream::from(body));
        if self.public_read {
            req = req.acl( ObjectCannedAcl::PublicRead);
        }
        req.send().await?;
        Ok(())
    }

    async fn list_keys (&self, prefix: &str)->Result<Vec<String>> {
        let mut keys: Vec<String> = Vec::new();
        let mut token: Option<String> = None;

        loop {
            let mut req = self.client.list_objects_v2().bucket(&self.bucket).prefix(prefix);
            if let Some(t) = token.take() {
                req = req.continuation_token(t);
            }
            let res = req.send().await?;

            for o in res.contents() {
                if let Some(key) = o.key() { keys.push( key.to_string()) }
            }

            token = if res.is_truncated() == Some(true) { res.next_continuation_token().map( |t| t.to_string()) } else { None };
            if token.is_none() { break }
        }

        keys.sort();
        Ok(keys)
    }
}
