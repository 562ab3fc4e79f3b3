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

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CommonError>;

#[derive(Error,Debug)]
pub enum CommonError {
    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("config serialize/deserialize RON error {0}")]
    RonSerdeError( #[from] ron::error::SpannedError),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// errors of [`crate::store::ObjectStore`] implementations
#[derive(Error,Debug)]
pub enum StoreError {
    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("no such object: {0}")]
    NoSuchObject(String),

    #[error("invalid object key: {0}")]
    InvalidKey(String),

    #[cfg(feature="s3")]
    #[error("AWS S3 get object error {0}")]
    AWSS3ObjectError( #[from] aws_smithy_runtime_api::client::result::SdkError<aws_sdk_s3::operation::get_object::GetObjectError, aws_smithy_runtime_api::http::Response>),

    #[cfg(feature="s3")]
    #[error("AWS S3 put object error {0}")]
    AWSS3PutObjectError( #[from] aws_smithy_runtime_api::client::result::SdkError<aws_sdk_s3::operation::put_object::PutObjectError, aws_smithy_runtime_api::http::Response>),

    #[cfg(feature="s3")]
    #[error("AWS S3 list objects error {0}")]
    AWSS3ListObjectsError( #[from] aws_smithy_runtime_api::client::result::SdkError<aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Error, aws_smithy_runtime_api::http::Response>),

    #[cfg(feature="s3")]
    #[error("AWS byte stream download error {0}")]
    AWSByteStreamError( #[from] aws_smithy_types::byte_stream::error::Error),
}

impl StoreError {
    pub fn is_not_found (&self)->bool {
        matches!( self, StoreError::NoSuchObject(_))
    }
}

pub fn no_such_object (key: impl ToString)->StoreError {
    StoreError::NoSuchObject(key.to_string())
}
