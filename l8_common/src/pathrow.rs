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

//! WRS-2 path/row keys. A key has the form "PPP-RRR" with both components left padded
//! with '0' to 3 chars, which makes lexicographic and numeric key order the same

use std::fmt::Display;

pub const PR_WIDTH: usize = 3;

/// left pad the string representation of `n` with '0' up to `width` chars. Longer values are not truncated
pub fn zero_pad (n: impl Display, width: usize)->String {
    format!("{:0>width$}", n.to_string())
}

pub fn pathrow_key (path: impl Display, row: impl Display)->String {
    format!("{}-{}", zero_pad(path, PR_WIDTH), zero_pad(row, PR_WIDTH))
}

/// split "PPP-RRR" into ("PPP","RRR")
pub fn split_key (key: &str)->Option<(&str,&str)> {
    key.split_once('-')
}

/// the path component of a "PPP-RRR" key (the whole key if there is no '-')
pub fn key_path (key: &str)->&str {
    split_key(key).map( |(p,_)| p).unwrap_or(key)
}

/// is this a well formed, zero padded path or row component?
pub fn is_valid_path_or_row (s: &str)->bool {
    s.len() == PR_WIDTH && s.bytes().all( |b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_pad() {
        assert_eq!( zero_pad(7, 3), "007");
        assert_eq!( zero_pad("44", 3), "044");
        assert_eq!( zero_pad(233, 3), "233");
        assert_eq!( zero_pad(1234, 3), "1234");
    }

    #[test]
    fn test_keys() {
        let key = pathrow_key( 44, "34");
        assert_eq!( key, "044-034");
        assert_eq!( split_key(&key), Some(("044","034")));
        assert_eq!( key_path(&key), "044");

        assert!( is_valid_path_or_row("001"));
        assert!( !is_valid_path_or_row("1"));
        assert!( !is_valid_path_or_row("0a1"));
        assert!( !is_valid_path_or_row("../"));
    }
}
