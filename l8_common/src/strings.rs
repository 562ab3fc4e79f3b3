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

use std::{borrow::Cow, env};
use regex::{Captures, Regex};
use lazy_static::lazy_static;

lazy_static! {
    static ref ENV_VAR_RE: Regex = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap();
}

/// replace all `${VAR}` references in `s` with the values of the respective environment variables.
/// Undefined variables expand into an empty string
pub fn env_expand (s: &str)->Cow<'_, str> {
    ENV_VAR_RE.replace_all( s, |caps: &Captures| env::var(&caps[1]).unwrap_or_default())
}

/// escape the characters that are not allowed verbatim in HTML text and attribute values
pub fn html_escape (s: &str)->Cow<'_, str> {
    if !s.contains( ['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s)
    }

    let mut buf = String::with_capacity( s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => buf.push_str("&amp;"),
            '<' => buf.push_str("&lt;"),
            '>' => buf.push_str("&gt;"),
            '"' => buf.push_str("&quot;"),
            '\'' => buf.push_str("&#39;"),
            _ => buf.push(c)
        }
    }
    Cow::Owned(buf)
}
