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

use chrono::NaiveDate;

pub const INVALID_DATE: &str = "Invalid Date";

/// parse the leading `YYYY-MM-DD` of date or datetime strings such as "2015-01-17 18:56:41.290389"
pub fn parse_date_prefix (s: &str)->Option<NaiveDate> {
    let s = s.trim();
    let date = s.get(0..10)?;
    NaiveDate::parse_from_str( date, "%Y-%m-%d").ok()
}

/// human readable day, e.g. "Sat Jan 17 2015"
pub fn nice_date (s: &str)->String {
    match parse_date_prefix(s) {
        Some(date) => date.format("%a %b %d %Y").to_string(),
        None => INVALID_DATE.to_string()
    }
}
