// Copyright 2023 Greptime Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::time::Duration;

const MILLIS_PER_SECOND: u128 = 1000;
const MILLIS_PER_MINUTE: u128 = MILLIS_PER_SECOND * 60;
const MILLIS_PER_HOUR: u128 = MILLIS_PER_MINUTE * 60;
const MILLIS_PER_DAY: u128 = MILLIS_PER_HOUR * 24;
const MILLIS_PER_WEEK: u128 = MILLIS_PER_DAY * 7;
const MILLIS_PER_YEAR: u128 = MILLIS_PER_DAY * 365;

/// (unit, millis per unit, only emitted when it divides the remainder exactly)
const UNITS: [(&str, u128, bool); 7] = [
    ("y", MILLIS_PER_YEAR, true),
    ("w", MILLIS_PER_WEEK, true),
    ("d", MILLIS_PER_DAY, false),
    ("h", MILLIS_PER_HOUR, false),
    ("m", MILLIS_PER_MINUTE, false),
    ("s", MILLIS_PER_SECOND, false),
    ("ms", 1, false),
];

/// Renders a duration the way Prometheus prints it, assuming a year always
/// has 365d and a week always has 7d.
///
/// Years and weeks are only used when they divide the remaining duration,
/// as `90d` reads better than `12w6d`.
///
/// ```
/// use std::time::Duration;
/// use promql_formatter::util::display_duration;
///
/// assert_eq!(display_duration(&Duration::from_secs(7 * 24 * 3600)), "1w");
/// assert_eq!(display_duration(&Duration::from_secs(90)), "1m30s");
/// ```
pub fn display_duration(duration: &Duration) -> String {
    if duration.is_zero() {
        return "0s".into();
    }

    let mut remaining = duration.as_millis();
    let mut out = String::new();
    for (unit, millis, exact) in UNITS {
        if exact && remaining % millis != 0 {
            continue;
        }
        let count = remaining / millis;
        if count > 0 {
            out.push_str(&count.to_string());
            out.push_str(unit);
            remaining -= count * millis;
        }
    }
    out
}
