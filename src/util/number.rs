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

const EXPONENT_BELOW: f64 = 1e-4;
const EXPONENT_FROM: f64 = 1e21;

/// display a float literal so that the PromQL lexer reads back the same value:
/// shortest round-trip digits, `+Inf`/`-Inf` and `NaN` spelled the PromQL way.
/// Very small and very large magnitudes switch to exponent form (`1e-300`).
pub fn display_number(val: f64) -> String {
    if val.is_nan() {
        "NaN".into()
    } else if val.is_infinite() {
        if val.is_sign_positive() {
            "+Inf".into()
        } else {
            "-Inf".into()
        }
    } else if val != 0.0 && !(EXPONENT_BELOW..EXPONENT_FROM).contains(&val.abs()) {
        format!("{val:e}")
    } else {
        format!("{val}")
    }
}
