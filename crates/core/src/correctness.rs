// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Functions for condition checks similar to the *design by contract* philosophy,
//! to help ensure logical correctness.
//!
//! This module provides validation checking of function or method conditions.
//!
//! A condition is a predicate which must be true just prior to the execution of
//! some section of code, for correct behavior as per the design specification.
//!
//! An [`anyhow::Result`] is returned with a descriptive message when the
//! condition check fails.

/// Standard message prefix for failed condition checks on expected valid values.
pub const FAILED: &str = "Condition failed";

/// Checks the `predicate` is true.
///
/// # Errors
///
/// Returns an error if `predicate` is false.
pub fn check_predicate_true(predicate: bool, fail_msg: &str) -> anyhow::Result<()> {
    if !predicate {
        anyhow::bail!("{fail_msg}")
    }
    Ok(())
}

/// Checks the `predicate` is false.
///
/// # Errors
///
/// Returns an error if `predicate` is true.
pub fn check_predicate_false(predicate: bool, fail_msg: &str) -> anyhow::Result<()> {
    if predicate {
        anyhow::bail!("{fail_msg}")
    }
    Ok(())
}

/// Checks the string `s` has semantic meaning and contains only printable characters.
///
/// # Errors
///
/// Returns an error if:
/// - `s` is an empty string.
/// - `s` consists solely of whitespace characters.
/// - `s` contains a non-printable character.
pub fn check_valid_string(s: &str, param: &str) -> anyhow::Result<()> {
    if s.is_empty() {
        anyhow::bail!("invalid string for '{param}', was empty")
    }
    if s.chars().all(char::is_whitespace) {
        anyhow::bail!("invalid string for '{param}', was all whitespace")
    }
    if s.chars().any(char::is_control) {
        anyhow::bail!("invalid string for '{param}' contained a control character, was '{s}'")
    }
    Ok(())
}

/// Checks the `f64` value is positive and finite.
///
/// # Errors
///
/// Returns an error if `value` is zero, negative, NaN, or infinite.
pub fn check_positive_f64(value: f64, param: &str) -> anyhow::Result<()> {
    if !value.is_finite() {
        anyhow::bail!("invalid f64 for '{param}', was {value}")
    }
    if value <= 0.0 {
        anyhow::bail!("invalid f64 for '{param}' not positive, was {value}")
    }
    Ok(())
}

/// Checks the `f64` value is non-negative and finite.
///
/// # Errors
///
/// Returns an error if `value` is negative, NaN, or infinite.
pub fn check_non_negative_f64(value: f64, param: &str) -> anyhow::Result<()> {
    if !value.is_finite() {
        anyhow::bail!("invalid f64 for '{param}', was {value}")
    }
    if value < 0.0 {
        anyhow::bail!("invalid f64 for '{param}' negative, was {value}")
    }
    Ok(())
}

/// Checks the `f64` value is within the inclusive range [`l`, `r`].
///
/// # Errors
///
/// Returns an error if `value` is NaN, infinite, or outside the range.
pub fn check_in_range_inclusive_f64(value: f64, l: f64, r: f64, param: &str) -> anyhow::Result<()> {
    if !value.is_finite() {
        anyhow::bail!("invalid f64 for '{param}', was {value}")
    }
    if value < l || value > r {
        anyhow::bail!("invalid f64 for '{param}' not in range [{l}, {r}], was {value}")
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(true, true)]
    #[case(false, false)]
    fn test_check_predicate_true(#[case] predicate: bool, #[case] expected: bool) {
        assert_eq!(check_predicate_true(predicate, "the predicate was false").is_ok(), expected);
    }

    #[rstest]
    #[case(false, true)]
    #[case(true, false)]
    fn test_check_predicate_false(#[case] predicate: bool, #[case] expected: bool) {
        assert_eq!(check_predicate_false(predicate, "the predicate was true").is_ok(), expected);
    }

    #[rstest]
    #[case("a")]
    #[case("ORD-123")]
    #[case("a longer string with spaces")]
    fn test_check_valid_string_ok(#[case] s: &str) {
        assert!(check_valid_string(s, "value").is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("abc\u{0000}")]
    fn test_check_valid_string_err(#[case] s: &str) {
        assert!(check_valid_string(s, "value").is_err());
    }

    #[rstest]
    #[case(1.0, true)]
    #[case(0.000_1, true)]
    #[case(0.0, false)]
    #[case(-1.0, false)]
    #[case(f64::NAN, false)]
    #[case(f64::INFINITY, false)]
    fn test_check_positive_f64(#[case] value: f64, #[case] expected: bool) {
        assert_eq!(check_positive_f64(value, "value").is_ok(), expected);
    }

    #[rstest]
    #[case(0.0, true)]
    #[case(5.98, true)]
    #[case(-0.01, false)]
    #[case(f64::NAN, false)]
    fn test_check_non_negative_f64(#[case] value: f64, #[case] expected: bool) {
        assert_eq!(check_non_negative_f64(value, "value").is_ok(), expected);
    }

    #[rstest]
    #[case(0.0, -90.0, 90.0, true)]
    #[case(-90.0, -90.0, 90.0, true)]
    #[case(90.0, -90.0, 90.0, true)]
    #[case(90.1, -90.0, 90.0, false)]
    #[case(f64::NAN, -90.0, 90.0, false)]
    fn test_check_in_range_inclusive_f64(
        #[case] value: f64,
        #[case] l: f64,
        #[case] r: f64,
        #[case] expected: bool,
    ) {
        assert_eq!(check_in_range_inclusive_f64(value, l, r, "value").is_ok(), expected);
    }
}
