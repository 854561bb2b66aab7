// This file is part of Gear.

// Copyright (C) 2025 Gear Technologies Inc.
// SPDX-License-Identifier: GPL-3.0-or-later WITH Classpath-exception-2.0

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! SUI denomination helpers.
//!
//! Every amount crossing the chain boundary is an integer count of MIST.

use crate::ConversionError;

/// Number of MIST in one SUI.
pub const MIST_PER_SUI: u64 = 1_000_000_000;

const FRACTION_DIGITS: usize = 9;

/// Converts a SUI amount into MIST, rounding to the nearest unit.
///
/// Negative and NaN inputs saturate to zero, oversized ones to `u64::MAX`.
pub fn sui_to_mist(sui: f64) -> u64 {
    (sui * MIST_PER_SUI as f64).round() as u64
}

/// Converts MIST into SUI.
pub fn mist_to_sui(mist: u64) -> f64 {
    mist as f64 / MIST_PER_SUI as f64
}

/// Parses a decimal SUI amount such as `"1.25"` into MIST without going
/// through floating point.
pub fn parse_sui(s: &str) -> Result<u64, ConversionError> {
    let s = s.trim();
    let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));

    let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty())
        || !is_digits(whole)
        || !is_digits(fraction)
        || fraction.len() > FRACTION_DIGITS
    {
        return Err(ConversionError::InvalidAmount);
    }

    let whole = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<u64>()
            .map_err(|_| ConversionError::InvalidAmount)?
    };
    let fraction = if fraction.is_empty() {
        0
    } else {
        format!("{fraction:0<FRACTION_DIGITS$}")
            .parse::<u64>()
            .map_err(|_| ConversionError::InvalidAmount)?
    };

    whole
        .checked_mul(MIST_PER_SUI)
        .and_then(|mist| mist.checked_add(fraction))
        .ok_or(ConversionError::InvalidAmount)
}
