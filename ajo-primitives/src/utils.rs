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

//! A utility module for working with primitives.

use blake2::{Blake2b, Digest, digest::typenum::U32};
use core::fmt;

/// BLAKE2b-256 hasher state.
pub type Blake2b256 = Blake2b<U32>;

/// Hashes the given data with BLAKE2b-256.
///
/// Sui derives addresses and transaction digests with this function, so
/// it must never be swapped for another hasher.
pub fn hash(data: &[u8]) -> [u8; 32] {
    let mut ctx = Blake2b256::new();
    ctx.update(data);
    ctx.finalize().into()
}

/// Hashes the concatenation of the given parts with BLAKE2b-256.
pub fn hash_of_array<T: AsRef<[u8]>, const N: usize>(array: [T; N]) -> [u8; 32] {
    let mut ctx = Blake2b256::new();
    for data in array {
        ctx.update(data);
    }
    ctx.finalize().into()
}

/// Hex formatter for 32-byte identifiers.
///
/// Honours the precision flag: `{:.4}` prints the first and the last four
/// bytes separated by `..`.
pub(crate) struct ByteSliceFormatter<'a>(pub &'a [u8; 32]);

impl fmt::Display for ByteSliceFormatter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const MEDIAN: usize = 16;

        let bytes = self.0;
        let (head, tail) = match f.precision() {
            Some(precision) if precision < MEDIAN => {
                (&bytes[..precision], Some(&bytes[32 - precision..]))
            }
            _ => (&bytes[..], None),
        };

        f.write_str("0x")?;
        f.write_str(&hex::encode(head))?;

        if let Some(tail) = tail {
            f.write_str("..")?;
            f.write_str(&hex::encode(tail))?;
        }

        Ok(())
    }
}
