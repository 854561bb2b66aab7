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

use ajo_primitives::{Digest, ObjectId};
use std::result::Result as StdResult;

/// `Result` type with a predefined error type ([`Error`]).
pub type Result<T, E = Error> = StdResult<T, E>;

/// Common error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A wrapper around [`ajo_sdk::Error`].
    #[error(transparent)]
    Sdk(#[from] ajo_sdk::Error),
    /// Occurs when a cycle is run on a group that is no longer active.
    #[error("Savings group {0} is not active")]
    GroupInactive(ObjectId),
    /// Occurs when the admin cannot cover the gas reserve.
    #[error("Balance {balance} MIST is below the {required} MIST gas reserve")]
    InsufficientBalance { balance: u64, required: u64 },
    /// Occurs when group creation succeeded but no created object was
    /// reported.
    #[error("Transaction {digest} created no savings group object")]
    GroupCreationIncomplete { digest: Digest },
}

impl Error {
    /// Classified contract abort, if this is one.
    pub fn abort_kind(&self) -> Option<ajo_sdk::AbortKind> {
        match self {
            Self::Sdk(err) => err.abort_kind(),
            _ => None,
        }
    }
}

impl From<ajo_sdk::ValidationError> for Error {
    fn from(err: ajo_sdk::ValidationError) -> Self {
        Self::Sdk(err.into())
    }
}

impl From<ajo_ring::Error> for Error {
    fn from(err: ajo_ring::Error) -> Self {
        Self::Sdk(err.into())
    }
}
