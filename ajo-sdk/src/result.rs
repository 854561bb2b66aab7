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

//! SDK errors.

use crate::{
    abort::{AbortKind, ContractError},
    group::ValidationError,
};
use ajo_primitives::{Address, ConversionError, ObjectId};

/// Errors
#[derive(Debug, thiserror::Error, derive_more::Unwrap)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Keyring(#[from] ajo_ring::Error),
    #[error("Object not found: {0}")]
    ObjectNotFound(ObjectId),
    #[error("Malformed object data: {0}")]
    MalformedObjectData(String),
    #[error(transparent)]
    Contract(#[from] ContractError),
    #[error("No gas coins owned by {0}")]
    NoGasCoins(Address),
    #[error(transparent)]
    Rpc(#[from] jsonrpsee::core::ClientError),
    #[error(transparent)]
    Bcs(#[from] bcs::Error),
    #[error(transparent)]
    Base64(#[from] base64::DecodeError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error("Invalid rpc URL.")]
    InvalidUrl,
}

impl Error {
    /// Classified contract abort, if this is one.
    pub fn abort_kind(&self) -> Option<AbortKind> {
        match self {
            Self::Contract(err) => Some(err.kind),
            _ => None,
        }
    }

    /// Whether the contract rejected a contribution as a duplicate.
    pub fn is_already_contributed(&self) -> bool {
        self.abort_kind() == Some(AbortKind::AlreadyContributed)
    }
}

/// Custom Result
pub type Result<T, E = Error> = std::result::Result<T, E>;
