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

//! Keyring of named signing identities.
//!
//! Identities are loaded from a Sui-style keystore file (a JSON object of
//! `alias -> base64(flag || seed)`) or registered explicitly, and shared
//! by reference across workflows.

#![warn(missing_docs)]

pub use self::{
    keypair::{Keypair, SCHEME_FLAG_ED25519, SignatureBytes},
    keyring::{Keyring, SigningIdentity},
};

mod keypair;
mod keyring;

use std::{io, path::PathBuf};

/// Keyring errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No identity is registered under the alias.
    #[error("Unknown alias: {0}")]
    UnknownAlias(String),
    /// Keystore file could not be loaded; the keyring was left untouched.
    #[error("Failed to load keystore {path:?}: {source}")]
    KeystoreLoad {
        /// Keystore file path.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: Box<Error>,
    },
    /// Malformed key material.
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    /// I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// JSON failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Keyring result.
pub type Result<T, E = Error> = std::result::Result<T, E>;
