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

//! Alias registry.

use crate::{Error, Keypair, Result};
use ajo_primitives::Address;
use parking_lot::RwLock;
use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::Path,
    sync::Arc,
};

/// A named signing identity.
#[derive(Debug)]
pub struct SigningIdentity {
    alias: String,
    keypair: Keypair,
    address: Address,
}

impl SigningIdentity {
    /// Create identity from its alias and key pair.
    pub fn new(alias: impl Into<String>, keypair: Keypair) -> Self {
        let address = keypair.address();
        Self {
            alias: alias.into(),
            keypair,
            address,
        }
    }

    /// The alias this identity is registered under.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// The key pair.
    pub fn keypair(&self) -> &Keypair {
        &self.keypair
    }

    /// The derived account address.
    pub fn address(&self) -> Address {
        self.address
    }
}

/// Registry of signing identities keyed by alias.
///
/// Meant to be shared as `Arc<Keyring>`; lookups take a read lock only.
#[derive(Debug, Default)]
pub struct Keyring {
    identities: RwLock<HashMap<String, Arc<SigningIdentity>>>,
}

impl Keyring {
    /// Create an empty keyring.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `keypair` under `alias`, replacing any previous identity.
    pub fn register(&self, alias: impl Into<String>, keypair: Keypair) -> Arc<SigningIdentity> {
        let identity = Arc::new(SigningIdentity::new(alias, keypair));
        if self
            .identities
            .write()
            .insert(identity.alias.clone(), identity.clone())
            .is_some()
        {
            tracing::debug!("Replaced identity {}", identity.alias);
        }

        identity
    }

    /// Generate a fresh key pair and register it under `alias`.
    pub fn generate(&self, alias: impl Into<String>) -> Arc<SigningIdentity> {
        self.register(alias, Keypair::generate())
    }

    /// Resolve the identity registered under `alias`.
    pub fn resolve_signer(&self, alias: &str) -> Result<Arc<SigningIdentity>> {
        self.identities
            .read()
            .get(alias)
            .cloned()
            .ok_or_else(|| Error::UnknownAlias(alias.into()))
    }

    /// Resolve the address of the identity registered under `alias`.
    pub fn address_of(&self, alias: &str) -> Result<Address> {
        self.resolve_signer(alias).map(|identity| identity.address)
    }

    /// Registered aliases, sorted.
    pub fn aliases(&self) -> Vec<String> {
        let mut aliases: Vec<_> = self.identities.read().keys().cloned().collect();
        aliases.sort();
        aliases
    }

    /// Number of registered identities.
    pub fn len(&self) -> usize {
        self.identities.read().len()
    }

    /// Whether the keyring has no identities.
    pub fn is_empty(&self) -> bool {
        self.identities.read().is_empty()
    }

    /// Load every entry of a keystore file.
    ///
    /// The file is decoded in full before anything is registered: a single
    /// bad entry rejects the file and leaves the keyring as it was.
    pub fn load_from_keystore_file(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let staged = Self::read_keystore(path).map_err(|source| Error::KeystoreLoad {
            path: path.to_path_buf(),
            source: Box::new(source),
        })?;

        let count = staged.len();
        let mut identities = self.identities.write();
        for (alias, keypair) in staged {
            let identity = Arc::new(SigningIdentity::new(alias.clone(), keypair));
            identities.insert(alias, identity);
        }

        tracing::info!("Loaded {count} identities from {}", path.display());
        Ok(count)
    }

    /// Write every identity to a keystore file in the format
    /// [`Keyring::load_from_keystore_file`] reads.
    pub fn save_to_keystore_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let entries: BTreeMap<String, String> = self
            .identities
            .read()
            .iter()
            .map(|(alias, identity)| (alias.clone(), identity.keypair.to_keystore_string()))
            .collect();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, serde_json::to_vec_pretty(&entries)?)?;
        tracing::debug!("Saved {} identities to {}", entries.len(), path.display());

        Ok(())
    }

    fn read_keystore(path: &Path) -> Result<Vec<(String, Keypair)>> {
        let entries: serde_json::Map<String, serde_json::Value> =
            serde_json::from_slice(&fs::read(path)?)?;

        entries
            .into_iter()
            .map(|(alias, value)| -> Result<(String, Keypair)> {
                let encoded = value.as_str().ok_or_else(|| {
                    Error::InvalidKey(format!("entry {alias:?} is not a string"))
                })?;

                let keypair = Keypair::from_keystore_string(encoded).map_err(|e| match e {
                    Error::InvalidKey(msg) => Error::InvalidKey(format!("entry {alias:?}: {msg}")),
                    e => e,
                })?;

                Ok((alias, keypair))
            })
            .collect()
    }
}
