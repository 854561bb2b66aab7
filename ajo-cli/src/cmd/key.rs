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

//! Command `key`.

use crate::app::App;
use ajo_ring::{Keypair, Keyring};
use anyhow::{Result, bail};
use clap::Parser;
use colored::Colorize;

/// Manage the signing identities of the keystore.
#[derive(Clone, Debug, Parser)]
pub enum Key {
    /// Generate a new identity.
    New {
        /// Alias of the identity.
        alias: String,
    },
    /// Import an identity from its keystore encoding.
    Import {
        /// Alias of the identity.
        alias: String,
        /// Base64 of the scheme flag followed by the 32-byte seed.
        key: String,
    },
    /// List the identities of the keystore.
    List,
    /// Print the address of an identity.
    Address {
        /// Alias of the identity.
        alias: String,
    },
}

impl Key {
    pub fn exec(self, app: &App) -> Result<()> {
        let path = app.keystore_path()?;
        let keyring = app.keyring()?;

        match self {
            Key::New { alias } => {
                ensure_vacant(&keyring, &alias)?;

                let identity = keyring.generate(alias);
                keyring.save_to_keystore_file(&path)?;

                println!(
                    "Generated {} with address {}",
                    identity.alias().blue(),
                    identity.address()
                );
            }
            Key::Import { alias, key } => {
                ensure_vacant(&keyring, &alias)?;

                let identity = keyring.register(alias, Keypair::from_keystore_string(&key)?);
                keyring.save_to_keystore_file(&path)?;

                println!(
                    "Imported {} with address {}",
                    identity.alias().blue(),
                    identity.address()
                );
            }
            Key::List => {
                if keyring.is_empty() {
                    println!("No identities in {}", path.display());
                }

                for alias in keyring.aliases() {
                    println!("{:<16} {}", alias.bold(), keyring.address_of(&alias)?);
                }
            }
            Key::Address { alias } => println!("{}", keyring.address_of(&alias)?),
        }

        Ok(())
    }
}

fn ensure_vacant(keyring: &Keyring, alias: &str) -> Result<()> {
    if keyring.address_of(alias).is_ok() {
        bail!("identity `{alias}` already exists");
    }

    Ok(())
}
