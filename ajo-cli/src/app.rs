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

use crate::cmd::{
    Command,
    config::{ConfigSettings, Endpoint},
};
use ajo_client::SavingsGroupManager;
use ajo_primitives::{Address, ObjectId};
use ajo_ring::Keyring;
use ajo_sdk::{RpcTransport, SavingsGroupClient};
use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::{env, path::PathBuf, sync::Arc, time::Duration};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Parser)]
pub struct Opts {
    /// Timeout for RPC requests, in milliseconds.
    #[arg(short, long, default_value = "60000")]
    pub timeout: u64,

    /// Increase verbosity level, maximum is 3.
    #[clap(short, long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Sui full node RPC endpoint.
    ///
    /// Can be `mainnet`, `testnet`, `devnet`, `localnet` or a custom URL.
    #[arg(short, long)]
    pub endpoint: Option<Endpoint>,

    /// Keystore file with the signing identities.
    #[arg(short, long)]
    pub keystore: Option<PathBuf>,

    /// Package the savings group contract is published at.
    #[arg(short, long)]
    pub package: Option<ObjectId>,
}

/// Application state.
#[derive(Debug)]
pub struct App {
    opts: Opts,
}

impl App {
    /// Constructs new application instance.
    pub fn new(opts: Opts) -> Self {
        Self { opts }
    }

    pub async fn run(mut self, command: Command) -> Result<()> {
        let filter = if env::var(EnvFilter::DEFAULT_ENV).is_ok() {
            EnvFilter::from_default_env()
        } else {
            match self.opts.verbosity {
                0 => "ajo=info,ajo_sdk=info,ajo_client=info".into(),
                1 => "ajo=debug,ajo_sdk=debug,ajo_client=debug".into(),
                2 => "debug".into(),
                _ => "trace".into(),
            }
        };

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .without_time()
            .try_init()
            .map_err(|err| anyhow!("{err}"))?;

        command.exec(&mut self).await
    }

    /// Returns the persistent configuration.
    pub fn config(&self) -> Result<ConfigSettings> {
        ConfigSettings::read()
    }

    /// Returns the keystore path, command line first.
    pub fn keystore_path(&self) -> Result<PathBuf> {
        match &self.opts.keystore {
            Some(path) => Ok(path.clone()),
            None => self.config()?.keystore_path(),
        }
    }

    /// Returns the keyring, loaded from the keystore file if there is one.
    pub fn keyring(&self) -> Result<Arc<Keyring>> {
        let keyring = Keyring::new();
        let path = self.keystore_path()?;

        if path.exists() {
            keyring.load_from_keystore_file(&path)?;
        } else {
            tracing::debug!("No keystore at {}", path.display());
        }

        Ok(Arc::new(keyring))
    }

    /// Resolves a hex address or a keyring alias.
    pub fn resolve_address(&self, input: &str) -> Result<Address> {
        if input.starts_with("0x") {
            return Ok(input.parse()?);
        }

        Ok(self.keyring()?.address_of(input)?)
    }

    /// Returns the contract package id.
    pub fn package(&self) -> Result<ObjectId> {
        match self.opts.package {
            Some(package) => Ok(package),
            None => self.config()?.package.context(
                "contract package is not configured, pass `--package` or run `ajo config set package <ID>`",
            ),
        }
    }

    /// Returns a Sui JSON-RPC transport.
    pub fn transport(&self) -> Result<RpcTransport> {
        let endpoint = match self.opts.endpoint.clone() {
            Some(endpoint) => endpoint,
            None => self.config()?.endpoint,
        };

        Ok(RpcTransport::with_timeout(
            endpoint.as_str(),
            Duration::from_millis(self.opts.timeout),
        )?)
    }

    /// Returns the savings group contract client.
    pub fn client(&self) -> Result<SavingsGroupClient<RpcTransport>> {
        Ok(SavingsGroupClient::new(
            self.transport()?,
            self.keyring()?,
            self.package()?,
        ))
    }

    /// Returns the workflow manager.
    pub fn manager(&self) -> Result<SavingsGroupManager<RpcTransport>> {
        Ok(SavingsGroupManager::new(Arc::new(self.client()?)))
    }
}
