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

use crate::app::App;
use ajo_primitives::ObjectId;
use ajo_sdk::RpcTransport;
use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf, str::FromStr};
use url::Url;

const CONFIG_DIR: &str = "ajo";
const CONFIG_FILE: &str = "config.toml";
const KEYSTORE_FILE: &str = "keystore.json";

/// Access `ajo` persistent configuration.
#[derive(Clone, Debug, Parser)]
pub struct Config {
    #[clap(subcommand)]
    action: Action,
}

impl Config {
    pub fn exec(self, app: &mut App) -> Result<()> {
        let mut config = app.config()?;

        match self.action {
            Action::Set(option) => {
                config.set(option);
                config
                    .write()
                    .context("failed to write new configuration")?;

                println!("Successfully updated the configuration");
                println!();
                config.pretty_print()?;
            }
            Action::Get => config.pretty_print()?,
            Action::Reset => {
                config = ConfigSettings::default();
                config
                    .write()
                    .context("failed to write new configuration")?;

                println!("Successfully reset the configuration");
                println!();
                config.pretty_print()?;
            }
        }

        Ok(())
    }
}

/// `ajo` persistent configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ConfigSettings {
    /// Sui full node RPC endpoint.
    #[serde(default)]
    pub endpoint: Endpoint,
    /// Package the contract is published at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<ObjectId>,
    /// Keystore file, `<config dir>/ajo/keystore.json` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keystore: Option<PathBuf>,
}

#[derive(Debug, Clone, Parser)]
enum ConfigOption {
    /// Sets the default RPC endpoint.
    Endpoint {
        /// New default RPC endpoint.
        endpoint: Endpoint,
    },
    /// Sets the contract package.
    Package {
        /// Package object id.
        package: ObjectId,
    },
    /// Sets the keystore file.
    Keystore {
        /// Path of the keystore file.
        path: PathBuf,
    },
}

impl ConfigSettings {
    fn config_dir() -> Result<PathBuf> {
        Ok(if cfg!(test) {
            env::temp_dir().join("ajo-test")
        } else {
            dirs::config_dir()
                .context("failed to get config directory")?
                .join(CONFIG_DIR)
        })
    }

    fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Reads the configuration from disk.
    pub fn read() -> Result<ConfigSettings> {
        let path = Self::config_path()?;

        if path.exists() {
            let contents = fs::read_to_string(path)?;

            Ok(toml::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Sets the configuration option.
    fn set(&mut self, option: ConfigOption) {
        match option {
            ConfigOption::Endpoint { endpoint } => self.endpoint = endpoint,
            ConfigOption::Package { package } => self.package = Some(package),
            ConfigOption::Keystore { path } => self.keystore = Some(path),
        }
    }

    /// Writes the configuration to disk.
    pub fn write(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;

        Ok(fs::write(path, contents)?)
    }

    /// Configured keystore file or the default one.
    pub fn keystore_path(&self) -> Result<PathBuf> {
        match &self.keystore {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join(KEYSTORE_FILE)),
        }
    }

    /// Pretty-prints the configuration.
    pub fn pretty_print(&self) -> Result<()> {
        println!("{} {}", "RPC URL:".bold(), self.endpoint.as_str());
        match self.package {
            Some(package) => println!("{} {package}", "Package:".bold()),
            None => println!("{} {}", "Package:".bold(), "not set".dimmed()),
        }
        println!("{} {}", "Keystore:".bold(), self.keystore_path()?.display());

        Ok(())
    }
}

/// Config action
#[derive(Clone, Debug, Parser)]
enum Action {
    /// Set a persistent option.
    #[clap(subcommand)]
    Set(ConfigOption),
    /// Print current configuration.
    Get,
    /// Reset the persistent configuration.
    Reset,
}

/// Sui networks
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    /// Sui main network
    Mainnet,
    /// Sui test network
    #[default]
    Testnet,
    /// Sui development network
    Devnet,
    /// Local node
    Localnet,
    /// Customized endpoint
    Custom(Url),
}

impl Endpoint {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Mainnet => RpcTransport::MAINNET_ENDPOINT,
            Self::Testnet => RpcTransport::TESTNET_ENDPOINT,
            Self::Devnet => RpcTransport::DEVNET_ENDPOINT,
            Self::Localnet => RpcTransport::LOCALNET_ENDPOINT,
            Self::Custom(url) => url.as_str(),
        }
    }
}

impl FromStr for Endpoint {
    type Err = url::ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "mainnet" => Self::Mainnet,
            "testnet" => Self::Testnet,
            "devnet" => Self::Devnet,
            "localnet" => Self::Localnet,
            input => Self::Custom(Url::parse(input)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_names() {
        assert_eq!("mainnet".parse(), Ok(Endpoint::Mainnet));
        assert_eq!("localnet".parse(), Ok(Endpoint::Localnet));
        assert_eq!(
            Endpoint::Devnet.as_str(),
            RpcTransport::DEVNET_ENDPOINT
        );

        let custom: Endpoint = "http://10.0.0.1:9000".parse().unwrap();
        assert_eq!(custom.as_str(), "http://10.0.0.1:9000/");
        assert!("not a url".parse::<Endpoint>().is_err());
    }

    #[test]
    fn defaults_to_testnet() {
        let settings: ConfigSettings = toml::from_str("").unwrap();
        assert_eq!(settings, ConfigSettings::default());
        assert_eq!(settings.endpoint, Endpoint::Testnet);
        assert!(settings.package.is_none());
    }

    #[test]
    fn toml_round_trip() {
        let mut settings = ConfigSettings::default();
        settings.set(ConfigOption::Endpoint {
            endpoint: "http://127.0.0.1:9123".parse().unwrap(),
        });
        settings.set(ConfigOption::Package {
            package: "0x2".parse().unwrap(),
        });
        settings.set(ConfigOption::Keystore {
            path: "/tmp/ajo-keys.json".into(),
        });

        let contents = toml::to_string_pretty(&settings).unwrap();
        assert!(contents.contains("0x0000"));
        assert_eq!(
            toml::from_str::<ConfigSettings>(&contents).unwrap(),
            settings
        );
        assert_eq!(
            settings.keystore_path().unwrap(),
            PathBuf::from("/tmp/ajo-keys.json")
        );
    }
}
