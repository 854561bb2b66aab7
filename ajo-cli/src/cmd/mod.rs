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

//! Commands

use crate::app::App;
use anyhow::Result;
use clap::Parser;

pub mod balance;
pub mod config;
pub mod create;
pub mod cycle;
pub mod info;
pub mod key;
pub mod step;

pub use self::{
    balance::Balance,
    config::Config,
    create::Create,
    cycle::Cycle,
    info::Info,
    key::Key,
    step::{Contribute, NextCycle, Payout},
};

/// All SubCommands of ajo.
#[derive(Debug, Clone, Parser)]
pub enum Command {
    Config(Config),
    #[clap(subcommand)]
    Key(Key),
    Balance(Balance),
    Info(Info),
    Create(Create),
    Cycle(Cycle),
    Contribute(Contribute),
    Payout(Payout),
    NextCycle(NextCycle),
}

impl Command {
    /// Execute the command.
    pub async fn exec(self, app: &mut App) -> Result<()> {
        match self {
            Command::Config(config) => config.exec(app)?,
            Command::Key(key) => key.exec(app)?,
            Command::Balance(balance) => balance.exec(app).await?,
            Command::Info(info) => info.exec(app).await?,
            Command::Create(create) => create.exec(app).await?,
            Command::Cycle(cycle) => cycle.exec(app).await?,
            Command::Contribute(contribute) => contribute.exec(app).await?,
            Command::Payout(payout) => payout.exec(app).await?,
            Command::NextCycle(next) => next.exec(app).await?,
        }

        Ok(())
    }
}
