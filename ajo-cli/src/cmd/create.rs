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

//! Command `create`.

use crate::app::App;
use anyhow::{Context, Result};
use clap::Parser;
use std::str::FromStr;

/// Group member with its payout position.
///
/// Written as `<address or alias>:<position>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub account: String,
    pub position: u8,
}

impl FromStr for Member {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (account, position) = s
            .rsplit_once(':')
            .context("expected `<address or alias>:<position>`")?;

        if account.is_empty() {
            anyhow::bail!("member account is empty");
        }

        Ok(Self {
            account: account.into(),
            position: position
                .parse()
                .with_context(|| format!("invalid position `{position}`"))?,
        })
    }
}

/// Create a savings group.
#[derive(Clone, Debug, Parser)]
pub struct Create {
    /// Group name.
    #[arg(short, long)]
    pub name: String,

    /// Alias of the admin signing the transaction.
    #[arg(short, long)]
    pub admin: String,

    /// Length of one cycle, in days.
    #[arg(short = 'd', long, default_value = "7")]
    pub cycle_days: u64,

    /// Index of the first cycle.
    #[arg(short, long, default_value = "0")]
    pub start_cycle: u64,

    /// Per-cycle contribution, in SUI.
    #[arg(short, long)]
    pub contribution: f64,

    /// Members as `<address or alias>:<position>`.
    #[arg(short, long = "member", required = true)]
    pub members: Vec<Member>,
}

impl Create {
    pub async fn exec(&self, app: &App) -> Result<()> {
        let mut participants = Vec::with_capacity(self.members.len());
        let mut positions = Vec::with_capacity(self.members.len());
        for member in &self.members {
            participants.push(app.resolve_address(&member.account)?);
            positions.push(member.position);
        }

        let group = app
            .manager()?
            .create_group_with_validation(
                &self.admin,
                &self.name,
                self.cycle_days,
                self.start_cycle,
                self.contribution,
                participants,
                positions,
            )
            .await?;

        println!("Group created: {group}");

        Ok(())
    }
}
