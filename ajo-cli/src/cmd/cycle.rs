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

//! Command `cycle`.

use crate::app::App;
use ajo_client::{ContributionStatus, CycleReport};
use ajo_primitives::ObjectId;
use anyhow::Result;
use clap::Parser;
use colored::Colorize;

/// Run a full cycle: collect every contribution, pay out and open the
/// next cycle.
#[derive(Clone, Debug, Parser)]
pub struct Cycle {
    /// Object id of the group.
    pub group: ObjectId,

    /// Alias of the admin.
    #[arg(short, long)]
    pub admin: String,

    /// Aliases of the contributing participants, charged in order.
    #[arg(required = true)]
    pub participants: Vec<String>,
}

impl Cycle {
    pub async fn exec(&self, app: &App) -> Result<()> {
        let report = app
            .manager()?
            .run_full_cycle(&self.admin, self.group, self.participants.as_slice())
            .await?;

        print_report(&report);

        Ok(())
    }
}

fn print_report(report: &CycleReport) {
    println!("{} {}", "Group:".bold(), report.group);
    println!("{} {}", "Cycle:".bold(), report.cycle);

    for contribution in &report.contributions {
        match contribution.status {
            ContributionStatus::Contributed(digest) => {
                println!("  {:<16} {digest}", contribution.alias)
            }
            ContributionStatus::AlreadyContributed => println!(
                "  {:<16} {}",
                contribution.alias,
                "already contributed".dimmed()
            ),
        }
    }

    println!("{} {}", "Payout:".bold(), report.payout_digest);
    match report.next_cycle_digest {
        Some(digest) => println!("{} {digest}", "Next cycle:".bold()),
        None => println!("{}", "Series complete".green()),
    }
}
