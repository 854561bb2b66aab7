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

//! Command `info`.

use crate::app::App;
use ajo_primitives::{ObjectId, mist_to_sui};
use ajo_sdk::SavingsGroupSnapshot;
use anyhow::Result;
use clap::Parser;
use colored::Colorize;

/// Print the state of a savings group.
#[derive(Clone, Debug, Parser)]
pub struct Info {
    /// Object id of the group.
    pub group: ObjectId,
}

impl Info {
    pub async fn exec(&self, app: &App) -> Result<()> {
        let snapshot = app.client()?.get_group_info(self.group).await?;
        print_snapshot(&snapshot);

        Ok(())
    }
}

fn print_snapshot(snapshot: &SavingsGroupSnapshot) {
    let status = if snapshot.is_active {
        "active".green()
    } else {
        "inactive".dimmed()
    };

    println!("{} {}", "Group:".bold(), snapshot.object_id);
    println!("{} {} ({status})", "Name:".bold(), snapshot.name);
    println!(
        "{} {} MIST ({} SUI) every {} days",
        "Contribution:".bold(),
        snapshot.contribution_amount,
        mist_to_sui(snapshot.contribution_amount),
        snapshot.cycle_duration_days
    );
    println!(
        "{} {} (started at {})",
        "Cycle:".bold(),
        snapshot.current_cycle,
        snapshot.cycle_start_time
    );
    println!(
        "{} {} MIST",
        "Pooled:".bold(),
        snapshot.current_balance
    );

    println!("{}", "Participants:".bold());
    for participant in &snapshot.participants {
        let mut flags = Vec::new();
        if participant.has_contributed {
            flags.push("contributed");
        }
        if participant.has_received_payout {
            flags.push("paid out");
        }

        println!(
            "  #{:<3} {} {}",
            participant.position,
            participant.address,
            flags.join(", ").dimmed()
        );
    }
}
