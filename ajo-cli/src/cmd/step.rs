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

//! Single-step group commands.

use crate::app::App;
use ajo_primitives::{ObjectId, parse_sui};
use ajo_sdk::{OutcomeStatus, TransactionOutcome};
use anyhow::Result;
use clap::Parser;
use colored::Colorize;

/// Contribute to the current cycle of a group.
#[derive(Clone, Debug, Parser)]
pub struct Contribute {
    /// Object id of the group.
    pub group: ObjectId,

    /// Alias of the contributing participant.
    #[arg(short, long)]
    pub signer: String,

    /// Payment in SUI, the group's contribution amount by default.
    #[arg(short, long, value_parser = parse_sui)]
    pub amount: Option<u64>,

    /// Gas budget in MIST.
    #[arg(short, long)]
    pub gas_budget: Option<u64>,
}

impl Contribute {
    pub async fn exec(&self, app: &App) -> Result<()> {
        let client = app.client()?;
        let payment = match self.amount {
            Some(amount) => amount,
            None => client.get_group_info(self.group).await?.contribution_amount,
        };

        let outcome = client
            .contribute(&self.signer, self.group, payment, self.gas_budget)
            .await?;
        print_outcome("Contributed", &outcome);

        Ok(())
    }
}

/// Pay the pooled contributions out to the participant whose turn it is.
#[derive(Clone, Debug, Parser)]
pub struct Payout {
    /// Object id of the group.
    pub group: ObjectId,

    /// Alias of the signer.
    #[arg(short, long)]
    pub signer: String,

    /// Gas budget in MIST.
    #[arg(short, long)]
    pub gas_budget: Option<u64>,
}

impl Payout {
    pub async fn exec(&self, app: &App) -> Result<()> {
        let outcome = app
            .client()?
            .process_payout(&self.signer, self.group, self.gas_budget)
            .await?;
        print_outcome("Paid out", &outcome);

        Ok(())
    }
}

/// Open the next cycle of a group.
#[derive(Clone, Debug, Parser)]
pub struct NextCycle {
    /// Object id of the group.
    pub group: ObjectId,

    /// Alias of the signer.
    #[arg(short, long)]
    pub signer: String,

    /// Gas budget in MIST.
    #[arg(short, long)]
    pub gas_budget: Option<u64>,
}

impl NextCycle {
    pub async fn exec(&self, app: &App) -> Result<()> {
        let outcome = app
            .client()?
            .start_new_cycle(&self.signer, self.group, self.gas_budget)
            .await?;
        print_outcome("Started next cycle", &outcome);

        Ok(())
    }
}

fn print_outcome(action: &str, outcome: &TransactionOutcome) {
    match outcome.status {
        OutcomeStatus::Success => println!("{action}: {}", outcome.digest),
        OutcomeStatus::Unconfirmed => println!(
            "{action}: {} {}",
            outcome.digest,
            "(unconfirmed)".yellow()
        ),
    }
}
