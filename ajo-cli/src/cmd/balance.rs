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

//! Command `balance`.

use crate::app::App;
use ajo_primitives::mist_to_sui;
use ajo_sdk::Transport;
use anyhow::Result;
use clap::Parser;

/// Query the SUI balance of an account.
#[derive(Clone, Debug, Parser)]
pub struct Balance {
    /// Hex address or keystore alias.
    pub account: String,
}

impl Balance {
    pub async fn exec(&self, app: &App) -> Result<()> {
        let address = app.resolve_address(&self.account)?;
        let balance = app.transport()?.balance_of(address).await?;

        println!("Address: {address}");
        println!("Balance: {balance} MIST ({} SUI)", mist_to_sui(balance));

        Ok(())
    }
}
