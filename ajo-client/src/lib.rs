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

//! Savings group workflows for the Ajo contract.
//!
//! [`SavingsGroupManager`] drives the multi-step workflows on top of
//! [`ajo_sdk::SavingsGroupClient`]: validated group creation with a gas
//! reserve check, and a full contribution/payout cycle.
//!
//! ```ignore
//! use ajo_client::SavingsGroupManager;
//! use std::sync::Arc;
//!
//! let manager = SavingsGroupManager::new(Arc::new(client));
//! let group = manager
//!     .create_group_with_validation("admin", "Market", 7, 0, 1.5, members, vec![1, 2, 3])
//!     .await?;
//!
//! let report = manager
//!     .run_full_cycle("admin", group, &["alice", "bob", "carol"])
//!     .await?;
//! ```

pub use self::{
    error::{Error, Result},
    events::{EventSink, GroupEvent, LogSink},
    manager::{MIN_GAS_RESERVE_MIST, SavingsGroupManager},
    state::{Contribution, ContributionStatus, CycleReport, CycleState},
};
pub use ajo_sdk;

mod error;
mod events;
mod manager;
mod state;
