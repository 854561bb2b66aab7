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

//! Workflow notifications.

use ajo_primitives::ObjectId;
use async_trait::async_trait;

/// Something downstream consumers may want to fan out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupEvent {
    GroupCreated {
        group: ObjectId,
        name: String,
        participants: usize,
    },
    CycleAdvanced {
        group: ObjectId,
        /// Cycle index the completed run started in.
        cycle: u64,
        series_complete: bool,
    },
}

/// Receiver of [`GroupEvent`]s.
///
/// Delivery failures are the sink's own business.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn notify(&self, event: GroupEvent);
}

/// Sink writing events to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

#[async_trait]
impl EventSink for LogSink {
    async fn notify(&self, event: GroupEvent) {
        match event {
            GroupEvent::GroupCreated {
                group,
                name,
                participants,
            } => tracing::info!("Group {name:?} created at {group} with {participants} participants"),
            GroupEvent::CycleAdvanced {
                group,
                cycle,
                series_complete: true,
            } => tracing::info!("Group {group} paid out cycle {cycle}, series complete"),
            GroupEvent::CycleAdvanced { group, cycle, .. } => {
                tracing::info!("Group {group} paid out cycle {cycle}, next cycle started")
            }
        }
    }
}
