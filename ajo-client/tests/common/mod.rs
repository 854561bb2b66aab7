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

//! Shared fixtures for workflow tests.

#![allow(dead_code)]

use ajo_client::{EventSink, GroupEvent, SavingsGroupManager};
use ajo_primitives::{Address, ObjectId};
use ajo_ring::{Keypair, Keyring};
use ajo_sdk::{SavingsGroupClient, testing::MockTransport};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;

pub const PACKAGE: ObjectId = ObjectId::new([0xaa; 32]);
pub const GROUP: ObjectId = ObjectId::new([0x99; 32]);
pub const ONE_SUI: u64 = 1_000_000_000;

/// Sink keeping every event it receives.
#[derive(Default)]
pub struct RecordingSink(Mutex<Vec<GroupEvent>>);

impl RecordingSink {
    pub fn events(&self) -> Vec<GroupEvent> {
        self.0.lock().clone()
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn notify(&self, event: GroupEvent) {
        self.0.lock().push(event);
    }
}

pub struct Fixture {
    pub manager: SavingsGroupManager<MockTransport>,
    pub events: Arc<RecordingSink>,
    pub keyring: Arc<Keyring>,
}

impl Fixture {
    /// Admin plus `participants` funded members named `p1`, `p2`, ...
    pub fn new(participants: u8) -> Self {
        let keyring = Arc::new(Keyring::new());
        let transport = MockTransport::new();

        let admin = keyring.register("admin", Keypair::from_seed([0xad; 32]));
        transport.fund(admin.address(), 10 * ONE_SUI);

        for i in 1..=participants {
            let identity = keyring.register(format!("p{i}"), Keypair::from_seed([i; 32]));
            transport.fund(identity.address(), 10 * ONE_SUI);
        }

        let client = Arc::new(SavingsGroupClient::new(transport, keyring.clone(), PACKAGE));
        let events = Arc::new(RecordingSink::default());
        let manager = SavingsGroupManager::with_events(client, events.clone());

        Self {
            manager,
            events,
            keyring,
        }
    }

    pub fn mock(&self) -> &MockTransport {
        self.manager.client().transport()
    }

    pub fn address(&self, alias: &str) -> Address {
        self.keyring
            .address_of(alias)
            .expect("fixture alias is registered")
    }

    pub fn insert_group(&self, active: bool) {
        self.mock().insert_group(
            GROUP,
            json!({
                "name": "Ajo",
                "cycle_duration_days": "7",
                "contribution_amount": ONE_SUI.to_string(),
                "current_cycle": "3",
                "is_active": active,
            }),
        );
    }
}
