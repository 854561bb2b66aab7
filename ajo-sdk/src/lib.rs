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

//! Rust SDK for the Ajo savings group contract on Sui.
//!
//! [`SavingsGroupClient`] builds, signs and submits programmable
//! transactions for the four `codeforge` entry points and reads group
//! objects and balances. Every submitted transaction goes through
//! [`abort::interpret`], so contract aborts surface as
//! [`Error::Contract`] with a classified [`AbortKind`].
//!
//! ```ignore
//! use ajo_ring::Keyring;
//! use ajo_sdk::{RpcTransport, SavingsGroupClient};
//! use std::sync::Arc;
//!
//! let keyring = Arc::new(Keyring::new());
//! keyring.load_from_keystore_file("keystore.json")?;
//!
//! let transport = RpcTransport::new(RpcTransport::TESTNET_ENDPOINT)?;
//! let client = SavingsGroupClient::new(transport, keyring, package);
//!
//! let snapshot = client.get_group_info(group).await?;
//! client.contribute("alice", group, snapshot.contribution_amount, None).await?;
//! ```

pub use self::{
    abort::{AbortKind, ContractError},
    client::{MODULE, SavingsGroupClient, gas},
    group::{GroupCreationRequest, ParticipantInfo, SavingsGroupSnapshot, ValidationError},
    result::{Error, Result},
    rpc::{RpcTransport, SUI_COIN_TYPE},
    transport::Transport,
    types::{CreatedObject, ExecutionResponse, OutcomeStatus, TransactionOutcome},
};
pub use ajo_primitives;
pub use ajo_ring;

pub mod abort;
mod client;
mod group;
mod result;
mod rpc;
#[cfg(feature = "testing")]
pub mod testing;
mod transport;
pub mod tx;
pub mod types;
