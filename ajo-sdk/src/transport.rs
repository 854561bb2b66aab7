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

//! Network boundary of the chain client.

use crate::{
    result::Result,
    types::{Coin, ExecutionResponse, ObjectData},
};
use ajo_primitives::{Address, ObjectId};
use async_trait::async_trait;

/// Read and execute primitives the chain client is built on.
///
/// [`RpcTransport`](crate::RpcTransport) talks to a full node; the
/// `testing` feature ships an in-memory implementation.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Reference gas price of the current epoch.
    async fn reference_gas_price(&self) -> Result<u64>;

    /// SUI coins owned by `owner`, first page only.
    async fn coins(&self, owner: Address) -> Result<Vec<Coin>>;

    /// Object with owner and content, `None` if it does not exist.
    async fn object(&self, id: ObjectId) -> Result<Option<ObjectData>>;

    /// Total SUI balance of `owner`, `None` if the node has no record.
    async fn balance(&self, owner: Address) -> Result<Option<u64>>;

    /// Total SUI balance of `owner`; accounts without a record hold `0`.
    async fn balance_of(&self, owner: Address) -> Result<u64> {
        Ok(self.balance(owner).await?.unwrap_or(0))
    }

    /// Execute a signed transaction and wait for local execution.
    async fn execute(&self, tx_bytes: String, signatures: Vec<String>)
    -> Result<ExecutionResponse>;
}
