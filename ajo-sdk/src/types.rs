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

//! Node response types.

use ajo_primitives::{Digest, ObjectId};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::tx::ObjectRef;

/// Deserialize `u64` from a JSON number or a decimal string.
///
/// The node renders every 64-bit value as a string.
pub(crate) fn u64_from_str_or_num<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Num(u64),
        Str(String),
    }

    match Repr::deserialize(deserializer)? {
        Repr::Num(n) => Ok(n),
        Repr::Str(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

/// A SUI coin owned by an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
    pub coin_object_id: ObjectId,
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub version: u64,
    pub digest: Digest,
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub balance: u64,
}

impl Coin {
    /// Reference used for gas payment.
    pub fn object_ref(&self) -> ObjectRef {
        (self.coin_object_id, self.version, self.digest)
    }
}

/// Page of `suix_getCoins`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinPage {
    pub data: Vec<Coin>,
    #[serde(default)]
    pub has_next_page: bool,
}

/// Object as returned by `sui_getObject` with owner and content shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectData {
    pub object_id: ObjectId,
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub version: u64,
    pub digest: Digest,
    #[serde(default)]
    pub owner: Option<Value>,
    #[serde(default)]
    pub content: Option<Value>,
}

impl ObjectData {
    /// Initial shared version when owned as `{"Shared": {..}}`.
    pub fn initial_shared_version(&self) -> Option<u64> {
        let version = self
            .owner
            .as_ref()?
            .get("Shared")?
            .get("initial_shared_version")?;

        match version {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

/// Envelope of `sui_getObject`.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectResponse {
    #[serde(default)]
    pub data: Option<ObjectData>,
    #[serde(default)]
    pub error: Option<Value>,
}

/// Result of `suix_getBalance`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub coin_type: String,
    #[serde(deserialize_with = "u64_from_str_or_num")]
    pub total_balance: u64,
}

/// Execution status inside transaction effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionStatus {
    /// Successful execution.
    pub fn success() -> Self {
        Self {
            status: "success".into(),
            error: None,
        }
    }

    /// Failed execution with the node's message.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            status: "failure".into(),
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEffects {
    #[serde(default)]
    pub status: Option<ExecutionStatus>,
}

/// One entry of the `objectChanges` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectChange {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub object_id: Option<ObjectId>,
    #[serde(default)]
    pub object_type: Option<String>,
}

impl ObjectChange {
    pub fn is_created(&self) -> bool {
        self.kind == "created"
    }
}

/// Raw response of `sui_executeTransactionBlock`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResponse {
    pub digest: Digest,
    #[serde(default)]
    pub effects: Option<TransactionEffects>,
    #[serde(default)]
    pub object_changes: Option<Vec<ObjectChange>>,
}

/// Object created by a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedObject {
    pub object_id: ObjectId,
    pub object_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// Effects report success.
    Success,
    /// The node returned no status; the transaction may or may not apply.
    Unconfirmed,
}

/// Interpreted result of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionOutcome {
    pub digest: Digest,
    pub status: OutcomeStatus,
    pub created: Vec<CreatedObject>,
}

impl TransactionOutcome {
    /// Whether effects confirmed success.
    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }

    /// Identifier of the first created object.
    pub fn first_created(&self) -> Option<ObjectId> {
        self.created.first().map(|created| created.object_id)
    }
}
