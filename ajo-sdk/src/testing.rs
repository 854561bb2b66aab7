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

//! In-memory chain for tests.
//!
//! [`MockTransport`] decodes every submitted transaction, checks its
//! signature against the sender and records the Move call it carries.
//! Replies are scripted per entry point and optionally per sender; calls
//! without a script succeed.

use crate::{
    result::{Error, Result},
    transport::Transport,
    tx::{self, Argument, CallArg, Command, ObjectArg, TransactionData},
    types::{Coin, ExecutionResponse, ExecutionStatus, ObjectChange, ObjectData, TransactionEffects},
};
use ajo_primitives::{Address, Digest, ObjectId, utils};
use ajo_ring::Keypair;
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::collections::HashMap;

/// Reference gas price reported by the mock.
pub const MOCK_GAS_PRICE: u64 = 1_000;

/// Scripted reply to an executed transaction.
#[derive(Debug, Clone, Default)]
pub struct Reply {
    status: Option<ExecutionStatus>,
    created: Vec<ObjectChange>,
    set_active: Option<(ObjectId, bool)>,
}

impl Reply {
    pub fn success() -> Self {
        Self {
            status: Some(ExecutionStatus::success()),
            ..Default::default()
        }
    }

    /// Move abort carrying `code`, in the node's message format.
    pub fn abort(code: u64) -> Self {
        Self::failure(format!(
            "MoveAbort(MoveLocation {{ module: codeforge, function: 0 }}, abort_code {code} in command 1)"
        ))
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: Some(ExecutionStatus::failure(message)),
            ..Default::default()
        }
    }

    /// No effects status at all.
    pub fn unconfirmed() -> Self {
        Self::default()
    }

    /// Report `id` as created.
    pub fn creating(mut self, id: ObjectId) -> Self {
        self.created.push(ObjectChange {
            kind: "created".into(),
            object_id: Some(id),
            object_type: Some("codeforge::SavingsGroup".into()),
        });
        self
    }

    /// Flip the `is_active` field of a stored group when executed.
    pub fn setting_active(mut self, group: ObjectId, active: bool) -> Self {
        self.set_active = Some((group, active));
        self
    }
}

/// A transaction the mock executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedCall {
    pub digest: Digest,
    pub sender: Address,
    pub package: ObjectId,
    pub module: String,
    pub function: String,
    /// First mutable shared object argument.
    pub group: Option<ObjectId>,
    /// Amount split off the gas coin.
    pub payment: Option<u64>,
    pub gas_budget: u64,
    /// BCS bytes of every pure input, in order.
    pub pure_inputs: Vec<Vec<u8>>,
}

#[derive(Default)]
struct State {
    objects: HashMap<ObjectId, ObjectData>,
    balances: HashMap<Address, u64>,
    replies: HashMap<(String, Option<Address>), Reply>,
    calls: Vec<ExecutedCall>,
}

/// In-memory [`Transport`].
#[derive(Default)]
pub struct MockTransport {
    state: Mutex<State>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the SUI balance of `owner`; a funded owner holds one gas coin.
    pub fn fund(&self, owner: Address, mist: u64) {
        self.state.lock().balances.insert(owner, mist);
    }

    pub fn insert_object(&self, data: ObjectData) {
        self.state.lock().objects.insert(data.object_id, data);
    }

    /// Store a shared savings group object with the given Move fields.
    pub fn insert_group(&self, id: ObjectId, fields: Value) {
        self.insert_object(ObjectData {
            object_id: id,
            version: 1,
            digest: Digest::of(&id.into_bytes()),
            owner: Some(json!({ "Shared": { "initial_shared_version": 1 } })),
            content: Some(json!({
                "dataType": "moveObject",
                "type": "codeforge::SavingsGroup",
                "fields": fields,
            })),
        });
    }

    /// Reply to every call of `function`.
    pub fn reply(&self, function: &str, reply: Reply) {
        self.state
            .lock()
            .replies
            .insert((function.into(), None), reply);
    }

    /// Reply to calls of `function` sent by `sender`; takes precedence
    /// over [`MockTransport::reply`].
    pub fn reply_for(&self, function: &str, sender: Address, reply: Reply) {
        self.state
            .lock()
            .replies
            .insert((function.into(), Some(sender)), reply);
    }

    /// Every executed call, in order.
    pub fn calls(&self) -> Vec<ExecutedCall> {
        self.state.lock().calls.clone()
    }

    /// Number of executed calls of `function`.
    pub fn calls_to(&self, function: &str) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|call| call.function == function)
            .count()
    }

    /// Number of executed calls of `function` sent by `sender`.
    pub fn calls_from(&self, function: &str, sender: Address) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|call| call.function == function && call.sender == sender)
            .count()
    }

    fn gas_coin(owner: Address, balance: u64) -> Coin {
        Coin {
            coin_object_id: ObjectId::new(utils::hash_of_array([
                b"gas".as_slice(),
                owner.into_bytes().as_slice(),
            ])),
            version: 1,
            digest: Digest::of(&owner.into_bytes()),
            balance,
        }
    }

    fn decode(tx: &TransactionData) -> Result<ExecutedCall> {
        let pt = tx.programmable();
        let malformed = |reason: &str| Error::MalformedObjectData(reason.into());

        let call = pt
            .commands
            .iter()
            .find_map(|command| match command {
                Command::MoveCall(call) => Some(call),
                _ => None,
            })
            .ok_or_else(|| malformed("transaction carries no move call"))?;

        let input = |argument: &Argument| match argument {
            Argument::Input(index) => pt.inputs.get(*index as usize),
            _ => None,
        };

        let group = call.arguments.iter().find_map(|argument| match input(argument) {
            Some(CallArg::Object(ObjectArg::SharedObject {
                id, mutable: true, ..
            })) => Some(*id),
            _ => None,
        });

        let payment = pt
            .commands
            .iter()
            .find_map(|command| match command {
                Command::SplitCoins(Argument::GasCoin, amounts) => amounts.first(),
                _ => None,
            })
            .and_then(input)
            .map(|arg| match arg {
                CallArg::Pure(bytes) => bcs::from_bytes::<u64>(bytes).map_err(Error::from),
                _ => Err(malformed("split amount is not pure")),
            })
            .transpose()?;

        let pure_inputs = pt
            .inputs
            .iter()
            .filter_map(|arg| match arg {
                CallArg::Pure(bytes) => Some(bytes.clone()),
                _ => None,
            })
            .collect();

        Ok(ExecutedCall {
            digest: tx.digest()?,
            sender: tx.sender(),
            package: call.package,
            module: call.module.clone(),
            function: call.function.clone(),
            group,
            payment,
            gas_budget: tx.v1().gas_data.budget,
            pure_inputs,
        })
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn reference_gas_price(&self) -> Result<u64> {
        Ok(MOCK_GAS_PRICE)
    }

    async fn coins(&self, owner: Address) -> Result<Vec<Coin>> {
        Ok(self
            .state
            .lock()
            .balances
            .get(&owner)
            .filter(|balance| **balance > 0)
            .map(|balance| vec![Self::gas_coin(owner, *balance)])
            .unwrap_or_default())
    }

    async fn object(&self, id: ObjectId) -> Result<Option<ObjectData>> {
        Ok(self.state.lock().objects.get(&id).cloned())
    }

    async fn balance(&self, owner: Address) -> Result<Option<u64>> {
        Ok(self.state.lock().balances.get(&owner).copied())
    }

    async fn execute(
        &self,
        tx_bytes: String,
        signatures: Vec<String>,
    ) -> Result<ExecutionResponse> {
        let bytes = STANDARD.decode(tx_bytes)?;
        let tx: TransactionData = bcs::from_bytes(&bytes)?;

        let signature = signatures
            .first()
            .ok_or_else(|| ajo_ring::Error::InvalidKey("missing signature".into()))?;
        let signature = STANDARD.decode(signature)?;
        let signer = Keypair::verify_serialized(&tx::signing_digest(&bytes), &signature)?;
        if signer != tx.sender() {
            return Err(ajo_ring::Error::InvalidKey(format!(
                "signed by {signer}, sent by {}",
                tx.sender()
            ))
            .into());
        }

        let call = Self::decode(&tx)?;

        let mut state = self.state.lock();
        let reply = state
            .replies
            .get(&(call.function.clone(), Some(call.sender)))
            .or_else(|| state.replies.get(&(call.function.clone(), None)))
            .cloned()
            .unwrap_or_else(Reply::success);

        if let Some((group, active)) = reply.set_active {
            if let Some(fields) = state
                .objects
                .get_mut(&group)
                .and_then(|data| data.content.as_mut())
                .and_then(|content| content.get_mut("fields"))
                .and_then(Value::as_object_mut)
            {
                fields.insert("is_active".into(), Value::Bool(active));
            }
        }

        let digest = call.digest;
        state.calls.push(call);

        Ok(ExecutionResponse {
            digest,
            effects: reply
                .status
                .map(|status| TransactionEffects { status: Some(status) }),
            object_changes: Some(reply.created),
        })
    }
}
