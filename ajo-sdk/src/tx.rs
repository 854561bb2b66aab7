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

//! Programmable transactions in their BCS wire form.

use crate::result::Result;
use ajo_primitives::{Address, Digest, ObjectId, utils};
use ajo_ring::Keypair;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

/// Intent prefix of user transactions: scope, version, app id.
const TRANSACTION_INTENT: [u8; 3] = [0, 0, 0];

/// Salt of transaction digests.
const TRANSACTION_DIGEST_SALT: &[u8] = b"TransactionData::";

/// `(id, version, digest)` of an owned object.
pub type ObjectRef = (ObjectId, u64, Digest);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionData {
    V1(TransactionDataV1),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDataV1 {
    pub kind: TransactionKind,
    pub sender: Address,
    pub gas_data: GasData,
    pub expiration: TransactionExpiration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    ProgrammableTransaction(ProgrammableTransaction),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgrammableTransaction {
    pub inputs: Vec<CallArg>,
    pub commands: Vec<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasData {
    pub payment: Vec<ObjectRef>,
    pub owner: Address,
    pub price: u64,
    pub budget: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionExpiration {
    None,
    Epoch(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallArg {
    /// BCS bytes of a pure value.
    Pure(Vec<u8>),
    Object(ObjectArg),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectArg {
    ImmOrOwnedObject(ObjectRef),
    SharedObject {
        id: ObjectId,
        initial_shared_version: u64,
        mutable: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    MoveCall(Box<ProgrammableMoveCall>),
    TransferObjects(Vec<Argument>, Argument),
    SplitCoins(Argument, Vec<Argument>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Argument {
    GasCoin,
    Input(u16),
    Result(u16),
    NestedResult(u16, u16),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgrammableMoveCall {
    pub package: ObjectId,
    pub module: String,
    pub function: String,
    pub type_arguments: Vec<TypeTag>,
    pub arguments: Vec<Argument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeTag {
    Bool,
    U8,
    U64,
    U128,
    Address,
    Signer,
    Vector(Box<TypeTag>),
}

impl TransactionData {
    pub fn v1(&self) -> &TransactionDataV1 {
        match self {
            Self::V1(data) => data,
        }
    }

    pub fn sender(&self) -> Address {
        self.v1().sender
    }

    pub fn programmable(&self) -> &ProgrammableTransaction {
        match &self.v1().kind {
            TransactionKind::ProgrammableTransaction(pt) => pt,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bcs::to_bytes(self).map_err(Into::into)
    }

    /// Digest the node assigns to this transaction.
    pub fn digest(&self) -> Result<Digest> {
        let bytes = self.to_bytes()?;
        Ok(Digest::new(utils::hash_of_array([
            TRANSACTION_DIGEST_SALT,
            bytes.as_slice(),
        ])))
    }

    /// Sign with `keypair`, producing the base64 payloads the node expects.
    pub fn sign(&self, keypair: &Keypair) -> Result<SignedTransaction> {
        let bytes = self.to_bytes()?;
        let signature = keypair.sign_serialized(&signing_digest(&bytes));

        Ok(SignedTransaction {
            tx_bytes: STANDARD.encode(&bytes),
            signature: STANDARD.encode(signature),
        })
    }
}

/// Message actually signed: BLAKE2b-256 of `intent || bcs(tx)`.
pub fn signing_digest(tx_bytes: &[u8]) -> [u8; 32] {
    utils::hash_of_array([TRANSACTION_INTENT.as_slice(), tx_bytes])
}

/// Signed transaction ready for `sui_executeTransactionBlock`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub tx_bytes: String,
    pub signature: String,
}

/// Collects inputs and commands of a programmable transaction.
#[derive(Debug, Default)]
pub struct TransactionBuilder {
    inputs: Vec<CallArg>,
    commands: Vec<Command>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pure input.
    pub fn pure<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<Argument> {
        Ok(self.input(CallArg::Pure(bcs::to_bytes(value)?)))
    }

    /// Add an object input.
    pub fn object(&mut self, arg: ObjectArg) -> Argument {
        self.input(CallArg::Object(arg))
    }

    /// Add a shared object input.
    pub fn shared_object(
        &mut self,
        id: ObjectId,
        initial_shared_version: u64,
        mutable: bool,
    ) -> Argument {
        self.object(ObjectArg::SharedObject {
            id,
            initial_shared_version,
            mutable,
        })
    }

    /// Split a coin of `amount` off the gas coin.
    pub fn split_gas(&mut self, amount: u64) -> Result<Argument> {
        let amount = self.pure(&amount)?;
        let index = self.command(Command::SplitCoins(Argument::GasCoin, vec![amount]));
        Ok(Argument::NestedResult(index, 0))
    }

    /// Call `package::module::function` with `arguments`.
    pub fn move_call(
        &mut self,
        package: ObjectId,
        module: &str,
        function: &str,
        arguments: Vec<Argument>,
    ) -> Argument {
        let index = self.command(Command::MoveCall(Box::new(ProgrammableMoveCall {
            package,
            module: module.into(),
            function: function.into(),
            type_arguments: vec![],
            arguments,
        })));

        Argument::Result(index)
    }

    pub fn finish(self, sender: Address, gas_data: GasData) -> TransactionData {
        TransactionData::V1(TransactionDataV1 {
            kind: TransactionKind::ProgrammableTransaction(ProgrammableTransaction {
                inputs: self.inputs,
                commands: self.commands,
            }),
            sender,
            gas_data,
            expiration: TransactionExpiration::None,
        })
    }

    fn input(&mut self, arg: CallArg) -> Argument {
        self.inputs.push(arg);
        Argument::Input(self.inputs.len() as u16 - 1)
    }

    fn command(&mut self, command: Command) -> u16 {
        self.commands.push(command);
        self.commands.len() as u16 - 1
    }
}
