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

//! Savings group contract client.

use crate::{
    abort,
    group::{GroupCreationRequest, SavingsGroupSnapshot},
    result::{Error, Result},
    transport::Transport,
    tx::{Argument, GasData, TransactionBuilder},
    types::TransactionOutcome,
};
use ajo_primitives::{Address, ObjectId};
use ajo_ring::{Keyring, SigningIdentity};
use colored::Colorize;
use std::sync::Arc;

/// Move module of the savings group contract.
pub const MODULE: &str = "codeforge";

/// Initial shared version of the system clock.
const CLOCK_INITIAL_SHARED_VERSION: u64 = 1;

/// Most coins a transaction may spend on gas.
const MAX_GAS_PAYMENT_OBJECTS: usize = 256;

/// Default gas budgets per entry point.
pub mod gas {
    pub const CREATE_SAVINGS_GROUP: u64 = 10_000_000;
    pub const CONTRIBUTE: u64 = 5_000_000;
    pub const PROCESS_PAYOUT: u64 = 5_000_000;
    pub const START_NEW_CYCLE: u64 = 3_000_000;
}

/// Client of the `codeforge` savings group contract.
///
/// Stateless between calls; share it as `Arc<SavingsGroupClient<T>>`.
pub struct SavingsGroupClient<T> {
    transport: T,
    keyring: Arc<Keyring>,
    package: ObjectId,
}

impl<T: Transport> SavingsGroupClient<T> {
    pub fn new(transport: T, keyring: Arc<Keyring>, package: ObjectId) -> Self {
        Self {
            transport,
            keyring,
            package,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn keyring(&self) -> &Arc<Keyring> {
        &self.keyring
    }

    /// Package the contract is published at.
    pub fn package(&self) -> ObjectId {
        self.package
    }

    /// Address of the identity registered under `alias`.
    pub fn address_of(&self, alias: &str) -> Result<Address> {
        self.keyring.address_of(alias).map_err(Into::into)
    }

    /// Create a savings group.
    ///
    /// The request is validated before anything is sent.
    pub async fn create_savings_group(
        &self,
        signer: &str,
        request: &GroupCreationRequest,
        gas_budget: impl Into<Option<u64>>,
    ) -> Result<TransactionOutcome> {
        request.validate()?;
        let identity = self.keyring.resolve_signer(signer)?;

        let mut builder = TransactionBuilder::new();
        let arguments = vec![
            builder.pure(&request.name)?,
            builder.pure(&request.cycle_duration_days)?,
            builder.pure(&request.start_cycle)?,
            builder.pure(&request.contribution_amount)?,
            builder.pure(&request.participants)?,
            builder.pure(&request.positions)?,
            Self::clock(&mut builder),
        ];

        tracing::info!(
            "Creating savings group {:?} with {} participants",
            request.name,
            request.participants.len()
        );

        self.submit(
            &identity,
            builder,
            "create_savings_group",
            arguments,
            gas_budget.into().unwrap_or(gas::CREATE_SAVINGS_GROUP),
        )
        .await
    }

    /// Contribute `payment` MIST, split from the signer's gas coin.
    pub async fn contribute(
        &self,
        signer: &str,
        group: ObjectId,
        payment: u64,
        gas_budget: impl Into<Option<u64>>,
    ) -> Result<TransactionOutcome> {
        let identity = self.keyring.resolve_signer(signer)?;

        let mut builder = TransactionBuilder::new();
        let group_arg = self.group(&mut builder, group).await?;
        let coin = builder.split_gas(payment)?;
        let arguments = vec![group_arg, coin, Self::clock(&mut builder)];

        tracing::info!("{signer} contributes {payment} MIST to {group}");

        self.submit(
            &identity,
            builder,
            "contribute",
            arguments,
            gas_budget.into().unwrap_or(gas::CONTRIBUTE),
        )
        .await
    }

    /// Pay the pooled balance out to the current recipient.
    pub async fn process_payout(
        &self,
        signer: &str,
        group: ObjectId,
        gas_budget: impl Into<Option<u64>>,
    ) -> Result<TransactionOutcome> {
        self.group_call(
            signer,
            group,
            "process_payout",
            gas_budget.into().unwrap_or(gas::PROCESS_PAYOUT),
        )
        .await
    }

    /// Open the next cycle.
    pub async fn start_new_cycle(
        &self,
        signer: &str,
        group: ObjectId,
        gas_budget: impl Into<Option<u64>>,
    ) -> Result<TransactionOutcome> {
        self.group_call(
            signer,
            group,
            "start_new_cycle",
            gas_budget.into().unwrap_or(gas::START_NEW_CYCLE),
        )
        .await
    }

    /// Fetch a fresh snapshot of the group object.
    pub async fn get_group_info(&self, group: ObjectId) -> Result<SavingsGroupSnapshot> {
        let data = self
            .transport
            .object(group)
            .await?
            .ok_or(Error::ObjectNotFound(group))?;

        SavingsGroupSnapshot::from_object(group, &data)
    }

    /// SUI balance of `address` in MIST; accounts without a record have `0`.
    pub async fn get_balance(&self, address: Address) -> Result<u64> {
        self.transport.balance_of(address).await
    }

    async fn group_call(
        &self,
        signer: &str,
        group: ObjectId,
        function: &str,
        gas_budget: u64,
    ) -> Result<TransactionOutcome> {
        let identity = self.keyring.resolve_signer(signer)?;

        let mut builder = TransactionBuilder::new();
        let arguments = vec![
            self.group(&mut builder, group).await?,
            Self::clock(&mut builder),
        ];

        self.submit(&identity, builder, function, arguments, gas_budget)
            .await
    }

    /// Add the group as a mutable shared input.
    async fn group(&self, builder: &mut TransactionBuilder, group: ObjectId) -> Result<Argument> {
        let data = self
            .transport
            .object(group)
            .await?
            .ok_or(Error::ObjectNotFound(group))?;

        let version = data.initial_shared_version().ok_or_else(|| {
            Error::MalformedObjectData(format!("{group} is not a shared object"))
        })?;

        Ok(builder.shared_object(group, version, true))
    }

    fn clock(builder: &mut TransactionBuilder) -> Argument {
        builder.shared_object(ObjectId::CLOCK, CLOCK_INITIAL_SHARED_VERSION, false)
    }

    async fn submit(
        &self,
        identity: &SigningIdentity,
        mut builder: TransactionBuilder,
        function: &str,
        arguments: Vec<Argument>,
        budget: u64,
    ) -> Result<TransactionOutcome> {
        let sender = identity.address();
        builder.move_call(self.package, MODULE, function, arguments);

        let mut coins = self.transport.coins(sender).await?;
        if coins.is_empty() {
            return Err(Error::NoGasCoins(sender));
        }
        coins.truncate(MAX_GAS_PAYMENT_OBJECTS);

        let price = self.transport.reference_gas_price().await?;
        let tx = builder.finish(
            sender,
            GasData {
                payment: coins.iter().map(|coin| coin.object_ref()).collect(),
                owner: sender,
                price,
                budget,
            },
        );

        let signed = tx.sign(identity.keypair())?;
        let call = format!("{MODULE}::{function}").magenta().bold();
        tracing::info!("Pending {call} from {} ...", identity.alias());
        tracing::debug!("\tGas: price {price}, budget {budget}, {} coins", coins.len());

        let response = self
            .transport
            .execute(signed.tx_bytes, vec![signed.signature])
            .await?;

        let outcome = abort::interpret(&response)?;
        tracing::info!("\t{call}: {:?} ( digest: {} )", outcome.status, outcome.digest);

        Ok(outcome)
    }
}
