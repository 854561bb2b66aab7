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

use ajo_primitives::{Address, ObjectId};
use ajo_ring::{Keypair, Keyring};
use ajo_sdk::{
    AbortKind, Error, GroupCreationRequest, OutcomeStatus, SavingsGroupClient, Transport,
    ValidationError, gas,
    testing::{MockTransport, Reply},
};
use anyhow::Result;
use serde_json::json;
use std::sync::Arc;

const PACKAGE: ObjectId = ObjectId::new([0xaa; 32]);
const GROUP: ObjectId = ObjectId::new([0x99; 32]);

fn client() -> (SavingsGroupClient<MockTransport>, Address) {
    let keyring = Arc::new(Keyring::new());
    let admin = keyring.register("admin", Keypair::from_seed([1; 32])).address();

    let transport = MockTransport::new();
    transport.fund(admin, 5_000_000_000);
    transport.insert_group(
        GROUP,
        json!({
            "name": "Ajo",
            "contribution_amount": "1000000000",
            "is_active": true,
        }),
    );

    (SavingsGroupClient::new(transport, keyring, PACKAGE), admin)
}

fn request(participants: Vec<Address>) -> GroupCreationRequest {
    GroupCreationRequest {
        name: "Ajo".into(),
        cycle_duration_days: 30,
        start_cycle: 0,
        contribution_amount: 1_000_000_000,
        positions: (1..=participants.len() as u8).collect(),
        participants,
    }
}

#[tokio::test]
async fn create_encodes_move_arguments() -> Result<()> {
    let (client, admin) = client();
    let group = ObjectId::new([0x42; 32]);
    client
        .transport()
        .reply("create_savings_group", Reply::success().creating(group));

    let participants = vec![admin, Address::new([2; 32])];
    let outcome = client
        .create_savings_group("admin", &request(participants.clone()), None)
        .await?;

    assert_eq!(outcome.status, OutcomeStatus::Success);
    assert_eq!(outcome.first_created(), Some(group));

    let calls = client.transport().calls();
    assert_eq!(calls.len(), 1);

    let call = &calls[0];
    assert_eq!(call.digest, outcome.digest);
    assert_eq!(call.package, PACKAGE);
    assert_eq!(call.module, "codeforge");
    assert_eq!(call.function, "create_savings_group");
    assert_eq!(call.sender, admin);
    assert_eq!(call.gas_budget, gas::CREATE_SAVINGS_GROUP);
    assert_eq!(call.group, None);
    assert_eq!(
        call.pure_inputs,
        [
            bcs::to_bytes("Ajo")?,
            bcs::to_bytes(&30u64)?,
            bcs::to_bytes(&0u64)?,
            bcs::to_bytes(&1_000_000_000u64)?,
            bcs::to_bytes(&participants)?,
            bcs::to_bytes(&vec![1u8, 2])?,
        ]
    );
    Ok(())
}

#[tokio::test]
async fn invalid_request_never_reaches_the_chain() {
    let (client, admin) = client();
    let mut req = request(vec![admin, admin]);
    req.positions = vec![2, 2];

    let err = client
        .create_savings_group("admin", &req, None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Validation(ValidationError::DuplicatePosition(2))
    ));
    assert!(client.transport().calls().is_empty());
}

#[tokio::test]
async fn contribute_splits_payment_from_gas() -> Result<()> {
    let (client, admin) = client();

    client.contribute("admin", GROUP, 1_000_000_000, None).await?;
    client.contribute("admin", GROUP, 5, 7_000_000).await?;

    let calls = client.transport().calls();
    assert_eq!(calls[0].function, "contribute");
    assert_eq!(calls[0].group, Some(GROUP));
    assert_eq!(calls[0].payment, Some(1_000_000_000));
    assert_eq!(calls[0].gas_budget, gas::CONTRIBUTE);
    assert_eq!(calls[1].payment, Some(5));
    assert_eq!(calls[1].gas_budget, 7_000_000);
    assert_eq!(client.transport().calls_from("contribute", admin), 2);
    Ok(())
}

#[tokio::test]
async fn group_calls_use_default_budgets() -> Result<()> {
    let (client, _) = client();

    client.process_payout("admin", GROUP, None).await?;
    client.start_new_cycle("admin", GROUP, None).await?;

    let calls = client.transport().calls();
    assert_eq!(calls[0].function, "process_payout");
    assert_eq!(calls[0].gas_budget, gas::PROCESS_PAYOUT);
    assert_eq!(calls[0].payment, None);
    assert_eq!(calls[1].function, "start_new_cycle");
    assert_eq!(calls[1].gas_budget, gas::START_NEW_CYCLE);
    assert_eq!(calls[1].group, Some(GROUP));
    Ok(())
}

#[tokio::test]
async fn abort_is_classified() {
    let (client, _) = client();
    client.transport().reply("contribute", Reply::abort(6));

    let err = client
        .contribute("admin", GROUP, 1, None)
        .await
        .unwrap_err();

    assert!(err.is_already_contributed());
    assert!(err.to_string().starts_with("E_ALREADY_CONTRIBUTED: "));

    client
        .transport()
        .reply("process_payout", Reply::failure("InsufficientGas"));
    let err = client.process_payout("admin", GROUP, None).await.unwrap_err();
    assert_eq!(err.abort_kind(), Some(AbortKind::Unknown(None)));
}

#[tokio::test]
async fn missing_status_is_unconfirmed() -> Result<()> {
    let (client, _) = client();
    client
        .transport()
        .reply("start_new_cycle", Reply::unconfirmed());

    let outcome = client.start_new_cycle("admin", GROUP, None).await?;
    assert_eq!(outcome.status, OutcomeStatus::Unconfirmed);
    assert!(!outcome.is_success());
    Ok(())
}

#[tokio::test]
async fn unknown_alias_and_missing_gas() {
    let (client, _) = client();

    let err = client.process_payout("nobody", GROUP, None).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Keyring(ajo_ring::Error::UnknownAlias(ref alias)) if alias == "nobody"
    ));

    let broke = client
        .keyring()
        .register("broke", Keypair::from_seed([3; 32]))
        .address();
    let err = client.process_payout("broke", GROUP, None).await.unwrap_err();
    assert!(matches!(err, Error::NoGasCoins(address) if address == broke));
    assert!(client.transport().calls().is_empty());
}

#[tokio::test]
async fn reads() -> Result<()> {
    let (client, admin) = client();

    assert_eq!(client.get_balance(admin).await?, 5_000_000_000);
    assert_eq!(client.get_balance(Address::new([7; 32])).await?, 0);
    assert_eq!(client.transport().balance(Address::new([7; 32])).await?, None);
    assert_eq!(client.transport().balance_of(Address::new([7; 32])).await?, 0);
    assert_eq!(client.transport().balance_of(admin).await?, 5_000_000_000);
    assert_eq!(client.address_of("admin")?, admin);

    let snapshot = client.get_group_info(GROUP).await?;
    assert_eq!(snapshot.object_id, GROUP);
    assert_eq!(snapshot.contribution_amount, 1_000_000_000);
    assert!(snapshot.is_active);
    assert!(snapshot.participants.is_empty());

    let missing = ObjectId::new([1; 32]);
    assert!(matches!(
        client.get_group_info(missing).await,
        Err(Error::ObjectNotFound(id)) if id == missing
    ));
    Ok(())
}

#[tokio::test]
async fn owned_group_is_malformed() {
    let (client, _) = client();
    let mut data = client.transport().object(GROUP).await.unwrap().unwrap();
    data.owner = Some(json!({ "AddressOwner": Address::new([1; 32]) }));
    client.transport().insert_object(data);

    assert!(matches!(
        client.process_payout("admin", GROUP, None).await,
        Err(Error::MalformedObjectData(_))
    ));
}
