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

//! Savings group requests and on-chain snapshots.

use crate::{
    result::{Error, Result},
    types::ObjectData,
};
use ajo_primitives::{Address, ObjectId};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Malformed group creation input, caught before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("At least one participant is required")]
    NoParticipants,
    #[error("Got {participants} participants but {positions} positions")]
    LengthMismatch {
        participants: usize,
        positions: usize,
    },
    #[error("Position {position} is outside 1..={max}")]
    PositionOutOfRange { position: u8, max: usize },
    #[error("Position {0} is assigned twice")]
    DuplicatePosition(u8),
    #[error("{0} participants exceed the position range")]
    TooManyParticipants(usize),
    #[error("Cycle duration must be at least one day")]
    ZeroCycleDuration,
    #[error("Contribution amount must be positive")]
    NonPositiveContribution,
}

/// Arguments of `create_savings_group`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCreationRequest {
    pub name: String,
    pub cycle_duration_days: u64,
    pub start_cycle: u64,
    /// Per-cycle contribution in MIST.
    pub contribution_amount: u64,
    pub participants: Vec<Address>,
    /// Payout order, parallel to `participants`.
    pub positions: Vec<u8>,
}

impl GroupCreationRequest {
    /// Check that positions are a permutation of `1..=participants.len()`
    /// and the scalar arguments are in range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let count = self.participants.len();

        if count != self.positions.len() {
            return Err(ValidationError::LengthMismatch {
                participants: count,
                positions: self.positions.len(),
            });
        }

        if count == 0 {
            return Err(ValidationError::NoParticipants);
        }

        if count > u8::MAX as usize {
            return Err(ValidationError::TooManyParticipants(count));
        }

        let mut seen = HashSet::with_capacity(count);
        for &position in &self.positions {
            if position == 0 || position as usize > count {
                return Err(ValidationError::PositionOutOfRange {
                    position,
                    max: count,
                });
            }

            if !seen.insert(position) {
                return Err(ValidationError::DuplicatePosition(position));
            }
        }

        if self.cycle_duration_days == 0 {
            return Err(ValidationError::ZeroCycleDuration);
        }

        if self.contribution_amount == 0 {
            return Err(ValidationError::NonPositiveContribution);
        }

        Ok(())
    }
}

/// A participant as stored in the group object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantInfo {
    pub address: Address,
    pub position: u8,
    pub has_contributed: bool,
    pub has_received_payout: bool,
}

/// Read-only projection of a savings group object.
///
/// Built fresh on every query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavingsGroupSnapshot {
    pub object_id: ObjectId,
    pub name: String,
    pub cycle_duration_days: u64,
    /// Per-cycle contribution in MIST.
    pub contribution_amount: u64,
    pub current_cycle: u64,
    /// Pooled balance in MIST.
    pub current_balance: u64,
    pub is_active: bool,
    pub start_cycle: u64,
    pub created_at: u64,
    pub cycle_start_time: u64,
    pub participants: Vec<ParticipantInfo>,
}

impl SavingsGroupSnapshot {
    /// Parse the `content.fields` of a group object.
    ///
    /// Absent fields take their zero value; present fields of the wrong
    /// type are rejected.
    pub fn from_object(object_id: ObjectId, data: &ObjectData) -> Result<Self> {
        let fields = data
            .content
            .as_ref()
            .and_then(|content| content.get("fields"))
            .and_then(Value::as_object)
            .map(Fields)
            .ok_or_else(|| malformed("object has no content fields"))?;

        Ok(Self {
            object_id,
            name: fields.string("name")?,
            cycle_duration_days: fields.u64("cycle_duration_days")?,
            contribution_amount: fields.u64("contribution_amount")?,
            current_cycle: fields.u64("current_cycle")?,
            current_balance: fields.u64("current_savings_balance")?,
            is_active: fields.bool("is_active")?,
            start_cycle: fields.u64("start_cycle")?,
            created_at: fields.u64("created_at")?,
            cycle_start_time: fields.u64("cycle_start_time")?,
            participants: fields.participants()?,
        })
    }

    /// Participant at `address`, if any.
    pub fn participant(&self, address: Address) -> Option<&ParticipantInfo> {
        self.participants.iter().find(|p| p.address == address)
    }
}

fn malformed(reason: impl Into<String>) -> Error {
    Error::MalformedObjectData(reason.into())
}

/// Move structs render either flat or as `{"type": .., "fields": {..}}`.
fn struct_fields(value: &Value) -> Option<&Map<String, Value>> {
    let object = value.as_object()?;
    match object.get("fields") {
        Some(Value::Object(fields)) => Some(fields),
        _ => Some(object),
    }
}

struct Fields<'a>(&'a Map<String, Value>);

impl Fields<'_> {
    fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    fn u64(&self, key: &str) -> Result<u64> {
        match self.get(key) {
            None => Ok(0),
            Some(Value::Number(n)) => n
                .as_u64()
                .ok_or_else(|| malformed(format!("{key}: {n} is not a u64"))),
            Some(Value::String(s)) => s
                .parse()
                .map_err(|_| malformed(format!("{key}: {s:?} is not a u64"))),
            Some(other) => Err(malformed(format!("{key}: expected u64, got {other}"))),
        }
    }

    fn bool(&self, key: &str) -> Result<bool> {
        match self.get(key) {
            None => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(malformed(format!("{key}: expected bool, got {other}"))),
        }
    }

    fn string(&self, key: &str) -> Result<String> {
        match self.get(key) {
            None => Ok(String::new()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(malformed(format!("{key}: expected string, got {other}"))),
        }
    }

    fn address(&self, key: &str) -> Result<Option<Address>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => s
                .parse()
                .map(Some)
                .map_err(|_| malformed(format!("{key}: {s:?} is not an address"))),
            Some(other) => Err(malformed(format!("{key}: expected address, got {other}"))),
        }
    }

    fn participants(&self) -> Result<Vec<ParticipantInfo>> {
        let Some(value) = self.get("participants") else {
            return Ok(vec![]);
        };

        if let Value::Array(items) = value {
            return items
                .iter()
                .map(|item| Self::participant(item, None))
                .collect();
        }

        // VecMap<address, Participant>
        let entries = struct_fields(value)
            .and_then(|map| map.get("contents"))
            .and_then(Value::as_array)
            .ok_or_else(|| malformed("participants: expected vector or VecMap"))?;

        entries
            .iter()
            .map(|entry| {
                let entry = Fields(
                    struct_fields(entry).ok_or_else(|| malformed("participants: bad entry"))?,
                );
                let key = entry.address("key")?;
                let value = entry
                    .get("value")
                    .ok_or_else(|| malformed("participants: entry without value"))?;

                Self::participant(value, key)
            })
            .collect()
    }

    fn participant(value: &Value, key: Option<Address>) -> Result<ParticipantInfo> {
        let fields = Fields(
            struct_fields(value).ok_or_else(|| malformed("participant: expected struct"))?,
        );

        let address = match fields.address("address")? {
            Some(address) => address,
            None => fields
                .address("wallet")?
                .or(key)
                .ok_or_else(|| malformed("participant: missing address"))?,
        };

        let position = fields.u64("position")?;
        let position = u8::try_from(position)
            .map_err(|_| malformed(format!("participant: position {position} exceeds u8")))?;

        Ok(ParticipantInfo {
            address,
            position,
            has_contributed: fields.bool("has_contributed")?,
            has_received_payout: fields.bool("has_received_payout")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ajo_primitives::Digest;
    use proptest::{prelude::*, sample::subsequence};
    use serde_json::json;

    fn request(positions: Vec<u8>) -> GroupCreationRequest {
        GroupCreationRequest {
            name: "Market women".into(),
            cycle_duration_days: 7,
            start_cycle: 0,
            contribution_amount: 1_000_000_000,
            participants: (1..=positions.len() as u8)
                .map(|i| Address::new([i; 32]))
                .collect(),
            positions,
        }
    }

    fn object(content: Value) -> ObjectData {
        ObjectData {
            object_id: ObjectId::new([1; 32]),
            version: 4,
            digest: Digest::of(b"group"),
            owner: None,
            content: Some(content),
        }
    }

    #[test]
    fn accepts_permutations() {
        assert_eq!(request(vec![1]).validate(), Ok(()));
        assert_eq!(request(vec![2, 3, 1]).validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_positions() {
        assert_eq!(
            request(vec![1, 1]).validate(),
            Err(ValidationError::DuplicatePosition(1))
        );
        assert_eq!(
            request(vec![0, 1]).validate(),
            Err(ValidationError::PositionOutOfRange { position: 0, max: 2 })
        );
        assert_eq!(
            request(vec![1, 3]).validate(),
            Err(ValidationError::PositionOutOfRange { position: 3, max: 2 })
        );
        assert_eq!(request(vec![]).validate(), Err(ValidationError::NoParticipants));

        let mut mismatch = request(vec![1, 2]);
        mismatch.positions.pop();
        assert_eq!(
            mismatch.validate(),
            Err(ValidationError::LengthMismatch {
                participants: 2,
                positions: 1
            })
        );
    }

    #[test]
    fn rejects_bad_scalars() {
        let mut req = request(vec![1]);
        req.cycle_duration_days = 0;
        assert_eq!(req.validate(), Err(ValidationError::ZeroCycleDuration));

        let mut req = request(vec![1]);
        req.contribution_amount = 0;
        assert_eq!(req.validate(), Err(ValidationError::NonPositiveContribution));
    }

    #[test]
    fn rejects_oversized_groups() {
        let req = GroupCreationRequest {
            participants: vec![Address::zero(); 256],
            positions: vec![1; 256],
            ..request(vec![1])
        };
        assert_eq!(req.validate(), Err(ValidationError::TooManyParticipants(256)));
    }

    #[test]
    fn parses_vector_participants() {
        let alice = Address::new([0xa; 32]);
        let bob = Address::new([0xb; 32]);
        let data = object(json!({
            "dataType": "moveObject",
            "type": "0x1::codeforge::SavingsGroup",
            "fields": {
                "id": { "id": "0x1" },
                "name": "Ajo",
                "cycle_duration_days": "7",
                "contribution_amount": "1000000000",
                "current_cycle": 2,
                "current_savings_balance": "1000000000",
                "is_active": true,
                "created_at": "1700000000000",
                "participants": [
                    {
                        "type": "0x1::codeforge::Participant",
                        "fields": {
                            "address": alice,
                            "position": 1,
                            "has_contributed": true,
                            "has_received_payout": true,
                        }
                    },
                    { "wallet": bob, "position": "2" },
                ],
            }
        }));

        let snapshot = SavingsGroupSnapshot::from_object(data.object_id, &data).unwrap();
        assert_eq!(snapshot.name, "Ajo");
        assert_eq!(snapshot.cycle_duration_days, 7);
        assert_eq!(snapshot.contribution_amount, 1_000_000_000);
        assert_eq!(snapshot.current_cycle, 2);
        assert!(snapshot.is_active);
        assert_eq!(snapshot.start_cycle, 0);
        assert_eq!(snapshot.cycle_start_time, 0);
        assert_eq!(snapshot.created_at, 1_700_000_000_000);
        assert_eq!(
            snapshot.participants,
            [
                ParticipantInfo {
                    address: alice,
                    position: 1,
                    has_contributed: true,
                    has_received_payout: true,
                },
                ParticipantInfo {
                    address: bob,
                    position: 2,
                    has_contributed: false,
                    has_received_payout: false,
                },
            ]
        );
        assert_eq!(snapshot.participant(bob).map(|p| p.position), Some(2));
    }

    #[test]
    fn parses_vec_map_participants() {
        let carol = Address::new([0xc; 32]);
        let data = object(json!({
            "fields": {
                "participants": {
                    "type": "0x2::vec_map::VecMap<address, 0x1::codeforge::Participant>",
                    "fields": {
                        "contents": [{
                            "type": "0x2::vec_map::Entry",
                            "fields": {
                                "key": carol,
                                "value": { "fields": { "position": 1, "has_contributed": true } }
                            }
                        }]
                    }
                }
            }
        }));

        let snapshot = SavingsGroupSnapshot::from_object(data.object_id, &data).unwrap();
        assert_eq!(snapshot.participants.len(), 1);
        assert_eq!(snapshot.participants[0].address, carol);
        assert!(snapshot.participants[0].has_contributed);
        assert!(!snapshot.is_active);
    }

    #[test]
    fn rejects_malformed_content() {
        let missing = ObjectData {
            content: None,
            ..object(json!({}))
        };
        assert!(matches!(
            SavingsGroupSnapshot::from_object(missing.object_id, &missing),
            Err(Error::MalformedObjectData(_))
        ));

        for fields in [
            json!({ "is_active": "yes" }),
            json!({ "contribution_amount": -5 }),
            json!({ "name": 42 }),
            json!({ "participants": "none" }),
            json!({ "participants": [{ "position": 1 }] }),
            json!({ "participants": [{ "address": "0x1", "position": 300 }] }),
        ] {
            let data = object(json!({ "fields": fields }));
            assert!(
                matches!(
                    SavingsGroupSnapshot::from_object(data.object_id, &data),
                    Err(Error::MalformedObjectData(_))
                ),
                "{fields}"
            );
        }
    }

    proptest! {
        #[test]
        fn validation_accepts_iff_permutation(
            count in 1usize..12,
            positions in proptest::collection::vec(0u8..14, 0..12),
        ) {
            let req = GroupCreationRequest {
                participants: vec![Address::zero(); count],
                positions: positions.clone(),
                ..request(vec![1])
            };

            let mut sorted = positions;
            sorted.sort_unstable();
            let is_permutation = sorted.len() == count
                && sorted.iter().enumerate().all(|(i, p)| *p as usize == i + 1);

            prop_assert_eq!(req.validate().is_ok(), is_permutation);
        }

        #[test]
        fn shuffled_ranges_are_accepted(
            order in Just((1u8..=10).collect::<Vec<_>>()).prop_shuffle(),
            keep in 1usize..=10,
        ) {
            let positions: Vec<u8> = order.into_iter().filter(|p| (*p as usize) <= keep).collect();
            let req = GroupCreationRequest {
                participants: vec![Address::zero(); keep],
                positions,
                ..request(vec![1])
            };

            prop_assert!(req.validate().is_ok());
        }

        #[test]
        fn dropping_a_position_is_rejected(
            positions in subsequence((1u8..=8).collect::<Vec<_>>(), 1..8),
        ) {
            let req = GroupCreationRequest {
                participants: vec![Address::zero(); positions.len()],
                positions: positions.clone(),
                ..request(vec![1])
            };
            let is_prefix = positions.iter().enumerate().all(|(i, p)| *p as usize == i + 1);

            prop_assert_eq!(req.validate().is_ok(), is_prefix);
        }
    }
}
