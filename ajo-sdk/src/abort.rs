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

//! Execution result classification.
//!
//! The contract reports failures as free text. Codes are scraped from the
//! message after an `abort_code` marker; a change in the upstream message
//! format only needs to be handled here.

use crate::types::{CreatedObject, ExecutionResponse, OutcomeStatus, TransactionOutcome};
use std::fmt;

const ABORT_CODE_MARKER: &str = "abort_code";

/// Named contract abort codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbortKind {
    InvalidParticipantCount,
    InvalidPosition,
    DuplicatePosition,
    InvalidCycleDuration,
    InsufficientFunds,
    NotParticipant,
    AlreadyContributed,
    NotContributionTime,
    NotPayoutTime,
    CycleNotStarted,
    PayoutAlreadyProcessed,
    /// Code missing from the table, or absent altogether.
    Unknown(Option<u64>),
}

impl AbortKind {
    /// Classify an optional numeric code.
    pub fn from_code(code: Option<u64>) -> Self {
        match code {
            Some(0) => Self::InvalidParticipantCount,
            Some(1) => Self::InvalidPosition,
            Some(2) => Self::DuplicatePosition,
            Some(3) => Self::InvalidCycleDuration,
            Some(4) => Self::InsufficientFunds,
            Some(5) => Self::NotParticipant,
            Some(6) => Self::AlreadyContributed,
            Some(7) => Self::NotContributionTime,
            Some(8) => Self::NotPayoutTime,
            Some(9) => Self::CycleNotStarted,
            Some(10) => Self::PayoutAlreadyProcessed,
            code => Self::Unknown(code),
        }
    }

    /// Numeric code, if known.
    pub fn code(&self) -> Option<u64> {
        let code = match self {
            Self::InvalidParticipantCount => 0,
            Self::InvalidPosition => 1,
            Self::DuplicatePosition => 2,
            Self::InvalidCycleDuration => 3,
            Self::InsufficientFunds => 4,
            Self::NotParticipant => 5,
            Self::AlreadyContributed => 6,
            Self::NotContributionTime => 7,
            Self::NotPayoutTime => 8,
            Self::CycleNotStarted => 9,
            Self::PayoutAlreadyProcessed => 10,
            Self::Unknown(code) => return *code,
        };

        Some(code)
    }

    /// Contract constant name, e.g. `E_ALREADY_CONTRIBUTED`.
    pub fn name(&self) -> String {
        let name = match self {
            Self::InvalidParticipantCount => "E_INVALID_PARTICIPANT_COUNT",
            Self::InvalidPosition => "E_INVALID_POSITION",
            Self::DuplicatePosition => "E_DUPLICATE_POSITION",
            Self::InvalidCycleDuration => "E_INVALID_CYCLE_DURATION",
            Self::InsufficientFunds => "E_INSUFFICIENT_FUNDS",
            Self::NotParticipant => "E_NOT_PARTICIPANT",
            Self::AlreadyContributed => "E_ALREADY_CONTRIBUTED",
            Self::NotContributionTime => "E_NOT_CONTRIBUTION_TIME",
            Self::NotPayoutTime => "E_NOT_PAYOUT_TIME",
            Self::CycleNotStarted => "E_CYCLE_NOT_STARTED",
            Self::PayoutAlreadyProcessed => "E_PAYOUT_ALREADY_PROCESSED",
            Self::Unknown(Some(code)) => return format!("Unknown error (code: {code})"),
            Self::Unknown(None) => return "Unknown error (code: None)".into(),
        };

        name.into()
    }
}

impl fmt::Display for AbortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// A failed execution, classified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ContractError {
    pub kind: AbortKind,
    pub code: Option<u64>,
    /// Raw failure message reported by the node.
    pub message: String,
}

impl ContractError {
    /// Classify a raw failure message.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let code = parse_abort_code(&message);

        Self {
            kind: AbortKind::from_code(code),
            code,
            message,
        }
    }
}

/// Extract the numeric token following the `abort_code` marker.
///
/// Returns `None` when the marker is missing or the token is not a `u64`.
pub fn parse_abort_code(message: &str) -> Option<u64> {
    let (_, rest) = message.split_once(ABORT_CODE_MARKER)?;
    rest.split_whitespace().next()?.parse().ok()
}

/// Classify the raw response of an executed transaction.
///
/// Only a `failure` status is an error. Responses without effects, or with
/// a status other than `success`, are reported as
/// [`OutcomeStatus::Unconfirmed`].
pub fn interpret(response: &ExecutionResponse) -> Result<TransactionOutcome, ContractError> {
    let created = response
        .object_changes
        .iter()
        .flatten()
        .filter(|change| change.is_created())
        .filter_map(|change| {
            change.object_id.map(|object_id| CreatedObject {
                object_id,
                object_type: change.object_type.clone(),
            })
        })
        .collect();

    let status = match response.effects.as_ref().and_then(|e| e.status.as_ref()) {
        None => {
            tracing::debug!("Transaction {} reported no status", response.digest);
            OutcomeStatus::Unconfirmed
        }
        Some(status) if status.status == "success" => OutcomeStatus::Success,
        Some(status) if status.status != "failure" => {
            tracing::debug!(
                "Transaction {} reported status {:?}",
                response.digest,
                status.status
            );
            OutcomeStatus::Unconfirmed
        }
        Some(status) => {
            let message = status
                .error
                .clone()
                .unwrap_or_else(|| "Unknown error".into());
            let err = ContractError::from_message(message);
            tracing::warn!("Transaction {} failed: {err}", response.digest);
            return Err(err);
        }
    };

    Ok(TransactionOutcome {
        digest: response.digest,
        status,
        created,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExecutionStatus, ObjectChange, TransactionEffects};
    use ajo_primitives::{Digest, ObjectId};
    use proptest::prelude::*;

    fn response(status: Option<(&str, Option<&str>)>) -> ExecutionResponse {
        ExecutionResponse {
            digest: Digest::of(b"tx"),
            effects: status.map(|(status, error)| TransactionEffects {
                status: Some(ExecutionStatus {
                    status: status.into(),
                    error: error.map(Into::into),
                }),
            }),
            object_changes: None,
        }
    }

    #[test]
    fn names_match_contract_constants() {
        assert_eq!(AbortKind::from_code(Some(0)).name(), "E_INVALID_PARTICIPANT_COUNT");
        assert_eq!(AbortKind::from_code(Some(6)).name(), "E_ALREADY_CONTRIBUTED");
        assert_eq!(AbortKind::from_code(Some(10)).name(), "E_PAYOUT_ALREADY_PROCESSED");
        assert_eq!(AbortKind::from_code(Some(11)).name(), "Unknown error (code: 11)");
        assert_eq!(AbortKind::from_code(None).name(), "Unknown error (code: None)");

        for code in 0..=10 {
            assert_eq!(AbortKind::from_code(Some(code)).code(), Some(code));
        }
    }

    #[test]
    fn parses_code_after_marker() {
        assert_eq!(parse_abort_code("MoveAbort abort_code 6 in command 1"), Some(6));
        assert_eq!(parse_abort_code("abort_code    10"), Some(10));
        assert_eq!(parse_abort_code("abort_code x6"), None);
        assert_eq!(parse_abort_code("abort_code"), None);
        assert_eq!(parse_abort_code("abort_code -1"), None);
        assert_eq!(parse_abort_code("out of gas"), None);
    }

    #[test]
    fn failure_is_classified() {
        let err = interpret(&response(Some((
            "failure",
            Some("MoveAbort in codeforge::contribute abort_code 6"),
        ))))
        .unwrap_err();

        assert_eq!(err.kind, AbortKind::AlreadyContributed);
        assert_eq!(err.code, Some(6));
        assert_eq!(
            err.to_string(),
            "E_ALREADY_CONTRIBUTED: MoveAbort in codeforge::contribute abort_code 6"
        );
    }

    #[test]
    fn failure_without_code_is_unknown() {
        let err = interpret(&response(Some(("failure", Some("InsufficientGas"))))).unwrap_err();
        assert_eq!(err.kind, AbortKind::Unknown(None));
        assert_eq!(err.code, None);
        assert_eq!(err.to_string(), "Unknown error (code: None): InsufficientGas");

        let err = interpret(&response(Some(("failure", None)))).unwrap_err();
        assert_eq!(err.message, "Unknown error");
    }

    #[test]
    fn unexpected_status_passes_through() {
        let outcome = interpret(&response(Some(("pending", None)))).unwrap();
        assert_eq!(outcome.status, OutcomeStatus::Unconfirmed);

        let outcome = interpret(&response(Some(("pending", Some("abort_code 7"))))).unwrap();
        assert_eq!(outcome.status, OutcomeStatus::Unconfirmed);
        assert!(!outcome.is_success());
    }

    #[test]
    fn missing_status_is_unconfirmed() {
        let outcome = interpret(&response(None)).unwrap();
        assert_eq!(outcome.status, OutcomeStatus::Unconfirmed);
    }

    #[test]
    fn success_collects_created_objects() {
        let group = ObjectId::new([7; 32]);
        let mut response = response(Some(("success", None)));
        response.object_changes = Some(vec![
            ObjectChange {
                kind: "mutated".into(),
                object_id: Some(ObjectId::new([1; 32])),
                object_type: None,
            },
            ObjectChange {
                kind: "created".into(),
                object_id: Some(group),
                object_type: Some("0x1::codeforge::SavingsGroup".into()),
            },
        ]);

        let outcome = interpret(&response).unwrap();
        assert_eq!(outcome.status, OutcomeStatus::Success);
        assert_eq!(outcome.first_created(), Some(group));
        assert_eq!(outcome.created.len(), 1);
    }

    proptest! {
        #[test]
        fn parsing_never_panics(message in ".*") {
            let _ = ContractError::from_message(message);
        }

        #[test]
        fn known_codes_round_trip(code in 0u64..=10, prefix in "[a-zA-Z ]{0,20}") {
            let message = format!("{prefix} abort_code {code} in command 0");
            prop_assert_eq!(parse_abort_code(&message), Some(code));
        }
    }
}
