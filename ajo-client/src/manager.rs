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

//! Savings group workflows.

use crate::{
    error::{Error, Result},
    events::{EventSink, GroupEvent, LogSink},
    state::{Contribution, ContributionStatus, CycleReport, CycleRun, CycleState},
};
use ajo_primitives::{Address, ObjectId, sui_to_mist};
use ajo_sdk::{GroupCreationRequest, SavingsGroupClient, Transport, ValidationError};
use std::sync::Arc;

/// Least balance the admin must hold before creating a group: 0.01 SUI.
///
/// A heuristic; the real gas cost may be higher.
pub const MIN_GAS_RESERVE_MIST: u64 = 10_000_000;

/// High-level workflows over a [`SavingsGroupClient`].
///
/// Runs are sequential and never retried. Independent runs may share the
/// same client; runs on the same group are not coordinated.
pub struct SavingsGroupManager<T> {
    client: Arc<SavingsGroupClient<T>>,
    events: Arc<dyn EventSink>,
}

impl<T: Transport> SavingsGroupManager<T> {
    /// Create manager reporting events to the log.
    pub fn new(client: Arc<SavingsGroupClient<T>>) -> Self {
        Self::with_events(client, Arc::new(LogSink))
    }

    pub fn with_events(client: Arc<SavingsGroupClient<T>>, events: Arc<dyn EventSink>) -> Self {
        Self { client, events }
    }

    pub fn client(&self) -> &Arc<SavingsGroupClient<T>> {
        &self.client
    }

    /// Validate, funds-check and create a savings group.
    ///
    /// `contribution_sui` is converted to MIST. Returns the id of the first
    /// object the transaction created.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_group_with_validation(
        &self,
        admin: &str,
        name: &str,
        cycle_duration_days: u64,
        start_cycle: u64,
        contribution_sui: f64,
        participants: Vec<Address>,
        positions: Vec<u8>,
    ) -> Result<ObjectId> {
        if !contribution_sui.is_finite() || contribution_sui <= 0.0 {
            return Err(ValidationError::NonPositiveContribution.into());
        }

        let request = GroupCreationRequest {
            name: name.into(),
            cycle_duration_days,
            start_cycle,
            contribution_amount: sui_to_mist(contribution_sui),
            participants,
            positions,
        };
        request.validate()?;

        let address = self.client.address_of(admin)?;
        let balance = self.client.get_balance(address).await?;
        if balance < MIN_GAS_RESERVE_MIST {
            tracing::warn!("{admin} ({address}) holds {balance} MIST, not enough to create a group");
            return Err(Error::InsufficientBalance {
                balance,
                required: MIN_GAS_RESERVE_MIST,
            });
        }

        let outcome = self
            .client
            .create_savings_group(admin, &request, None)
            .await?;

        let group = outcome
            .first_created()
            .ok_or(Error::GroupCreationIncomplete {
                digest: outcome.digest,
            })?;

        self.events
            .notify(GroupEvent::GroupCreated {
                group,
                name: request.name,
                participants: request.participants.len(),
            })
            .await;

        Ok(group)
    }

    /// Collect every participant's contribution, pay out and open the next
    /// cycle if the group is still active.
    ///
    /// Participants are charged in the given order. A participant the
    /// contract reports as already contributed is skipped; any other error
    /// ends the run before later participants are contacted.
    pub async fn run_full_cycle<S: AsRef<str>>(
        &self,
        admin: &str,
        group: ObjectId,
        participants: &[S],
    ) -> Result<CycleReport> {
        let mut run = CycleRun::new(group);

        let snapshot = self
            .client
            .get_group_info(group)
            .await
            .map_err(|e| run.abort(e))?;
        if !snapshot.is_active {
            return Err(run.abort(Error::GroupInactive(group)));
        }

        run.advance(CycleState::Collecting);
        tracing::info!(
            "Collecting {} MIST from {} participants of {group}",
            snapshot.contribution_amount,
            participants.len()
        );

        let mut contributions = Vec::with_capacity(participants.len());
        for alias in participants {
            let alias = alias.as_ref();
            let status = match self
                .client
                .contribute(alias, group, snapshot.contribution_amount, None)
                .await
            {
                Ok(outcome) => ContributionStatus::Contributed(outcome.digest),
                Err(err) if err.is_already_contributed() => {
                    tracing::info!("{alias} already contributed to cycle {}", snapshot.current_cycle);
                    ContributionStatus::AlreadyContributed
                }
                Err(err) => return Err(run.abort(err)),
            };

            contributions.push(Contribution {
                alias: alias.into(),
                status,
            });
        }

        run.advance(CycleState::AwaitingCycleEnd);
        run.advance(CycleState::PayingOut);

        let payout = self
            .client
            .process_payout(admin, group, None)
            .await
            .map_err(|e| run.abort(e))?;

        let after = self
            .client
            .get_group_info(group)
            .await
            .map_err(|e| run.abort(e))?;

        let next_cycle_digest = if after.is_active {
            run.advance(CycleState::StartingNext);
            let outcome = self
                .client
                .start_new_cycle(admin, group, None)
                .await
                .map_err(|e| run.abort(e))?;

            Some(outcome.digest)
        } else {
            tracing::info!("{group} is no longer active, cycle series complete");
            None
        };

        run.advance(CycleState::Done);

        let report = CycleReport {
            group,
            cycle: snapshot.current_cycle,
            contributions,
            payout_digest: payout.digest,
            next_cycle_digest,
            states: run.into_states(),
        };

        self.events
            .notify(GroupEvent::CycleAdvanced {
                group,
                cycle: report.cycle,
                series_complete: report.series_complete(),
            })
            .await;

        Ok(report)
    }
}
