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

//! Cycle run state machine.

use crate::error::Error;
use ajo_primitives::{Digest, ObjectId};
use std::fmt;

/// Phase of a single cycle run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleState {
    Idle,
    /// Contributions are being submitted one participant at a time.
    Collecting,
    /// Every contribution landed; waiting for the cycle to end is up to the
    /// caller.
    AwaitingCycleEnd,
    PayingOut,
    StartingNext,
    Done,
    Aborted,
}

impl CycleState {
    /// Whether `next` is a legal successor of `self`.
    pub fn can_advance_to(self, next: Self) -> bool {
        use CycleState::*;

        matches!(
            (self, next),
            (Idle, Collecting)
                | (Idle, Aborted)
                | (Collecting, AwaitingCycleEnd)
                | (Collecting, Aborted)
                | (AwaitingCycleEnd, PayingOut)
                | (PayingOut, StartingNext)
                | (PayingOut, Done)
                | (PayingOut, Aborted)
                | (StartingNext, Done)
                | (StartingNext, Aborted)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Aborted)
    }
}

impl fmt::Display for CycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// How a participant's contribution went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContributionStatus {
    Contributed(Digest),
    /// The contract had already recorded this participant's contribution.
    AlreadyContributed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    pub alias: String,
    pub status: ContributionStatus,
}

/// Summary of a completed cycle run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub group: ObjectId,
    /// Cycle index the run started in.
    pub cycle: u64,
    pub contributions: Vec<Contribution>,
    pub payout_digest: Digest,
    /// `None` when the payout ended the series.
    pub next_cycle_digest: Option<Digest>,
    pub states: Vec<CycleState>,
}

impl CycleReport {
    /// Whether the group went inactive after this payout.
    pub fn series_complete(&self) -> bool {
        self.next_cycle_digest.is_none()
    }
}

/// Tracks the states a cycle run passes through.
#[derive(Debug)]
pub(crate) struct CycleRun {
    group: ObjectId,
    states: Vec<CycleState>,
}

impl CycleRun {
    pub fn new(group: ObjectId) -> Self {
        Self {
            group,
            states: vec![CycleState::Idle],
        }
    }

    pub fn state(&self) -> CycleState {
        self.states
            .last()
            .copied()
            .unwrap_or(CycleState::Idle)
    }

    pub fn advance(&mut self, next: CycleState) {
        let current = self.state();
        debug_assert!(
            current.can_advance_to(next),
            "illegal transition {current} -> {next}"
        );

        tracing::debug!("Cycle run on {}: {current} -> {next}", self.group);
        self.states.push(next);
    }

    /// Move to [`CycleState::Aborted`] and hand back the error that caused it.
    pub fn abort(&mut self, err: impl Into<Error>) -> Error {
        let err = err.into();
        tracing::error!(
            "Cycle run on {} aborted while {}: {err}",
            self.group,
            self.state()
        );

        self.advance(CycleState::Aborted);
        err
    }

    pub fn states(&self) -> &[CycleState] {
        &self.states
    }

    pub fn into_states(self) -> Vec<CycleState> {
        self.states
    }
}

#[cfg(test)]
mod tests {
    use super::{CycleState::*, *};

    const ALL: [CycleState; 7] = [
        Idle,
        Collecting,
        AwaitingCycleEnd,
        PayingOut,
        StartingNext,
        Done,
        Aborted,
    ];

    #[test]
    fn terminal_states_have_no_successors() {
        for next in ALL {
            assert!(!Done.can_advance_to(next));
            assert!(!Aborted.can_advance_to(next));
        }
        assert!(Done.is_terminal());
        assert!(Aborted.is_terminal());
        assert!(!PayingOut.is_terminal());
    }

    #[test]
    fn waiting_for_cycle_end_cannot_abort() {
        assert!(!AwaitingCycleEnd.can_advance_to(Aborted));
        assert!(AwaitingCycleEnd.can_advance_to(PayingOut));
    }

    #[test]
    fn no_skipping_ahead() {
        assert!(!Idle.can_advance_to(PayingOut));
        assert!(!Collecting.can_advance_to(PayingOut));
        assert!(!Collecting.can_advance_to(Done));
        assert!(!StartingNext.can_advance_to(PayingOut));
    }

    #[test]
    fn run_records_path() {
        let mut run = CycleRun::new(ObjectId::zero());
        run.advance(Collecting);
        let err = run.abort(Error::GroupInactive(ObjectId::zero()));

        assert!(matches!(err, Error::GroupInactive(_)));
        assert_eq!(run.states(), [Idle, Collecting, Aborted]);
        assert_eq!(run.state(), Aborted);
    }
}
