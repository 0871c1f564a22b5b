//! Validation phases

use serde::Serialize;
use std::fmt;

use crate::{Error, Result};

/// Phase of a validation run; strictly sequential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Idle,
    Pass1,
    Pass2,
    PostPass,
    StructureCheck,
    Complete,
}

impl Phase {
    /// The phase that follows this one in a full run
    pub fn next(&self) -> Option<Phase> {
        match self {
            Phase::Idle => Some(Phase::Pass1),
            Phase::Pass1 => Some(Phase::Pass2),
            Phase::Pass2 => Some(Phase::PostPass),
            Phase::PostPass => Some(Phase::StructureCheck),
            Phase::StructureCheck => Some(Phase::Complete),
            Phase::Complete => None,
        }
    }

    /// Allowed moves: one step forward, or straight to Complete from Idle
    pub fn can_transition_to(&self, to: Phase) -> bool {
        self.next() == Some(to) || (*self == Phase::Idle && to == Phase::Complete)
    }

    /// Move to `to`, rejecting out-of-order transitions
    pub fn transition(&mut self, to: Phase) -> Result<()> {
        if !self.can_transition_to(to) {
            return Err(Error::phase_transition(self.to_string(), to.to_string()));
        }
        *self = to;
        Ok(())
    }

    /// Label shown by progress displays
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Pass1 => "pass 1: records",
            Phase::Pass2 => "pass 2: references",
            Phase::PostPass => "aggregating totals",
            Phase::StructureCheck => "checking structure",
            Phase::Complete => "complete",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
