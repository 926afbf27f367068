//! Per-session visit accounting.
//!
//! Each browser session keeps a visit counter and the time of the last
//! counted visit. The counter moves forward by one when at least a full day
//! has passed since that time and stays put otherwise.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::domain::types::TypeConstraintError;

/// Session key holding the visit counter.
pub const VISITS_KEY: &str = "visits";
/// Session key holding the timestamp of the last counted visit.
pub const LAST_VISIT_KEY: &str = "last_visit";

/// Number of counted visits of a session. Always at least one.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct VisitCount(u32);

impl VisitCount {
    pub const FIRST: Self = Self(1);

    pub fn new(value: u32) -> Result<Self, TypeConstraintError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NonPositiveNumber("visits"))
        }
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    const fn incremented(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Display for VisitCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<u32> for VisitCount {
    fn eq(&self, other: &u32) -> bool {
        self.0 == *other
    }
}

/// Visit counter together with the time it was last advanced.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct VisitState {
    pub visits: VisitCount,
    pub last_visit: NaiveDateTime,
}

impl VisitState {
    /// Fills in missing session values: the counter starts at one and the
    /// last visit defaults to `now`.
    pub fn from_stored(
        visits: Option<VisitCount>,
        last_visit: Option<NaiveDateTime>,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            visits: visits.unwrap_or(VisitCount::FIRST),
            last_visit: last_visit.unwrap_or(now),
        }
    }

    /// Applies one visit at `now`.
    ///
    /// Only whole elapsed days count, so a visit 23 hours after the last one
    /// leaves the state untouched while one 25 hours later bumps the counter
    /// and moves `last_visit` to `now`. A `last_visit` in the future never
    /// counts as elapsed time.
    pub fn register_visit(self, now: NaiveDateTime) -> Self {
        if now.signed_duration_since(self.last_visit) >= TimeDelta::days(1) {
            Self {
                visits: self.visits.incremented(),
                last_visit: now,
            }
        } else {
            self
        }
    }
}
