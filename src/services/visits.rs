use std::fmt::Display;

use chrono::NaiveDateTime;

use crate::domain::visit::{VisitCount, VisitState};

use super::{ServiceError, ServiceResult};

/// Session-scoped storage of the visit counter and last visit time.
pub trait VisitStore {
    type Error: Display;

    fn stored_visits(&self) -> Result<Option<u32>, Self::Error>;
    fn stored_last_visit(&self) -> Result<Option<NaiveDateTime>, Self::Error>;
    fn save_visit_state(&self, state: &VisitState) -> Result<(), Self::Error>;
}

/// Counts a visit of the current session at `now` and writes the result back.
///
/// Unreadable or out-of-range stored values are treated as absent, so a
/// tampered or outdated cookie restarts the count instead of failing the
/// request. Only a failed write is reported as an error.
pub fn visitor_cookie_handler<S>(store: &S, now: NaiveDateTime) -> ServiceResult<VisitState>
where
    S: VisitStore + ?Sized,
{
    let visits = match store.stored_visits() {
        Ok(visits) => visits.and_then(|v| VisitCount::new(v).ok()),
        Err(e) => {
            log::warn!("Ignoring unreadable visit counter: {e}");
            None
        }
    };

    let last_visit = match store.stored_last_visit() {
        Ok(last_visit) => last_visit,
        Err(e) => {
            log::warn!("Ignoring unreadable last visit time: {e}");
            None
        }
    };

    let state = VisitState::from_stored(visits, last_visit, now).register_visit(now);

    match store.save_visit_state(&state) {
        Ok(()) => Ok(state),
        Err(e) => {
            log::error!("Failed to store visit state: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use chrono::{NaiveDate, TimeDelta};

    use super::*;

    #[derive(Default)]
    struct MemoryVisitStore {
        visits: Cell<Option<u32>>,
        last_visit: Cell<Option<NaiveDateTime>>,
        corrupt: bool,
        read_only: bool,
        writes: RefCell<Vec<VisitState>>,
    }

    impl MemoryVisitStore {
        fn with(visits: u32, last_visit: NaiveDateTime) -> Self {
            let store = Self::default();
            store.visits.set(Some(visits));
            store.last_visit.set(Some(last_visit));
            store
        }
    }

    impl VisitStore for MemoryVisitStore {
        type Error = String;

        fn stored_visits(&self) -> Result<Option<u32>, Self::Error> {
            if self.corrupt {
                return Err("invalid type: string, expected u32".to_string());
            }
            Ok(self.visits.get())
        }

        fn stored_last_visit(&self) -> Result<Option<NaiveDateTime>, Self::Error> {
            if self.corrupt {
                return Err("premature end of input".to_string());
            }
            Ok(self.last_visit.get())
        }

        fn save_visit_state(&self, state: &VisitState) -> Result<(), Self::Error> {
            if self.read_only {
                return Err("cookie too large".to_string());
            }
            self.visits.set(Some(state.visits.get()));
            self.last_visit.set(Some(state.last_visit));
            self.writes.borrow_mut().push(*state);
            Ok(())
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn first_visit_sets_counter_to_one() {
        let store = MemoryVisitStore::default();

        let state = visitor_cookie_handler(&store, now()).unwrap();

        assert_eq!(state.visits, 1);
        assert_eq!(store.visits.get(), Some(1));
        assert_eq!(store.last_visit.get(), Some(now()));
    }

    #[test]
    fn visit_25_hours_later_increments_once() {
        let store = MemoryVisitStore::with(3, now() - TimeDelta::hours(25));

        let state = visitor_cookie_handler(&store, now()).unwrap();

        assert_eq!(state.visits, 4);
        assert_eq!(store.visits.get(), Some(4));
        assert_eq!(store.last_visit.get(), Some(now()));
    }

    #[test]
    fn visit_30_minutes_later_keeps_counter() {
        let last = now() - TimeDelta::minutes(30);
        let store = MemoryVisitStore::with(3, last);

        let state = visitor_cookie_handler(&store, now()).unwrap();

        assert_eq!(state.visits, 3);
        assert_eq!(store.last_visit.get(), Some(last));
        assert_eq!(store.writes.borrow().len(), 1);
    }

    #[test]
    fn repeated_visits_on_the_same_day_count_once() {
        let store = MemoryVisitStore::with(1, now() - TimeDelta::days(2));

        visitor_cookie_handler(&store, now()).unwrap();
        visitor_cookie_handler(&store, now() + TimeDelta::hours(1)).unwrap();
        let state = visitor_cookie_handler(&store, now() + TimeDelta::hours(5)).unwrap();

        assert_eq!(state.visits, 2);
        assert_eq!(state.last_visit, now());
    }

    #[test]
    fn zero_counter_is_treated_as_missing() {
        let store = MemoryVisitStore::with(0, now() - TimeDelta::minutes(5));

        let state = visitor_cookie_handler(&store, now()).unwrap();

        assert_eq!(state.visits, 1);
    }

    #[test]
    fn corrupt_values_restart_the_count() {
        let store = MemoryVisitStore {
            corrupt: true,
            ..Default::default()
        };

        let state = visitor_cookie_handler(&store, now()).unwrap();

        assert_eq!(state.visits, 1);
        assert_eq!(state.last_visit, now());
    }

    #[test]
    fn failed_write_is_an_internal_error() {
        let store = MemoryVisitStore {
            read_only: true,
            ..Default::default()
        };

        let err = visitor_cookie_handler(&store, now()).unwrap_err();

        assert_eq!(err, ServiceError::Internal);
    }
}
