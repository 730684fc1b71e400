//! # turnaround-engine
//!
//! Data side of the ground-handling dashboard.
//!
//! This crate provides:
//! - A seeded mock task generator
//! - An in-memory provider owning the base dataset
//! - The filter/query layer (date scope, aircraft, flight)
//! - The pivot engine producing one wide row per aircraft/flight pair
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use turnaround_core::{Selection, View};
//! use turnaround_engine::{Dashboard, InMemoryProvider, MockGenerator};
//!
//! let now = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap().and_hms_opt(12, 0, 0).unwrap();
//! let provider = InMemoryProvider::generate(MockGenerator::new(42), now);
//! let dashboard = Dashboard::new(&provider, now.date());
//!
//! let table = dashboard.table(View::Departure, &Selection::default());
//! assert_eq!(table.row_count(), dashboard.aircraft_flight_pairs(&Selection::default()));
//! ```

pub mod filter;
pub mod mock;
pub mod pivot;
pub mod provider;

pub use filter::{apply_filters, distinct_aircraft, distinct_flights};
pub use mock::MockGenerator;
pub use pivot::pivot;
pub use provider::InMemoryProvider;

use chrono::NaiveDate;
use std::collections::HashSet;
use turnaround_core::{
    DataProvider, DateScope, FlightNumber, Selection, TailNumber, TaskRecord, View, WideTable,
};

/// Query facade over a provider for one interaction
///
/// `today` anchors the date scopes; the shell passes the local date.
pub struct Dashboard<'a, P: DataProvider + ?Sized> {
    provider: &'a P,
    today: NaiveDate,
}

impl<'a, P: DataProvider + ?Sized> Dashboard<'a, P> {
    pub fn new(provider: &'a P, today: NaiveDate) -> Self {
        Self { provider, today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Records matching the selection
    pub fn rows(&self, selection: &Selection) -> Vec<&'a TaskRecord> {
        apply_filters(self.provider.records(), selection, self.today)
    }

    /// Pivoted table for a view and selection
    pub fn table(&self, view: View, selection: &Selection) -> WideTable {
        pivot(&self.rows(selection), view)
    }

    /// Aircraft picker options, narrowed by the chosen flights
    pub fn aircraft_options(&self, scope: DateScope, chosen_flights: &[FlightNumber]) -> Vec<TailNumber> {
        distinct_aircraft(self.provider.records(), scope, chosen_flights, self.today)
    }

    /// Flight picker options, narrowed by the chosen aircraft
    pub fn flight_options(&self, scope: DateScope, chosen_aircraft: &[TailNumber]) -> Vec<FlightNumber> {
        distinct_flights(self.provider.records(), scope, chosen_aircraft, self.today)
    }

    /// Number of distinct (aircraft, flight) pairs matching the selection
    pub fn aircraft_flight_pairs(&self, selection: &Selection) -> usize {
        self.rows(selection)
            .iter()
            .map(|r| (r.aircraft.as_str(), r.flight.as_str()))
            .collect::<HashSet<_>>()
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn dashboard_over_generated_data() {
        let provider = InMemoryProvider::generate(MockGenerator::new(42), now());
        let dashboard = Dashboard::new(&provider, now().date());
        let all = Selection::default();

        assert_eq!(dashboard.rows(&all).len(), 16 * 19);
        let table = dashboard.table(View::All, &all);
        assert_eq!(table.row_count(), dashboard.aircraft_flight_pairs(&all));
    }

    #[test]
    fn dashboard_accepts_trait_objects() {
        let provider: Box<dyn DataProvider> = Box::new(Vec::<TaskRecord>::new());
        let dashboard = Dashboard::new(provider.as_ref(), now().date());
        assert!(dashboard.table(View::Arrival, &Selection::default()).is_empty());
        assert!(dashboard.aircraft_options(DateScope::Today, &[]).is_empty());
    }
}
