//! Filter/query layer
//!
//! Selects task records by date scope, aircraft and flight, and derives the
//! option lists for the aircraft and flight pickers. The aircraft options are
//! narrowed by the chosen flights and the flight options by the chosen
//! aircraft, so each picker only offers values that still match something.

use chrono::NaiveDate;
use std::collections::BTreeSet;
use tracing::debug;
use turnaround_core::{DateScope, FlightNumber, Selection, TailNumber, TaskRecord};

/// True if the record's scheduled arrival or departure falls on `day`
fn touches_day(record: &TaskRecord, day: NaiveDate) -> bool {
    record.scheduled_arrival.date() == day || record.scheduled_departure.date() == day
}

/// Records matching the selection, in their original order
///
/// `today` anchors the `Today`/`Yesterday` scopes.
pub fn apply_filters<'a>(
    records: &'a [TaskRecord],
    selection: &Selection,
    today: NaiveDate,
) -> Vec<&'a TaskRecord> {
    let day = selection.scope.target_day(today);
    let kept: Vec<&TaskRecord> = records
        .iter()
        .filter(|r| day.map_or(true, |d| touches_day(r, d)))
        .filter(|r| selection.allows_aircraft(&r.aircraft))
        .filter(|r| selection.allows_flight(&r.flight))
        .collect();

    debug!(
        scope = %selection.scope,
        aircraft = selection.aircraft.len(),
        flights = selection.flights.len(),
        kept = kept.len(),
        total = records.len(),
        "filtered task records"
    );
    kept
}

/// Sorted distinct tail numbers within scope, narrowed by the chosen flights
pub fn distinct_aircraft(
    records: &[TaskRecord],
    scope: DateScope,
    chosen_flights: &[FlightNumber],
    today: NaiveDate,
) -> Vec<TailNumber> {
    let selection = Selection {
        scope,
        aircraft: Vec::new(),
        flights: chosen_flights.to_vec(),
    };
    apply_filters(records, &selection, today)
        .into_iter()
        .map(|r| r.aircraft.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Sorted distinct flight numbers within scope, narrowed by the chosen aircraft
pub fn distinct_flights(
    records: &[TaskRecord],
    scope: DateScope,
    chosen_aircraft: &[TailNumber],
    today: NaiveDate,
) -> Vec<FlightNumber> {
    let selection = Selection {
        scope,
        aircraft: chosen_aircraft.to_vec(),
        flights: Vec::new(),
    };
    apply_filters(records, &selection, today)
        .into_iter()
        .map(|r| r.flight.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
