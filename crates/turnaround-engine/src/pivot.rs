//! Pivot/reshape engine
//!
//! Turns flat task records into one wide row per (aircraft, flight) pair.
//!
//! # Column layout
//!
//! Each view is described by an ordered list of [`Slot`]s which is resolved
//! against the tasks actually present in the input:
//!
//! | View      | Layout |
//! |-----------|--------|
//! | all       | aircraft, flight, arrival time, arrival tasks, departure tasks, departure time (after `Refueling`), delay flags |
//! | arrival   | aircraft, flight, arrival time, arrival tasks, `Arrival_` delay flags |
//! | departure | aircraft, flight, departure time, departure tasks, `Departure_` delay flags |
//!
//! # Aggregation
//!
//! When several records land in the same cell the duration text keeps the
//! lexicographically greatest string and the delay flag is the maximum (any
//! delayed record flags the cell). Scheduled times come from the first record
//! of each pair.

use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;
use turnaround_core::{
    Cell, Column, ColumnRole, FlightNumber, TailNumber, TaskPhase, TaskRecord, View, WideTable,
    DEPARTURE_ANCHOR_TASK,
};

/// One entry of a view's column layout
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Aircraft,
    Flight,
    TimeOfArrival,
    TimeOfDeparture,
    /// Duration columns for a phase's catalogue, skipping tasks already placed
    Tasks(TaskPhase),
    /// Departure time directly after the named task, or here if it is absent
    DepartureTimeAfter(&'static str),
    /// Delay columns for the catalogues in order, with an optional name prefix
    Delays {
        phases: &'static [TaskPhase],
        prefix: Option<TaskPhase>,
    },
}

const ALL_LAYOUT: &[Slot] = &[
    Slot::Aircraft,
    Slot::Flight,
    Slot::TimeOfArrival,
    Slot::Tasks(TaskPhase::Arrival),
    Slot::Tasks(TaskPhase::Departure),
    Slot::DepartureTimeAfter(DEPARTURE_ANCHOR_TASK),
    Slot::Delays {
        phases: &[TaskPhase::Arrival, TaskPhase::Departure],
        prefix: None,
    },
];

const ARRIVAL_LAYOUT: &[Slot] = &[
    Slot::Aircraft,
    Slot::Flight,
    Slot::TimeOfArrival,
    Slot::Tasks(TaskPhase::Arrival),
    Slot::Delays {
        phases: &[TaskPhase::Arrival],
        prefix: Some(TaskPhase::Arrival),
    },
];

const DEPARTURE_LAYOUT: &[Slot] = &[
    Slot::Aircraft,
    Slot::Flight,
    Slot::TimeOfDeparture,
    Slot::Tasks(TaskPhase::Departure),
    Slot::Delays {
        phases: &[TaskPhase::Departure],
        prefix: Some(TaskPhase::Departure),
    },
];

fn layout(view: View) -> &'static [Slot] {
    match view {
        View::All => ALL_LAYOUT,
        View::Arrival => ARRIVAL_LAYOUT,
        View::Departure => DEPARTURE_LAYOUT,
    }
}

/// Resolve a layout into concrete columns for the tasks present in the data
fn resolve_columns(slots: &[Slot], present: &HashSet<&str>) -> Vec<Column> {
    let mut columns: Vec<Column> = Vec::new();
    let mut placed_tasks: HashSet<&str> = HashSet::new();
    let mut placed_delays: HashSet<&str> = HashSet::new();

    for slot in slots {
        match *slot {
            Slot::Aircraft => columns.push(Column::aircraft()),
            Slot::Flight => columns.push(Column::flight()),
            Slot::TimeOfArrival => columns.push(Column::time_of_arrival()),
            Slot::TimeOfDeparture => columns.push(Column::time_of_departure()),
            Slot::Tasks(phase) => {
                for task in phase.tasks() {
                    if present.contains(task) && placed_tasks.insert(*task) {
                        columns.push(Column::duration(*task));
                    }
                }
            }
            Slot::DepartureTimeAfter(anchor) => {
                let anchor_idx = columns
                    .iter()
                    .position(|c| matches!(&c.role, ColumnRole::Duration(t) if t == anchor));
                match anchor_idx {
                    Some(idx) => columns.insert(idx + 1, Column::time_of_departure()),
                    None => columns.push(Column::time_of_departure()),
                }
            }
            Slot::Delays { phases, prefix } => {
                for task in phases.iter().flat_map(|p| p.tasks()) {
                    if present.contains(task) && placed_delays.insert(*task) {
                        columns.push(Column::delay(*task, prefix));
                    }
                }
            }
        }
    }
    columns
}

/// Accumulated values for one (aircraft, flight) pair
struct PairCells<'a> {
    arrival: String,
    departure: String,
    durations: HashMap<&'a str, String>,
    flags: HashMap<&'a str, bool>,
}

impl<'a> PairCells<'a> {
    fn new(first: &TaskRecord) -> Self {
        Self {
            arrival: first.arrival_clock(),
            departure: first.departure_clock(),
            durations: HashMap::new(),
            flags: HashMap::new(),
        }
    }

    fn absorb(&mut self, record: &'a TaskRecord) {
        let text = record.duration_text();
        self.durations
            .entry(record.task.as_str())
            .and_modify(|current| {
                if text > *current {
                    current.clone_from(&text);
                }
            })
            .or_insert_with(|| text.clone());
        *self.flags.entry(record.task.as_str()).or_insert(false) |= record.delayed;
    }

    fn cell(&self, key: &(TailNumber, FlightNumber), role: &ColumnRole) -> Cell {
        match role {
            ColumnRole::Aircraft => Cell::Text(key.0.clone()),
            ColumnRole::Flight => Cell::Text(key.1.clone()),
            ColumnRole::TimeOfArrival => Cell::Text(self.arrival.clone()),
            ColumnRole::TimeOfDeparture => Cell::Text(self.departure.clone()),
            ColumnRole::Duration(task) => Cell::Text(
                self.durations
                    .get(task.as_str())
                    .cloned()
                    .unwrap_or_default(),
            ),
            ColumnRole::DelayFlag(task) => {
                Cell::Flag(self.flags.get(task.as_str()).copied().unwrap_or(false))
            }
        }
    }
}

/// Pivot filtered records into the wide table for `view`
///
/// Rows are ordered by aircraft, then flight. Records whose task is not part
/// of the view are ignored; if none remain the table is empty.
pub fn pivot(records: &[&TaskRecord], view: View) -> WideTable {
    let mut pairs: BTreeMap<(TailNumber, FlightNumber), PairCells<'_>> = BTreeMap::new();
    let mut present: HashSet<&str> = HashSet::new();

    for &record in records.iter().filter(|r| view.includes_task(&r.task)) {
        present.insert(record.task.as_str());
        pairs
            .entry((record.aircraft.clone(), record.flight.clone()))
            .or_insert_with(|| PairCells::new(record))
            .absorb(record);
    }

    if pairs.is_empty() {
        debug!(%view, "pivot produced no rows");
        return WideTable::empty(view);
    }

    let columns = resolve_columns(layout(view), &present);
    let rows: Vec<Vec<Cell>> = pairs
        .iter()
        .map(|(key, cells)| columns.iter().map(|c| cells.cell(key, &c.role)).collect())
        .collect();

    debug!(%view, rows = rows.len(), columns = columns.len(), "pivoted task records");
    WideTable {
        view,
        columns,
        rows,
    }
}
