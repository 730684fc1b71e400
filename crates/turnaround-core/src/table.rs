//! Wide (pivoted) table: one row per aircraft/flight pair.
//!
//! Columns carry a [`ColumnRole`] next to their header text so consumers never
//! have to guess a column's meaning from its name. Delay-flag columns are data
//! only: renderers hide them and use them to colour the matching duration
//! column.

use serde::{Deserialize, Serialize};

use crate::{TaskName, TaskPhase, View};

pub const AIRCRAFT_HEADER: &str = "Aircraft number";
pub const FLIGHT_HEADER: &str = "Flight number";
pub const ARRIVAL_TIME_HEADER: &str = "Time of Arrival";
pub const DEPARTURE_TIME_HEADER: &str = "Time of Departure";

/// Suffix shared by all delay-flag column names
pub const DELAY_SUFFIX: &str = "_delay";

/// What a column holds
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnRole {
    Aircraft,
    Flight,
    TimeOfArrival,
    TimeOfDeparture,
    /// Start-end text of a task
    Duration(TaskName),
    /// 0/1 delay flag of a task
    DelayFlag(TaskName),
}

/// A named, typed column
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub role: ColumnRole,
}

impl Column {
    pub fn aircraft() -> Self {
        Self {
            name: AIRCRAFT_HEADER.into(),
            role: ColumnRole::Aircraft,
        }
    }

    pub fn flight() -> Self {
        Self {
            name: FLIGHT_HEADER.into(),
            role: ColumnRole::Flight,
        }
    }

    pub fn time_of_arrival() -> Self {
        Self {
            name: ARRIVAL_TIME_HEADER.into(),
            role: ColumnRole::TimeOfArrival,
        }
    }

    pub fn time_of_departure() -> Self {
        Self {
            name: DEPARTURE_TIME_HEADER.into(),
            role: ColumnRole::TimeOfDeparture,
        }
    }

    pub fn duration(task: impl Into<TaskName>) -> Self {
        let task = task.into();
        Self {
            name: task.clone(),
            role: ColumnRole::Duration(task),
        }
    }

    /// Delay column; single-phase views prefix the name with the phase
    pub fn delay(task: impl Into<TaskName>, phase: Option<TaskPhase>) -> Self {
        let task = task.into();
        let prefix = phase.map_or("", TaskPhase::delay_prefix);
        Self {
            name: format!("{prefix}{task}{DELAY_SUFFIX}"),
            role: ColumnRole::DelayFlag(task),
        }
    }

    pub fn is_delay(&self) -> bool {
        matches!(self.role, ColumnRole::DelayFlag(_))
    }
}

/// A table cell
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Flag(bool),
}

impl Cell {
    pub fn empty() -> Self {
        Cell::Text(String::new())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            Cell::Flag(_) => None,
        }
    }

    /// Flag value; text cells count as not flagged
    pub fn is_flagged(&self) -> bool {
        matches!(self, Cell::Flag(true))
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Flag(flag) => write!(f, "{}", u8::from(*flag)),
        }
    }
}

/// Pivoted table for one view
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WideTable {
    pub view: View,
    pub columns: Vec<Column>,
    /// Row-major cells; every row has one cell per column
    pub rows: Vec<Vec<Cell>>,
}

impl WideTable {
    /// Table with no rows and no columns
    pub fn empty(view: View) -> Self {
        Self {
            view,
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Cell at `row` in the named column
    pub fn cell(&self, row: usize, name: &str) -> Option<&Cell> {
        let idx = self.column_index(name)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// Columns shown to the user, with their indices
    pub fn visible_columns(&self) -> impl Iterator<Item = (usize, &Column)> {
        self.columns.iter().enumerate().filter(|(_, c)| !c.is_delay())
    }

    /// Index of the delay column that colours the named column
    ///
    /// Tries `{name}_delay`, then `Departure_{name}_delay`, then
    /// `Arrival_{name}_delay`.
    pub fn delay_column_for(&self, name: &str) -> Option<usize> {
        [
            format!("{name}{DELAY_SUFFIX}"),
            format!("{}{name}{DELAY_SUFFIX}", TaskPhase::Departure.delay_prefix()),
            format!("{}{name}{DELAY_SUFFIX}", TaskPhase::Arrival.delay_prefix()),
        ]
        .iter()
        .find_map(|candidate| {
            self.columns
                .iter()
                .position(|c| c.is_delay() && &c.name == candidate)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> WideTable {
        WideTable {
            view: View::Arrival,
            columns: vec![
                Column::aircraft(),
                Column::flight(),
                Column::time_of_arrival(),
                Column::duration("Refueling"),
                Column::delay("Refueling", Some(TaskPhase::Arrival)),
            ],
            rows: vec![vec![
                Cell::Text("A1234".into()),
                Cell::Text("TA101".into()),
                Cell::Text("07:45".into()),
                Cell::Text("07:50:00 - 08:02:00".into()),
                Cell::Flag(true),
            ]],
        }
    }

    #[test]
    fn delay_column_names() {
        assert_eq!(Column::delay("Refueling", None).name, "Refueling_delay");
        assert_eq!(
            Column::delay("Cabin cleaning", Some(TaskPhase::Departure)).name,
            "Departure_Cabin cleaning_delay"
        );
    }

    #[test]
    fn visible_columns_skip_delay_flags() {
        let table = sample();
        let visible: Vec<&str> = table.visible_columns().map(|(_, c)| c.name.as_str()).collect();
        assert_eq!(
            visible,
            vec!["Aircraft number", "Flight number", "Time of Arrival", "Refueling"]
        );
    }

    #[test]
    fn delay_lookup_falls_back_to_prefixed_names() {
        let table = sample();
        assert_eq!(table.delay_column_for("Refueling"), Some(4));
        assert_eq!(table.delay_column_for("Time of Arrival"), None);
    }

    #[test]
    fn flags_display_as_digits() {
        assert_eq!(Cell::Flag(true).to_string(), "1");
        assert_eq!(Cell::Flag(false).to_string(), "0");
        assert!(!Cell::Text("1".into()).is_flagged());
    }

    #[test]
    fn cell_lookup_by_name() {
        let table = sample();
        assert_eq!(table.cell(0, "Flight number").and_then(Cell::as_text), Some("TA101"));
        assert_eq!(table.cell(1, "Flight number"), None);
        assert_eq!(table.cell(0, "Gate"), None);
    }
}
