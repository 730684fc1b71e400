//! # turnaround-core
//!
//! Core domain model and traits for the turnaround ground-handling dashboard.
//!
//! This crate provides:
//! - Domain types: `TaskRecord`, `TaskPhase`, `DelayPolicy`
//! - Selectors: `View`, `DateScope`, `Selection`
//! - The wide (pivoted) table model: `WideTable`, `Column`, `Cell`
//! - Core traits: `DataProvider`, `TableRenderer`
//! - Dashboard configuration loaded from TOML
//! - Error types
//!
//! ## Example
//!
//! ```rust
//! use turnaround_core::{DelayPolicy, TaskPhase, ARRIVAL_TASKS};
//!
//! assert_eq!(TaskPhase::Arrival.tasks(), &ARRIVAL_TASKS);
//! assert_eq!(TaskPhase::Departure.delay_prefix(), "Departure_");
//!
//! let policy = DelayPolicy::default();
//! assert!(policy.exceeds(10, 12));
//! assert!(!policy.exceeds(10, 11));
//! ```

pub mod config;
pub mod selector;
pub mod table;

pub use config::{
    AuthConfig, ConfigError, DashboardConfig, DataConfig, Palette, ServerConfig, MAX_FLIGHTS,
};
pub use selector::{DateScope, Selection, SelectorError, View};
pub use table::{Cell, Column, ColumnRole, WideTable};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Type Aliases
// ============================================================================

/// Aircraft registration (tail number), e.g. `B4821`
pub type TailNumber = String;

/// Flight designator, e.g. `KL417`
pub type FlightNumber = String;

/// Ground-handling task name as it appears in the task catalogues
pub type TaskName = String;

// ============================================================================
// Task Catalogues
// ============================================================================

/// Tasks performed after an aircraft arrives, in display order
pub const ARRIVAL_TASKS: [&str; 10] = [
    "Opening cargo doors",
    "Opening doors",
    "Passenger disembarkation",
    "Unloading catering",
    "Unloading cargo hold",
    "Removing chocks",
    "Closing doors",
    "Closing cargo compartments and doors",
    "Potable water refill",
    "Refueling",
];

/// Tasks performed before an aircraft departs, in display order
pub const DEPARTURE_TASKS: [&str; 9] = [
    "Opening doors",
    "Loading catering",
    "Passenger boarding",
    "Refueling",
    "Installing stairs/jet bridges",
    "Cabin cleaning",
    "Loading cargo holds",
    "Lavatory service",
    "Installing chocks",
];

/// Task after which the "Time of Departure" column is placed in the combined view
pub const DEPARTURE_ANCHOR_TASK: &str = "Refueling";

/// Format used for task start/end times in duration cells
pub const CLOCK_FORMAT: &str = "%H:%M:%S";

/// Format used for scheduled arrival/departure cells
pub const SCHEDULE_FORMAT: &str = "%H:%M";

/// Half of the flight turnaround a task belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPhase {
    Arrival,
    Departure,
}

impl TaskPhase {
    /// The ordered task catalogue for this phase
    pub fn tasks(self) -> &'static [&'static str] {
        match self {
            TaskPhase::Arrival => &ARRIVAL_TASKS,
            TaskPhase::Departure => &DEPARTURE_TASKS,
        }
    }

    /// Prefix used for this phase's delay columns in single-phase views
    pub fn delay_prefix(self) -> &'static str {
        match self {
            TaskPhase::Arrival => "Arrival_",
            TaskPhase::Departure => "Departure_",
        }
    }

    /// Whether the named task belongs to this phase's catalogue
    pub fn contains(self, task: &str) -> bool {
        self.tasks().contains(&task)
    }
}

impl std::fmt::Display for TaskPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskPhase::Arrival => write!(f, "arrival"),
            TaskPhase::Departure => write!(f, "departure"),
        }
    }
}

// ============================================================================
// Task Record
// ============================================================================

/// One task instance performed for one flight leg
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Flight designator
    pub flight: FlightNumber,
    /// Aircraft tail number
    pub aircraft: TailNumber,
    /// Task name from one of the catalogues
    pub task: TaskName,
    /// Catalogue the task was generated from
    pub phase: TaskPhase,
    /// Scheduled arrival of the flight
    pub scheduled_arrival: NaiveDateTime,
    /// Scheduled departure of the flight
    pub scheduled_departure: NaiveDateTime,
    /// When the task started
    pub started_at: NaiveDateTime,
    /// When the task was completed
    pub completed_at: NaiveDateTime,
    /// Planned duration in minutes
    pub estimated_minutes: u32,
    /// Measured duration in minutes
    pub actual_minutes: u32,
    /// Whether the task is flagged as delayed
    pub delayed: bool,
}

impl TaskRecord {
    /// `"HH:MM:SS - HH:MM:SS"` span of the task
    pub fn duration_text(&self) -> String {
        format!(
            "{} - {}",
            self.started_at.format(CLOCK_FORMAT),
            self.completed_at.format(CLOCK_FORMAT)
        )
    }

    /// Scheduled arrival as `HH:MM`
    pub fn arrival_clock(&self) -> String {
        self.scheduled_arrival.format(SCHEDULE_FORMAT).to_string()
    }

    /// Scheduled departure as `HH:MM`
    pub fn departure_clock(&self) -> String {
        self.scheduled_departure.format(SCHEDULE_FORMAT).to_string()
    }
}

// ============================================================================
// Delay Policy
// ============================================================================

/// Rule deciding when a task counts as delayed
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelayPolicy {
    /// Ratio of actual to estimated duration above which a task is late
    pub threshold: f64,
    /// Chance that the mock generator clears an earned delay flag (demo noise)
    pub clear_probability: f64,
}

impl Default for DelayPolicy {
    fn default() -> Self {
        Self {
            threshold: 1.18,
            clear_probability: 0.4,
        }
    }
}

impl DelayPolicy {
    /// Policy without the demo noise
    pub fn strict(threshold: f64) -> Self {
        Self {
            threshold,
            clear_probability: 0.0,
        }
    }

    /// True iff `actual` exceeds `estimated` by more than the threshold
    pub fn exceeds(&self, estimated_minutes: u32, actual_minutes: u32) -> bool {
        f64::from(actual_minutes) > f64::from(estimated_minutes) * self.threshold
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Owner of the base task dataset
///
/// The dataset is built once, before any query runs, and is read-only
/// afterwards; queries borrow it through this trait.
pub trait DataProvider: Send + Sync {
    /// All task records, in generation order
    fn records(&self) -> &[TaskRecord];
}

impl DataProvider for Vec<TaskRecord> {
    fn records(&self) -> &[TaskRecord] {
        self
    }
}

/// Output rendering of a pivoted table
pub trait TableRenderer {
    type Output;

    /// Render the table; an empty table is reported as [`RenderError::NoData`]
    fn render(&self, table: &WideTable) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("No Information")]
    NoData,

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<std::fmt::Error> for RenderError {
    fn from(err: std::fmt::Error) -> Self {
        RenderError::Format(err.to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn record() -> TaskRecord {
        TaskRecord {
            flight: "KL417".into(),
            aircraft: "B4821".into(),
            task: "Refueling".into(),
            phase: TaskPhase::Departure,
            scheduled_arrival: at(8, 5, 0),
            scheduled_departure: at(10, 40, 0),
            started_at: at(10, 12, 7),
            completed_at: at(10, 31, 7),
            estimated_minutes: 15,
            actual_minutes: 19,
            delayed: true,
        }
    }

    #[test]
    fn duration_text_joins_start_and_end() {
        assert_eq!(record().duration_text(), "10:12:07 - 10:31:07");
    }

    #[test]
    fn schedule_clocks_drop_seconds() {
        let r = record();
        assert_eq!(r.arrival_clock(), "08:05");
        assert_eq!(r.departure_clock(), "10:40");
    }

    #[test]
    fn delay_threshold_is_strict() {
        let policy = DelayPolicy::default();
        // 10 * 1.18 = 11.8
        assert!(!policy.exceeds(10, 11));
        assert!(policy.exceeds(10, 12));
        // 25 * 1.18 = 29.5
        assert!(!policy.exceeds(25, 29));
        assert!(policy.exceeds(25, 30));
    }

    #[test]
    fn strict_policy_has_no_noise() {
        let policy = DelayPolicy::strict(1.5);
        assert_eq!(policy.clear_probability, 0.0);
        assert!(policy.exceeds(10, 16));
        assert!(!policy.exceeds(10, 15));
    }

    #[test]
    fn shared_tasks_belong_to_both_phases() {
        for task in ["Opening doors", "Refueling"] {
            assert!(TaskPhase::Arrival.contains(task));
            assert!(TaskPhase::Departure.contains(task));
        }
        assert!(!TaskPhase::Arrival.contains("Cabin cleaning"));
        assert!(!TaskPhase::Departure.contains("Removing chocks"));
    }

    #[test]
    fn vec_is_a_data_provider() {
        let rows = vec![record(), record()];
        assert_eq!(DataProvider::records(&rows).len(), 2);
    }

    #[test]
    fn no_data_message() {
        assert_eq!(RenderError::NoData.to_string(), "No Information");
    }
}
