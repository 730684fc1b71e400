//! Dashboard selectors: which tab is shown and which rows are kept.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::{FlightNumber, TailNumber, TaskPhase};

/// Selector parse error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("unknown view '{0}' (expected all, departure or arrival)")]
    UnknownView(String),

    #[error("unknown date scope '{0}' (expected all, today or yesterday)")]
    UnknownDateScope(String),
}

// ============================================================================
// View
// ============================================================================

/// Dashboard tab: which task columns are shown
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    All,
    Departure,
    Arrival,
}

impl View {
    /// Tabs in the order they are shown
    pub const TABS: [View; 3] = [View::All, View::Departure, View::Arrival];

    /// The single phase this view is restricted to, if any
    pub fn phase(self) -> Option<TaskPhase> {
        match self {
            View::All => None,
            View::Departure => Some(TaskPhase::Departure),
            View::Arrival => Some(TaskPhase::Arrival),
        }
    }

    /// Whether rows for the named task are part of this view
    pub fn includes_task(self, task: &str) -> bool {
        match self.phase() {
            Some(phase) => phase.contains(task),
            None => TaskPhase::Arrival.contains(task) || TaskPhase::Departure.contains(task),
        }
    }

    /// Tab caption
    pub fn label(self) -> &'static str {
        match self {
            View::All => "All",
            View::Departure => "Departure",
            View::Arrival => "Arrival",
        }
    }

    /// Query-string key
    pub fn as_str(self) -> &'static str {
        match self {
            View::All => "all",
            View::Departure => "departure",
            View::Arrival => "arrival",
        }
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(View::All),
            "departure" => Ok(View::Departure),
            "arrival" => Ok(View::Arrival),
            _ => Err(SelectorError::UnknownView(s.to_string())),
        }
    }
}

// ============================================================================
// Date Scope
// ============================================================================

/// Date restriction applied to scheduled arrival/departure days
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateScope {
    #[default]
    AllDates,
    Today,
    Yesterday,
}

impl DateScope {
    /// Options in the order they are shown
    pub const CHOICES: [DateScope; 3] = [DateScope::AllDates, DateScope::Today, DateScope::Yesterday];

    /// The calendar day rows must touch, or `None` for no restriction
    pub fn target_day(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            DateScope::AllDates => None,
            DateScope::Today => Some(today),
            DateScope::Yesterday => today.checked_sub_days(Days::new(1)),
        }
    }

    /// Select-box caption
    pub fn label(self) -> &'static str {
        match self {
            DateScope::AllDates => "All dates",
            DateScope::Today => "Today",
            DateScope::Yesterday => "Yesterday",
        }
    }

    /// Query-string key
    pub fn as_str(self) -> &'static str {
        match self {
            DateScope::AllDates => "all",
            DateScope::Today => "today",
            DateScope::Yesterday => "yesterday",
        }
    }
}

impl std::fmt::Display for DateScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateScope {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "all-dates" | "all dates" | "alldates" => Ok(DateScope::AllDates),
            "today" => Ok(DateScope::Today),
            "yesterday" => Ok(DateScope::Yesterday),
            _ => Err(SelectorError::UnknownDateScope(s.to_string())),
        }
    }
}

// ============================================================================
// Selection
// ============================================================================

/// Row filter chosen in the dashboard widgets
///
/// An empty aircraft or flight list places no restriction on that field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub scope: DateScope,
    pub aircraft: Vec<TailNumber>,
    pub flights: Vec<FlightNumber>,
}

impl Selection {
    pub fn new(scope: DateScope) -> Self {
        Self {
            scope,
            ..Self::default()
        }
    }

    /// Restrict to the given aircraft
    pub fn aircraft<I, S>(mut self, aircraft: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TailNumber>,
    {
        self.aircraft = aircraft.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict to the given flights
    pub fn flights<I, S>(mut self, flights: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FlightNumber>,
    {
        self.flights = flights.into_iter().map(Into::into).collect();
        self
    }

    pub fn allows_aircraft(&self, tail: &str) -> bool {
        self.aircraft.is_empty() || self.aircraft.iter().any(|a| a == tail)
    }

    pub fn allows_flight(&self, flight: &str) -> bool {
        self.flights.is_empty() || self.flights.iter().any(|f| f == flight)
    }
}
