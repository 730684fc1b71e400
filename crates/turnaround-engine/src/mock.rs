//! Synthetic task dataset
//!
//! Generates a reproducible set of flights with one [`TaskRecord`] per task in
//! each catalogue. The reference time is supplied by the caller so the same
//! seed and the same `now` always produce the same records.
//!
//! Per flight:
//! - base day is `now` (60%) or one day earlier (40%)
//! - scheduled arrival is 30-180 minutes before the base time, scheduled
//!   departure 30-180 minutes after it
//! - each task gets an estimate of 5-25 minutes and an actual duration drawn
//!   from a normal distribution centred slightly below the estimate
//! - arrival tasks start 0-10 minutes after arrival, departure tasks 10-30
//!   minutes before departure

use chrono::{Duration, NaiveDateTime, Timelike};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use tracing::debug;
use turnaround_core::{DataConfig, DelayPolicy, TaskPhase, TaskRecord, MAX_FLIGHTS};

const TAIL_PREFIXES: [&str; 4] = ["A", "B", "C", "D"];
const FLIGHT_PREFIXES: [&str; 5] = ["TA", "AC", "UA", "KL", "AZ"];

/// Standard deviation of actual task duration, in minutes
const ACTUAL_SPREAD: f64 = 3.0;

/// Seeded generator of demo task data
#[derive(Clone, Debug)]
pub struct MockGenerator {
    pub seed: u64,
    pub flights: usize,
    pub delay: DelayPolicy,
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new(42)
    }
}

impl MockGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            flights: 16,
            delay: DelayPolicy::default(),
        }
    }

    /// Generator configured from the `[data]` and `[delay]` config sections
    pub fn from_config(data: &DataConfig, delay: DelayPolicy) -> Self {
        Self {
            seed: data.seed,
            flights: data.flights,
            delay,
        }
    }

    /// Number of synthetic flights
    pub fn flights(mut self, flights: usize) -> Self {
        self.flights = flights;
        self
    }

    /// Delay rule applied after generation
    pub fn delay_policy(mut self, delay: DelayPolicy) -> Self {
        self.delay = delay;
        self
    }

    /// Build the dataset relative to `now` (truncated to whole seconds)
    ///
    /// At most [`MAX_FLIGHTS`] flights are generated.
    pub fn generate(&self, now: NaiveDateTime) -> Vec<TaskRecord> {
        let flights = self.flights.min(MAX_FLIGHTS);
        let now = now.with_nanosecond(0).unwrap_or(now);
        let mut rng = StdRng::seed_from_u64(self.seed);
        let per_flight = TaskPhase::Arrival.tasks().len() + TaskPhase::Departure.tasks().len();
        let mut records = Vec::with_capacity(flights * per_flight);

        for _ in 0..flights {
            let aircraft = random_tail(&mut rng);
            let flight = random_flight(&mut rng);

            let day_shift = if rng.gen::<f64>() < 0.6 { 0 } else { 1 };
            let base = now - Duration::days(day_shift);
            let arrival = base - Duration::minutes(rng.gen_range(30..=180));
            let departure = base + Duration::minutes(rng.gen_range(30..=180));

            for phase in [TaskPhase::Arrival, TaskPhase::Departure] {
                for task in phase.tasks() {
                    let estimated = rng.gen_range(5..=25_u32);
                    let actual = sample_actual(&mut rng, estimated);
                    let started_at = match phase {
                        TaskPhase::Arrival => arrival + Duration::minutes(rng.gen_range(0..=10)),
                        TaskPhase::Departure => departure - Duration::minutes(rng.gen_range(10..=30)),
                    };
                    let completed_at = started_at + Duration::minutes(i64::from(actual));

                    records.push(TaskRecord {
                        flight: flight.clone(),
                        aircraft: aircraft.clone(),
                        task: (*task).to_string(),
                        phase,
                        scheduled_arrival: arrival,
                        scheduled_departure: departure,
                        started_at,
                        completed_at,
                        estimated_minutes: estimated,
                        actual_minutes: actual,
                        delayed: false,
                    });
                }
            }
        }

        self.apply_delay_flags(&mut rng, &mut records);

        debug!(
            seed = self.seed,
            flights,
            records = records.len(),
            delayed = records.iter().filter(|r| r.delayed).count(),
            "generated mock task data"
        );
        records
    }

    /// Flag over-threshold tasks, then randomly clear some flags again.
    ///
    /// One sample is drawn per record regardless of its flag so the random
    /// sequence does not depend on the threshold.
    fn apply_delay_flags(&self, rng: &mut StdRng, records: &mut [TaskRecord]) {
        for record in records.iter_mut() {
            record.delayed = self
                .delay
                .exceeds(record.estimated_minutes, record.actual_minutes);
        }
        for record in records.iter_mut() {
            let clear = rng.gen::<f64>() < self.delay.clear_probability;
            if record.delayed && clear {
                record.delayed = false;
            }
        }
    }
}

fn random_tail(rng: &mut StdRng) -> String {
    let prefix = TAIL_PREFIXES[rng.gen_range(0..TAIL_PREFIXES.len())];
    format!("{prefix}{}", rng.gen_range(1000..=9999))
}

fn random_flight(rng: &mut StdRng) -> String {
    let prefix = FLIGHT_PREFIXES[rng.gen_range(0..FLIGHT_PREFIXES.len())];
    format!("{prefix}{}", rng.gen_range(100..=999))
}

/// Actual duration: normal around 95% of the estimate, at least one minute
fn sample_actual(rng: &mut StdRng, estimated: u32) -> u32 {
    let mean = (f64::from(estimated) * 0.95).trunc();
    let sample = Normal::new(mean, ACTUAL_SPREAD).map_or(mean, |normal| normal.sample(rng));
    sample.trunc().max(1.0) as u32
}
