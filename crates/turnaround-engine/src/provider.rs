//! In-memory data provider

use chrono::NaiveDateTime;
use tracing::info;
use turnaround_core::{DataProvider, TaskRecord};

use crate::mock::MockGenerator;

/// Owns the base dataset for the lifetime of the process
#[derive(Clone, Debug)]
pub struct InMemoryProvider {
    records: Vec<TaskRecord>,
    generated_at: Option<NaiveDateTime>,
}

impl InMemoryProvider {
    /// Generate the dataset once, relative to `now`
    pub fn generate(generator: MockGenerator, now: NaiveDateTime) -> Self {
        let records = generator.generate(now);
        info!(records = records.len(), %now, "base dataset generated");
        Self {
            records,
            generated_at: Some(now),
        }
    }

    /// Wrap an existing record set
    pub fn from_records(records: Vec<TaskRecord>) -> Self {
        Self {
            records,
            generated_at: None,
        }
    }

    /// Reference time the dataset was generated for
    pub fn generated_at(&self) -> Option<NaiveDateTime> {
        self.generated_at
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl DataProvider for InMemoryProvider {
    fn records(&self) -> &[TaskRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn generated_provider_exposes_records() {
        let provider = InMemoryProvider::generate(MockGenerator::new(5).flights(2), now());
        assert_eq!(provider.len(), 38);
        assert_eq!(provider.records().len(), 38);
        assert_eq!(provider.generated_at(), Some(now()));
    }

    #[test]
    fn later_reference_time_shifts_schedule() {
        let generator = MockGenerator::new(5).flights(2);
        let before = InMemoryProvider::generate(generator.clone(), now());
        let later = now() + Duration::days(1);
        let after = InMemoryProvider::generate(generator, later);

        assert_eq!(after.generated_at(), Some(later));
        assert_eq!(after.len(), before.len());
        assert_eq!(
            after.records()[0].scheduled_arrival - before.records()[0].scheduled_arrival,
            Duration::days(1)
        );
    }

    #[test]
    fn fixed_records_have_no_reference_time() {
        let provider = InMemoryProvider::from_records(Vec::new());
        assert!(provider.is_empty());
        assert_eq!(provider.generated_at(), None);
    }
}
