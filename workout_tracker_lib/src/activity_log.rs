use tracing::debug;

use crate::{
    error::{Result, WorkoutError},
    workout::{WorkoutId, WorkoutRecord},
};

/// All workouts logged this session, in the order they were added.
///
/// Append only. Lookups scan linearly since a session holds a handful of entries.
#[derive(Debug, Default, Clone)]
pub struct ActivityLog {
    records: Vec<WorkoutRecord>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: WorkoutRecord) -> Result<&WorkoutRecord> {
        if self.contains(record.id()) {
            return Err(WorkoutError::DuplicateId(record.id().clone()));
        }

        debug!(id = %record.id(), title = record.title(), "Appending workout");
        self.records.push(record);

        // Just pushed, so never empty
        Ok(&self.records[self.records.len() - 1])
    }

    pub fn find_by_id(&self, id: &WorkoutId) -> Result<&WorkoutRecord> {
        self.records
            .iter()
            .find(|record| record.id() == id)
            .ok_or_else(|| WorkoutError::NotFound(id.clone()))
    }

    pub fn contains(&self, id: &WorkoutId) -> bool {
        self.records.iter().any(|record| record.id() == id)
    }

    pub fn all(&self) -> &[WorkoutRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkoutRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;
    use crate::workout::WorkoutKind;

    fn at_second(second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 14, 9, 30, second).unwrap()
    }

    fn run(second: u32) -> WorkoutRecord {
        WorkoutRecord::new_at((10., 20.).into(), 5., 25., WorkoutKind::Running, 150., at_second(second)).unwrap()
    }

    #[test]
    fn append_then_find_returns_equal_record() {
        let mut log = ActivityLog::new();
        let record = run(0);
        log.append(record.clone()).unwrap();

        assert_eq!(log.find_by_id(record.id()), Ok(&record));
    }

    #[test]
    fn find_unknown_id_is_not_found() {
        let mut log = ActivityLog::new();
        log.append(run(0)).unwrap();

        let missing = WorkoutId::from("0000000000");
        assert_eq!(log.find_by_id(&missing), Err(WorkoutError::NotFound(missing.clone())));
    }

    #[test]
    fn preserves_insertion_order() {
        let mut log = ActivityLog::new();
        let records = [run(3), run(1), run(2)];
        for record in &records {
            log.append(record.clone()).unwrap();
        }

        assert_eq!(log.all(), &records);
        assert_eq!(log.iter().map(|r| r.id().clone()).collect::<Vec<_>>(), records.iter().map(|r| r.id().clone()).collect::<Vec<_>>());
    }

    #[test]
    fn rejects_duplicate_ids_without_growing() {
        let mut log = ActivityLog::new();
        let record = run(0);
        log.append(record.clone()).unwrap();

        assert_eq!(log.append(record.clone()), Err(WorkoutError::DuplicateId(record.id().clone())));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn starts_empty() {
        let log = ActivityLog::new();
        assert!(log.is_empty());
        assert!(log.all().is_empty());
    }
}
