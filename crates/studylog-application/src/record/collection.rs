use studylog_core::record::{Record, RecordId};

/// Ordered, id-unique list of records with their cached total.
///
/// The total is recomputed from the whole list after every mutation, so it
/// always equals the sum of the durations it holds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordCollection {
    records: Vec<Record>,
    total: f64,
}

impl RecordCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, id: &RecordId) -> Option<usize> {
        self.records.iter().position(|r| &r.id == id)
    }

    /// Replaces the whole list. Later duplicates of an id are dropped.
    pub fn replace(&mut self, records: impl IntoIterator<Item = Record>) {
        self.records.clear();
        for record in records {
            if self.position(&record.id).is_some() {
                tracing::warn!("[RecordCollection] dropping duplicate id {}", record.id);
                continue;
            }
            self.records.push(record);
        }
        self.recompute();
    }

    /// Appends a record. An id already present is overwritten in place.
    pub fn push(&mut self, record: Record) {
        match self.position(&record.id) {
            Some(index) => {
                tracing::warn!(
                    "[RecordCollection] id {} already held, replacing in place",
                    record.id
                );
                self.records[index] = record;
            }
            None => self.records.push(record),
        }
        self.recompute();
    }

    /// Overwrites title and duration of the record keyed by `id`.
    ///
    /// Returns the updated record, or `None` when no record has that id.
    pub fn update(&mut self, id: &RecordId, title: String, duration: f64) -> Option<Record> {
        let index = self.position(id)?;
        let record = &mut self.records[index];
        record.title = title;
        record.duration = duration;
        let updated = record.clone();
        self.recompute();
        Some(updated)
    }

    /// Removes the record keyed by `id`, returning it with its former index.
    pub fn remove(&mut self, id: &RecordId) -> Option<(usize, Record)> {
        let index = self.position(id)?;
        let record = self.records.remove(index);
        self.recompute();
        Some((index, record))
    }

    /// Puts a record back at `index` (clamped to the current length).
    pub fn restore(&mut self, index: usize, record: Record) {
        if self.position(&record.id).is_some() {
            return;
        }
        let index = index.min(self.records.len());
        self.records.insert(index, record);
        self.recompute();
    }

    fn recompute(&mut self) {
        self.total = self.records.iter().map(|r| r.duration).sum();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecordCollection {
        let mut collection = RecordCollection::new();
        collection.replace(vec![
            Record::new("1", "Math", 3.0),
            Record::new("2", "Physics", 0.0),
            Record::new("3", "Chemistry", 5.0),
        ]);
        collection
    }

    fn sum(collection: &RecordCollection) -> f64 {
        collection.records().iter().map(|r| r.duration).sum()
    }

    #[test]
    fn test_replace_computes_total() {
        let collection = sample();
        assert_eq!(collection.len(), 3);
        assert_eq!(collection.total(), 8.0);
    }

    #[test]
    fn test_replace_discards_previous_contents() {
        let mut collection = sample();
        collection.replace(vec![Record::new("9", "Music", 1.5)]);
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.total(), 1.5);
    }

    #[test]
    fn test_replace_keeps_first_of_duplicate_ids() {
        let mut collection = RecordCollection::new();
        collection.replace(vec![Record::new("1", "Math", 3.0), Record::new("1", "Copy", 7.0)]);
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.records()[0].title, "Math");
        assert_eq!(collection.total(), 3.0);
    }

    #[test]
    fn test_push_appends_to_end() {
        let mut collection = sample();
        collection.push(Record::new("4", "History", 2.0));
        assert_eq!(collection.records().last().map(|r| r.id.as_str()), Some("4"));
        assert_eq!(collection.total(), 10.0);
    }

    #[test]
    fn test_push_existing_id_replaces_in_place() {
        let mut collection = sample();
        collection.push(Record::new("2", "Physics II", 4.0));
        assert_eq!(collection.len(), 3);
        assert_eq!(collection.records()[1].title, "Physics II");
        assert_eq!(collection.total(), 12.0);
    }

    #[test]
    fn test_update_recomputes_total() {
        let mut collection = sample();
        let updated = collection
            .update(&RecordId::new("1"), "Math II".to_string(), 4.0)
            .unwrap();
        assert_eq!(updated.title, "Math II");
        assert_eq!(collection.total(), 9.0);
        assert_eq!(collection.total(), sum(&collection));
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut collection = sample();
        let before = collection.clone();
        assert!(collection.update(&RecordId::new("x"), "X".to_string(), 1.0).is_none());
        assert_eq!(collection, before);
    }

    #[test]
    fn test_remove_and_restore_position() {
        let mut collection = sample();
        let (index, record) = collection.remove(&RecordId::new("2")).unwrap();
        assert_eq!(index, 1);
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.total(), 8.0);

        collection.restore(index, record);
        assert_eq!(collection, sample());
    }

    #[test]
    fn test_remove_unknown_id() {
        let mut collection = sample();
        assert!(collection.remove(&RecordId::new("nope")).is_none());
        assert_eq!(collection.total(), 8.0);
    }

    #[test]
    fn test_total_matches_sum_after_mixed_operations() {
        let mut collection = RecordCollection::new();
        collection.push(Record::new("a", "A", 0.25));
        collection.push(Record::new("b", "B", 1.75));
        collection.update(&RecordId::new("a"), "A".to_string(), 2.5);
        collection.remove(&RecordId::new("b"));
        collection.push(Record::new("c", "C", 0.5));
        assert_eq!(collection.total(), sum(&collection));
        assert_eq!(collection.total(), 3.0);
    }
}
