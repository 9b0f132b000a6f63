use filedeck_model::FileRecord;

#[derive(Debug, Clone, Default)]
pub struct Selection {
    current: Option<FileRecord>,
}

impl Selection {
    pub fn select(&mut self, record: FileRecord) {
        self.current = Some(record);
    }

    pub fn current(&self) -> Option<&FileRecord> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Drops the selection when its id left the result set. Returns true if it was cleared.
    pub fn on_result_set_changed(&mut self, results: &[FileRecord]) -> bool {
        let Some(selected) = &self.current else {
            return false;
        };

        if results.iter().any(|record| record.id == selected.id) {
            return false;
        }

        tracing::debug!(id = %selected.id, "selection left result set");
        self.current = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str) -> FileRecord {
        FileRecord {
            id: id.to_string(),
            name: name.to_string(),
            path: format!("/path/{name}"),
            size: 0,
            file_type: "md".to_string(),
            modified_unix_ms: 0,
            tags: Vec::new(),
        }
    }

    #[test]
    fn select_replaces_unconditionally() {
        let mut selection = Selection::default();
        selection.select(record("1", "a.md"));
        selection.select(record("2", "b.md"));
        assert_eq!(selection.current().map(|r| r.id.as_str()), Some("2"));
    }

    #[test]
    fn result_set_without_selected_id_clears() {
        let mut selection = Selection::default();
        selection.select(record("1", "a.md"));

        assert!(selection.on_result_set_changed(&[record("2", "b.md")]));
        assert!(selection.current().is_none());
    }

    #[test]
    fn result_set_with_selected_id_keeps_picked_record() {
        let mut selection = Selection::default();
        selection.select(record("1", "a.md"));

        let renamed = record("1", "renamed.md");
        assert!(!selection.on_result_set_changed(&[renamed, record("3", "c.md")]));
        assert_eq!(selection.current().map(|r| r.name.as_str()), Some("a.md"));
    }

    #[test]
    fn empty_selection_is_untouched() {
        let mut selection = Selection::default();
        assert!(!selection.on_result_set_changed(&[]));
    }
}
