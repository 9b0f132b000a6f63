mod backend;
mod filter;
mod matcher;

pub use backend::{BackendError, MemoryBackend, SearchBackend, SearchRequest};
pub use filter::{build_predicate, build_predicate_at, FilterPredicate, TimeWindow};
pub use matcher::{match_records, name_matches, normalize_query};

use filedeck_model::{FileRecord, FilterCriteria};

/// Produces the displayed result set: text match first, then the local filters.
pub fn compose_results(
    candidates: &[FileRecord],
    query: &str,
    criteria: &FilterCriteria,
) -> Vec<FileRecord> {
    let predicate = build_predicate(criteria);
    apply_predicate(match_records(candidates, query), &predicate)
}

pub fn apply_predicate(records: Vec<FileRecord>, predicate: &FilterPredicate) -> Vec<FileRecord> {
    if predicate.is_unrestricted() {
        return records;
    }

    records
        .into_iter()
        .filter(|record| predicate.accepts(record))
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use filedeck_model::FileRecord;

    pub(crate) fn record(id: &str, name: &str, file_type: &str, tags: &[&str]) -> FileRecord {
        FileRecord {
            id: id.to_string(),
            name: name.to_string(),
            path: format!("/path/{name}"),
            size: 1024,
            file_type: file_type.to_string(),
            modified_unix_ms: 0,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::record;
    use super::*;
    use filedeck_model::DateRange;

    #[test]
    fn text_match_then_filter_narrows_both_ways() {
        let records = vec![
            record("1", "design-spec.md", "md", &["docs"]),
            record("2", "invoice.pdf", "pdf", &["finance"]),
            record("3", "design-invoice.pdf", "pdf", &["docs"]),
        ];

        let mut criteria = FilterCriteria::default();
        criteria.toggle_type("PDF");

        let results = compose_results(&records, "design", &criteria);
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["3"]);
    }

    #[test]
    fn unrestricted_criteria_keep_matcher_output() {
        let records = vec![
            record("1", "a.md", "md", &[]),
            record("2", "b.pdf", "pdf", &[]),
        ];
        let criteria = FilterCriteria::with_date_range(DateRange::Any);
        assert_eq!(compose_results(&records, "", &criteria), records);
    }
}
