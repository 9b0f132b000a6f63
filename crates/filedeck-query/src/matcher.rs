use filedeck_model::FileRecord;

pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

pub fn name_matches(name: &str, normalized_query: &str) -> bool {
    if normalized_query.is_empty() {
        return true;
    }

    name.to_lowercase().contains(normalized_query)
}

/// Keeps every record whose name contains `query`, ignoring case. Input order is preserved.
pub fn match_records(records: &[FileRecord], query: &str) -> Vec<FileRecord> {
    let normalized = normalize_query(query);
    if normalized.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|record| name_matches(&record.name, &normalized))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;

    fn sample() -> Vec<FileRecord> {
        vec![
            record("1", "design-spec.md", "md", &["docs"]),
            record("2", "invoice.pdf", "pdf", &["finance"]),
            record("3", "Spec-Review.TXT", "txt", &[]),
            record("4", "notes.md", "md", &[]),
        ]
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let records = sample();
        assert_eq!(match_records(&records, ""), records);
        assert_eq!(match_records(&records, "   "), records);
    }

    #[test]
    fn match_is_case_insensitive_and_trimmed() {
        let records = sample();
        let ids: Vec<String> = match_records(&records, "  SPEC ")
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn result_is_ordered_subsequence_with_exact_partition() {
        let records = sample();
        for query in ["", "e", "md", "pdf", "zzz", "SPEC", "."] {
            let matched = match_records(&records, query);
            let normalized = normalize_query(query);

            let mut cursor = 0;
            for hit in &matched {
                let offset = records[cursor..]
                    .iter()
                    .position(|r| r.id == hit.id)
                    .expect("hit should appear later in input");
                cursor += offset + 1;
            }

            for record in &records {
                let kept = matched.iter().any(|m| m.id == record.id);
                assert_eq!(kept, record.name.to_lowercase().contains(&normalized));
            }
        }
    }

    #[test]
    fn matches_only_on_name_not_path_or_tags() {
        let records = vec![record("1", "report.pdf", "pdf", &["finance"])];
        assert!(match_records(&records, "finance").is_empty());
        assert!(match_records(&records, "path").is_empty());
    }

    #[test]
    fn unicode_names_fold_case() {
        let records = vec![record("1", "ÜBERSICHT.md", "md", &[])];
        assert_eq!(match_records(&records, "übersicht").len(), 1);
    }
}
