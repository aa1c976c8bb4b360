use crate::api::types::ExperienceRecord;

/// Case-insensitive substring match on company, college or hiring year.
/// `folded_query` must already be lower-cased.
pub fn matches(record: &ExperienceRecord, folded_query: &str) -> bool {
    record.company_name.to_lowercase().contains(folded_query)
        || record.college_name.to_lowercase().contains(folded_query)
        || record
            .year_of_hiring
            .to_string()
            .to_lowercase()
            .contains(folded_query)
}

/// Records matching `query`, in their original order. An empty query keeps
/// every record.
pub fn filter_records(records: &[ExperienceRecord], query: &str) -> Vec<ExperienceRecord> {
    if query.is_empty() {
        return records.to_vec();
    }
    let folded = query.to_lowercase();
    records
        .iter()
        .filter(|r| matches(r, &folded))
        .cloned()
        .collect()
}
