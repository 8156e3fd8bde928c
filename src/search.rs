// Lusakey — Search / filter engine
//
// Linear rescan of the cached snapshot on every query: a record matches when
// the lower-cased query is a substring of its site, login, or (if present)
// url. Matches keep the snapshot's order.

use crate::store::Record;

/// Filter `records` by `query`. An empty query returns every record.
pub fn search<'a>(query: &str, records: &'a [Record]) -> Vec<&'a Record> {
    if query.is_empty() {
        return records.iter().collect();
    }

    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| matches(record, &needle))
        .collect()
}

/// `needle` must already be lower-cased.
fn matches(record: &Record, needle: &str) -> bool {
    record.site.to_lowercase().contains(needle)
        || record.login.to_lowercase().contains(needle)
        || record
            .url
            .as_deref()
            .is_some_and(|url| url.to_lowercase().contains(needle))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
