//! Listing filters and query-string parsing

use serde::Deserialize;

use super::pagination::DEFAULT_LIMIT;
use super::{FinancialRecord, Pagination, RecordType};

/// Optional match criteria for a listing. `None` means "match all" for that
/// criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Case-insensitive substring of `member_name`
    pub member_name: Option<String>,
    /// Exact record type value. Anything other than `income` or `expense`
    /// is kept as given and matches no record.
    pub record_type: Option<String>,
    /// Exact location
    pub location: Option<String>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn member_name(mut self, value: impl Into<String>) -> Self {
        self.member_name = non_empty(Some(value.into()));
        self
    }

    pub fn record_type(mut self, value: RecordType) -> Self {
        self.record_type = Some(value.as_str().to_string());
        self
    }

    pub fn location(mut self, value: impl Into<String>) -> Self {
        self.location = non_empty(Some(value.into()));
        self
    }

    /// Reference semantics of the filter, used directly by in-memory stores
    /// and mirrored by SQL translation.
    pub fn matches(&self, record: &FinancialRecord) -> bool {
        if let Some(needle) = &self.member_name {
            let haystack = record.member_name.to_lowercase();
            if !haystack.contains(&needle.to_lowercase()) {
                return false;
            }
        }

        if let Some(kind) = &self.record_type {
            if record.record_type.as_str() != kind {
                return false;
            }
        }

        if let Some(location) = &self.location {
            if &record.location != location {
                return false;
            }
        }

        true
    }
}

/// Raw query-string parameters for `GET /financial-records`.
///
/// Kept as strings so blank or unparsable paging values fall back to defaults
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub member_name: Option<String>,
    pub record_type: Option<String>,
    pub location: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListQuery {
    /// Build the filter. Blank values are treated as absent. A record type
    /// outside `income`/`expense` is an exact match that finds nothing.
    pub fn filter(&self) -> RecordFilter {
        RecordFilter {
            member_name: non_empty(self.member_name.clone()),
            record_type: non_empty(self.record_type.clone()),
            location: non_empty(self.location.clone()),
        }
    }

    /// Page window; missing or unparsable values use page 1 and limit 20.
    ///
    /// `limit` is capped at `MAX_LIMIT` (100). A larger request is served
    /// 100 records and the response reports `limit: 100`.
    pub fn pagination(&self) -> Pagination {
        let page = parse_positive(self.page.as_deref()).unwrap_or(1);
        let limit = parse_positive(self.limit.as_deref()).unwrap_or(DEFAULT_LIMIT);
        Pagination::new(page, limit)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse an integer, mapping non-positive values to 0 so clamping applies.
fn parse_positive(raw: Option<&str>) -> Option<u32> {
    let n: i64 = raw?.trim().parse().ok()?;
    Some(n.clamp(0, u32::MAX as i64) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreatorId, NewRecord};
    use chrono::Utc;
    use uuid::Uuid;

    fn record(member: &str, kind: RecordType, location: &str) -> FinancialRecord {
        FinancialRecord::from_new(
            NewRecord {
                record_type: kind,
                member_name: member.into(),
                item: "Tea".into(),
                details: None,
                location: location.into(),
                unit_price: 5.0,
                quantity: 2,
                record_date: Utc::now(),
                created_by: CreatorId::new("64b7f0c2a1b2c3d4e5f60718").unwrap(),
            },
            Uuid::new_v4(),
            Utc::now(),
        )
    }

    fn query(pairs: &[(&str, &str)]) -> ListQuery {
        let mut q = ListQuery::default();
        for (k, v) in pairs {
            let v = Some(v.to_string());
            match *k {
                "memberName" => q.member_name = v,
                "recordType" => q.record_type = v,
                "location" => q.location = v,
                "page" => q.page = v,
                "limit" => q.limit = v,
                _ => unreachable!(),
            }
        }
        q
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = RecordFilter::new();
        assert_eq!(filter, RecordFilter::default());
        assert!(filter.matches(&record("Ann", RecordType::Income, "Central")));
        assert!(filter.matches(&record("Bob", RecordType::Expense, "Mong Kok")));
    }

    #[test]
    fn member_name_is_case_insensitive_substring() {
        let filter = RecordFilter::new().member_name("TAI");
        assert!(filter.matches(&record("Chan Tai Man", RecordType::Income, "Central")));
        assert!(!filter.matches(&record("Wong Siu Ming", RecordType::Income, "Central")));
    }

    #[test]
    fn member_name_is_literal_not_a_pattern() {
        let filter = RecordFilter::new().member_name(".*");
        assert!(!filter.matches(&record("Ann", RecordType::Income, "Central")));
        assert!(filter.matches(&record("Ann.*", RecordType::Income, "Central")));
    }

    #[test]
    fn location_is_exact() {
        let filter = RecordFilter::new().location("Central");
        assert!(filter.matches(&record("Ann", RecordType::Income, "Central")));
        assert!(!filter.matches(&record("Ann", RecordType::Income, "central")));
        assert!(!filter.matches(&record("Ann", RecordType::Income, "Central East")));
    }

    #[test]
    fn record_type_is_exact() {
        let filter = RecordFilter::new().record_type(RecordType::Income);
        assert!(filter.matches(&record("Ann", RecordType::Income, "Central")));
        assert!(!filter.matches(&record("Ann", RecordType::Expense, "Central")));
    }

    #[test]
    fn blank_params_are_absent() {
        let filter = query(&[("memberName", ""), ("recordType", " "), ("location", "")]).filter();
        assert_eq!(filter, RecordFilter::new());
        assert!(filter.matches(&record("Ann", RecordType::Expense, "Central")));
    }

    #[test]
    fn unknown_record_type_matches_nothing() {
        for raw in ["refund", "Income", "EXPENSE"] {
            let filter = query(&[("recordType", raw)]).filter();
            assert_eq!(filter.record_type.as_deref(), Some(raw));
            assert!(!filter.matches(&record("Ann", RecordType::Income, "Central")));
            assert!(!filter.matches(&record("Ann", RecordType::Expense, "Central")));
        }
    }

    #[test]
    fn builds_combined_filter() {
        let filter =
            query(&[("memberName", "chan"), ("recordType", "expense"), ("location", "Central")])
                .filter();
        assert_eq!(filter.member_name.as_deref(), Some("chan"));
        assert_eq!(filter.record_type.as_deref(), Some("expense"));
        assert_eq!(filter.location.as_deref(), Some("Central"));
    }

    #[test]
    fn pagination_defaults_and_fallbacks() {
        assert_eq!(ListQuery::default().pagination(), Pagination::new(1, 20));
        assert_eq!(
            query(&[("page", "abc"), ("limit", "")]).pagination(),
            Pagination::new(1, 20)
        );
        assert_eq!(
            query(&[("page", "3"), ("limit", "5")]).pagination(),
            Pagination::new(3, 5)
        );
    }

    #[test]
    fn pagination_clamps_out_of_range() {
        let p = query(&[("page", "-4"), ("limit", "0")]).pagination();
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, 1);

        let p = query(&[("limit", "5000")]).pagination();
        assert_eq!(p.limit, 100);
    }
}
