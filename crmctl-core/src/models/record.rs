//! Financial record entities

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CreatorId, CreatorRef, PageInfo, RecordStats, ValidationError};

/// Whether a record brings money in or sends it out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Income,
    Expense,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = ValidationError;

    /// Exact, case-sensitive match against the stored values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(ValidationError::InvalidVariant {
                field: "recordType",
                value: other.to_string(),
            }),
        }
    }
}

/// A validated record ready to be persisted.
///
/// The store assigns `id`, `created_at` and `updated_at`, and derives
/// `total_amount`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub record_type: RecordType,
    pub member_name: String,
    pub item: String,
    pub details: Option<String>,
    pub location: String,
    pub unit_price: f64,
    pub quantity: i64,
    pub record_date: DateTime<Utc>,
    pub created_by: CreatorId,
}

impl NewRecord {
    /// `unit_price × quantity`
    pub fn total_amount(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

/// A persisted financial record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecord {
    pub id: Uuid,
    pub record_type: RecordType,
    pub member_name: String,
    pub item: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub location: String,
    pub unit_price: f64,
    pub quantity: i64,
    pub total_amount: f64,
    pub record_date: DateTime<Utc>,
    pub created_by: CreatorId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FinancialRecord {
    /// Materialize a new record as a store would: assign identity and
    /// timestamps, derive the total.
    pub fn from_new(record: NewRecord, id: Uuid, now: DateTime<Utc>) -> Self {
        let total_amount = record.total_amount();
        Self {
            id,
            record_type: record.record_type,
            member_name: record.member_name,
            item: record.item,
            details: record.details,
            location: record.location,
            unit_price: record.unit_price,
            quantity: record.quantity,
            total_amount,
            record_date: record.record_date,
            created_by: record.created_by,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A record as returned by listings, with its creator mapped to a display
/// identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedRecord {
    pub id: Uuid,
    pub record_type: RecordType,
    pub member_name: String,
    pub item: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub location: String,
    pub unit_price: f64,
    pub quantity: i64,
    pub total_amount: f64,
    pub record_date: DateTime<Utc>,
    pub created_by: CreatorRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ListedRecord {
    pub fn new(record: FinancialRecord, created_by: CreatorRef) -> Self {
        Self {
            id: record.id,
            record_type: record.record_type,
            member_name: record.member_name,
            item: record.item,
            details: record.details,
            location: record.location,
            unit_price: record.unit_price,
            quantity: record.quantity,
            total_amount: record.total_amount,
            record_date: record.record_date,
            created_by,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// One page of a filtered listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordPage {
    pub records: Vec<ListedRecord>,
    pub pagination: PageInfo,
    pub stats: RecordStats,
}
