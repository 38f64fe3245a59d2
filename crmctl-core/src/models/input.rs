//! Create-record request body and its validation

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;

use super::{CreatorId, NewRecord, RecordType, ValidationError};

/// Body of `POST /financial-records`, every field optional at the wire level
/// so that absence can be reported per field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordInput {
    pub record_type: Option<String>,
    pub member_name: Option<String>,
    pub item: Option<String>,
    pub details: Option<String>,
    pub location: Option<String>,
    pub unit_price: Option<f64>,
    pub quantity: Option<i64>,
    pub record_date: Option<String>,
    pub created_by: Option<String>,
}

impl CreateRecordInput {
    /// Validate into a `NewRecord`.
    ///
    /// Checks run in a fixed order: required fields, record type, numeric
    /// ranges (including a finite `unitPrice × quantity`), creator id, record
    /// date. The first failure is returned.
    /// `now` becomes the record date when none is supplied.
    pub fn validate(self, now: DateTime<Utc>) -> Result<NewRecord, ValidationError> {
        let record_type = required_text(self.record_type, "recordType")?;
        let member_name = required_text(self.member_name, "memberName")?;
        let item = required_text(self.item, "item")?;
        let location = required_text(self.location, "location")?;
        let unit_price = self
            .unit_price
            .ok_or(ValidationError::Missing { field: "unitPrice" })?;
        let quantity = self
            .quantity
            .ok_or(ValidationError::Missing { field: "quantity" })?;

        let record_type: RecordType = record_type.parse()?;

        if unit_price < 0.0 {
            return Err(ValidationError::Negative { field: "unitPrice" });
        }
        if quantity < 1 {
            return Err(ValidationError::BelowMinimum {
                field: "quantity",
                min: 1,
            });
        }
        if !(unit_price * quantity as f64).is_finite() {
            return Err(ValidationError::TooLarge { field: "totalAmount" });
        }

        let created_by = CreatorId::new(self.created_by.as_deref().unwrap_or_default().trim())?;

        let record_date = match self.record_date.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => parse_record_date(raw)?,
            _ => now,
        };

        let details = self
            .details
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(NewRecord {
            record_type,
            member_name,
            item,
            details,
            location,
            unit_price,
            quantity,
            record_date,
            created_by,
        })
    }
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ValidationError::Missing { field })
}

/// Accepts an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (UTC midnight).
fn parse_record_date(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(ValidationError::InvalidFormat {
        field: "recordDate",
        reason: "expected an RFC 3339 timestamp or a YYYY-MM-DD date",
    })
}
