//! Postgres record repository
//!
//! Translates `RecordFilter` into a WHERE clause with bound parameters and
//! runs listing, count, aggregate and insert queries.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crmctl_core::models::{
    CreatorId, FinancialRecord, NewRecord, Pagination, RecordFilter, RecordStats, RecordType,
};

use super::{RecordStore, StoreError};

const COLUMNS: &str = "id, record_type, member_name, item, details, location, unit_price, \
                       quantity, total_amount, record_date, created_by, created_at, updated_at";

/// Record repository over a shared pool
#[derive(Debug, Clone)]
pub struct RecordRepo {
    pool: PgPool,
}

impl RecordRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Append the WHERE clause for `filter`. Absent criteria add nothing.
pub(crate) fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &RecordFilter) {
    builder.push(" WHERE 1=1");
    if let Some(name) = &filter.member_name {
        builder.push(" AND member_name ILIKE ");
        builder.push_bind(format!("%{}%", escape_like(name)));
    }
    if let Some(kind) = &filter.record_type {
        builder.push(" AND record_type = ");
        builder.push_bind(kind.clone());
    }
    if let Some(location) = &filter.location {
        builder.push(" AND location = ");
        builder.push_bind(location.clone());
    }
}

/// Escape LIKE metacharacters so the member name matches literally.
fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn record_from_row(row: PgRow) -> Result<FinancialRecord, StoreError> {
    let id: Uuid = row.try_get("id")?;
    let corrupt = |reason: String| StoreError::Corrupt {
        id: id.to_string(),
        reason,
    };

    let record_type: String = row.try_get("record_type")?;
    let record_type = record_type
        .parse::<RecordType>()
        .map_err(|e| corrupt(format!("{e}")))?;
    let created_by: String = row.try_get("created_by")?;
    let created_by = CreatorId::new(&created_by).map_err(|e| corrupt(format!("{e}")))?;

    Ok(FinancialRecord {
        id,
        record_type,
        member_name: row.try_get("member_name")?,
        item: row.try_get("item")?,
        details: row.try_get("details")?,
        location: row.try_get("location")?,
        unit_price: row.try_get("unit_price")?,
        quantity: row.try_get("quantity")?,
        total_amount: row.try_get("total_amount")?,
        record_date: row.try_get("record_date")?,
        created_by,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl RecordStore for RecordRepo {
    async fn find(
        &self,
        filter: &RecordFilter,
        page: Pagination,
    ) -> Result<Vec<FinancialRecord>, StoreError> {
        let mut builder = QueryBuilder::new(format!("SELECT {COLUMNS} FROM financial_records"));
        push_filter(&mut builder, filter);
        builder.push(" ORDER BY record_date DESC, created_at DESC LIMIT ");
        builder.push_bind(page.limit() as i64);
        builder.push(" OFFSET ");
        builder.push_bind(page.skip() as i64);

        let rows = builder.build().fetch_all(&self.pool).await?;
        rows.into_iter().map(record_from_row).collect()
    }

    async fn count(&self, filter: &RecordFilter) -> Result<u64, StoreError> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM financial_records");
        push_filter(&mut builder, filter);

        let total = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(total.max(0) as u64)
    }

    async fn totals(&self, filter: &RecordFilter) -> Result<RecordStats, StoreError> {
        let mut builder = QueryBuilder::new(
            r#"
            SELECT
                COALESCE(SUM(total_amount) FILTER (WHERE record_type = 'income'), 0) AS total_income,
                COALESCE(SUM(total_amount) FILTER (WHERE record_type = 'expense'), 0) AS total_expense
            FROM financial_records
            "#,
        );
        push_filter(&mut builder, filter);

        let row = builder.build().fetch_one(&self.pool).await?;
        Ok(RecordStats::new(
            row.try_get("total_income")?,
            row.try_get("total_expense")?,
        ))
    }

    async fn insert(&self, record: NewRecord) -> Result<FinancialRecord, StoreError> {
        let sql = format!(
            r#"
            INSERT INTO financial_records
                (record_type, member_name, item, details, location, unit_price, quantity, record_date, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {COLUMNS}
            "#
        );

        let row = sqlx::query(&sql)
            .bind(record.record_type.as_str())
            .bind(&record.member_name)
            .bind(&record.item)
            .bind(record.details.as_deref())
            .bind(&record.location)
            .bind(record.unit_price)
            .bind(record.quantity)
            .bind(record.record_date)
            .bind(record.created_by.as_str())
            .fetch_one(&self.pool)
            .await?;

        record_from_row(row)
    }
}
