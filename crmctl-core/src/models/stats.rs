//! Aggregate totals over a filtered set

use serde::Serialize;

use super::RecordType;

/// Income and expense sums for every record matching a filter, independent
/// of the page being shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordStats {
    pub total_income: f64,
    pub total_expense: f64,
    /// Always `total_income - total_expense`
    pub net_amount: f64,
}

impl RecordStats {
    pub fn new(total_income: f64, total_expense: f64) -> Self {
        Self {
            total_income,
            total_expense,
            net_amount: total_income - total_expense,
        }
    }

    /// Fold `(type, total_amount)` pairs into stats.
    pub fn from_amounts<I>(amounts: I) -> Self
    where
        I: IntoIterator<Item = (RecordType, f64)>,
    {
        let (income, expense) =
            amounts
                .into_iter()
                .fold((0.0, 0.0), |(income, expense), (kind, amount)| match kind {
                    RecordType::Income => (income + amount, expense),
                    RecordType::Expense => (income, expense + amount),
                });
        Self::new(income, expense)
    }
}
