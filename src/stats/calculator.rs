//! Statistics Calculator Module
//! Computes the monthly statement summary: totals, extremes and ranked categories.

use crate::data::{DataProcessor, ProcessorError, StatementTable, TransactionKind};
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("Statement has no transactions with a valid date")]
    EmptyTable,
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error(transparent)]
    Processor(#[from] ProcessorError),
}

/// Summed amount of one description bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub description: String,
    pub total: f64,
}

/// Summary statistics of one statement.
///
/// All amounts are positive magnitudes. `extreme_debit` / `extreme_credit` are
/// `None` when the statement has no movement of that kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub month: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub transaction_count: usize,
    pub debit_count: usize,
    pub credit_count: usize,
    pub total_debits: f64,
    pub total_credits: f64,
    /// First balance minus last balance.
    pub net_change: f64,
    pub average_amount: f64,
    pub extreme_debit: Option<f64>,
    pub extreme_credit: Option<f64>,
    pub top_debits: Vec<CategoryTotal>,
    pub top_credits: Vec<CategoryTotal>,
}

/// Handles the statement aggregation.
pub struct SummaryCalculator;

impl SummaryCalculator {
    /// Compute the summary of a loaded statement.
    pub fn summarize(table: &StatementTable, top_n: usize) -> Result<Summary, SummaryError> {
        let (Some(first), Some(last)) = (table.first(), table.last()) else {
            return Err(SummaryError::EmptyTable);
        };

        let debit_amounts = Self::amounts(table, TransactionKind::Debit);
        let credit_amounts = Self::amounts(table, TransactionKind::Credit);
        let all_amounts: Vec<f64> = table.transactions.iter().map(|t| t.amount).collect();

        let df = DataProcessor::to_dataframe(table)?;
        let top_debits = Self::ranked_buckets(&df, TransactionKind::Debit, top_n)?;
        let top_credits = Self::ranked_buckets(&df, TransactionKind::Credit, top_n)?;

        let summary = Summary {
            month: first.date.format("%B").to_string(),
            period_start: first.date,
            period_end: last.date,
            transaction_count: table.len(),
            debit_count: debit_amounts.len(),
            credit_count: credit_amounts.len(),
            total_debits: debit_amounts.iter().sum(),
            total_credits: credit_amounts.iter().sum(),
            net_change: first.balance_after - last.balance_after,
            average_amount: Statistics::mean(&all_amounts),
            extreme_debit: Self::largest(&debit_amounts),
            extreme_credit: Self::largest(&credit_amounts),
            top_debits,
            top_credits,
        };

        tracing::debug!(
            "Summary for {}: debits {:.2}, credits {:.2}, net change {:.2}",
            summary.month,
            summary.total_debits,
            summary.total_credits,
            summary.net_change
        );

        Ok(summary)
    }

    fn amounts(table: &StatementTable, kind: TransactionKind) -> Vec<f64> {
        table.of_kind(kind).map(|t| t.amount).collect()
    }

    /// Largest magnitude, `None` for an empty bucket.
    fn largest(values: &[f64]) -> Option<f64> {
        let max = Statistics::max(values);
        (!max.is_nan()).then_some(max)
    }

    /// Group one kind by description, sum, and keep the `top_n` largest totals.
    ///
    /// Ties are ordered by description so repeated runs give the same list.
    pub fn ranked_buckets(
        df: &DataFrame,
        kind: TransactionKind,
        top_n: usize,
    ) -> Result<Vec<CategoryTotal>, SummaryError> {
        let ranked = DataProcessor::filter_by_kind(df, kind)?
            .lazy()
            .group_by([col("description")])
            .agg([col("amount").sum().alias("total")])
            .sort(
                ["total", "description"],
                SortMultipleOptions::default().with_order_descending_multi([true, false]),
            )
            .limit(top_n as IdxSize)
            .collect()?;

        let descriptions = ranked.column("description")?.str()?;
        let totals = ranked.column("total")?.f64()?;

        Ok(descriptions
            .into_iter()
            .zip(totals.into_iter())
            .filter_map(|(description, total)| {
                Some(CategoryTotal {
                    description: description?.to_string(),
                    total: total?,
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Transaction;

    const DEFAULT_TOP_N: usize = 10;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn row(day: u32, description: &str, kind: TransactionKind, amount: f64, balance: f64) -> Transaction {
        Transaction {
            date: date(day),
            description: description.to_string(),
            kind,
            amount,
            balance_after: balance,
        }
    }

    fn table(transactions: Vec<Transaction>) -> StatementTable {
        StatementTable {
            sheet: "Conta".to_string(),
            transactions,
            skipped_rows: 0,
        }
    }

    fn scenario() -> StatementTable {
        use TransactionKind::*;
        table(vec![
            row(1, "Mercado", Debit, 10.0, 1000.0),
            row(2, "Farmacia", Debit, 20.0, 990.0),
            row(3, "Mercado", Debit, 5.0, 970.0),
            row(4, "Salario", Credit, 100.0, 1070.0),
            row(5, "Reembolso", Credit, 50.0, 1120.0),
        ])
    }

    #[test]
    fn scenario_totals() {
        let summary = SummaryCalculator::summarize(&scenario(), DEFAULT_TOP_N).unwrap();

        assert_eq!(summary.total_debits, 35.0);
        assert_eq!(summary.total_credits, 150.0);
        assert_eq!(summary.net_change, -120.0);
        assert_eq!(summary.extreme_credit, Some(100.0));
        assert_eq!(summary.extreme_debit, Some(20.0));
        assert!((summary.average_amount - 37.0).abs() < 1e-9);
        assert_eq!(summary.month, "March");
        assert_eq!(summary.period_start, date(1));
        assert_eq!(summary.period_end, date(5));
        assert_eq!(summary.transaction_count, 5);
        assert_eq!(summary.debit_count, 3);
        assert_eq!(summary.credit_count, 2);
    }

    #[test]
    fn ranked_lists_put_largest_first() {
        let summary = SummaryCalculator::summarize(&scenario(), DEFAULT_TOP_N).unwrap();

        assert_eq!(
            summary.top_debits,
            vec![
                CategoryTotal { description: "Farmacia".to_string(), total: 20.0 },
                CategoryTotal { description: "Mercado".to_string(), total: 15.0 },
            ]
        );
        assert_eq!(summary.top_credits[0].description, "Salario");
        assert_eq!(summary.top_credits[1].description, "Reembolso");
    }

    #[test]
    fn partition_covers_every_row() {
        let table = scenario();
        let summary = SummaryCalculator::summarize(&table, DEFAULT_TOP_N).unwrap();
        let total: f64 = table.transactions.iter().map(|t| t.amount).sum();

        assert_eq!(summary.total_debits + summary.total_credits, total);
        assert_eq!(summary.debit_count + summary.credit_count, table.len());
    }

    #[test]
    fn summarizing_twice_is_identical() {
        let table = scenario();
        let a = SummaryCalculator::summarize(&table, DEFAULT_TOP_N).unwrap();
        let b = SummaryCalculator::summarize(&table, DEFAULT_TOP_N).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn ranked_lists_are_capped() {
        let transactions = (1..=15)
            .map(|i| row(1, &format!("Loja {i:02}"), TransactionKind::Debit, i as f64, 0.0))
            .collect();
        let summary = SummaryCalculator::summarize(&table(transactions), DEFAULT_TOP_N).unwrap();

        assert_eq!(summary.top_debits.len(), 10);
        assert_eq!(summary.top_debits[0].description, "Loja 15");
        assert_eq!(summary.top_debits[9].description, "Loja 06");
        assert!(summary.top_credits.is_empty());
    }

    #[test]
    fn equal_totals_are_ordered_by_description() {
        use TransactionKind::*;
        let table = table(vec![
            row(1, "Cafe", Debit, 3.0, 0.0),
            row(1, "Bilhete", Debit, 3.0, 0.0),
            row(1, "Agua", Debit, 3.0, 0.0),
        ]);
        let summary = SummaryCalculator::summarize(&table, DEFAULT_TOP_N).unwrap();

        let names: Vec<&str> = summary
            .top_debits
            .iter()
            .map(|c| c.description.as_str())
            .collect();
        assert_eq!(names, ["Agua", "Bilhete", "Cafe"]);
    }

    #[test]
    fn empty_bucket_uses_none_sentinel() {
        let table = table(vec![row(7, "Salario", TransactionKind::Credit, 900.0, 900.0)]);
        let summary = SummaryCalculator::summarize(&table, DEFAULT_TOP_N).unwrap();

        assert_eq!(summary.total_debits, 0.0);
        assert_eq!(summary.extreme_debit, None);
        assert_eq!(summary.extreme_credit, Some(900.0));
        assert!(summary.top_debits.is_empty());
        assert_eq!(summary.net_change, 0.0);
    }

    #[test]
    fn empty_table_fails_fast() {
        let err = SummaryCalculator::summarize(&table(Vec::new()), DEFAULT_TOP_N).unwrap_err();
        assert!(matches!(err, SummaryError::EmptyTable));
    }
}
