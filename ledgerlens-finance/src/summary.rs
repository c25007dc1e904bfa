//! Aggregations over normalized transactions: totals, per-month breakdowns, transfer
//! recipients and category rankings.

use chrono::{Datelike, NaiveDate};
use ledgerlens_core::{Category, SignPolicy, Transaction};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::normalize::NormalizedTransaction;

/// Calendar month used as the aggregation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    pub fn next(self) -> Self {
        if self.month >= 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    /// Months elapsed since the start of year 0; consecutive months differ by one.
    pub fn ordinal(self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl From<YearMonth> for String {
    fn from(ym: YearMonth) -> Self {
        ym.to_string()
    }
}

/// Income against spending. Internal transfers and returns count toward neither side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub total_income: f64,
    /// Magnitude of the summed expense amounts
    pub total_expenses: f64,
    pub savings: f64,
    /// Percent of income kept; 0 when there is no income
    pub savings_rate: f64,
    pub transaction_count: usize,
}

impl Summary {
    pub fn from_transactions(txns: &[NormalizedTransaction]) -> Self {
        let mut income = 0.0;
        let mut expenses = 0.0;
        for t in txns {
            match t.category.policy() {
                SignPolicy::Income => income += t.signed_amount,
                SignPolicy::Expense => expenses += t.signed_amount,
                SignPolicy::Excluded => {}
            }
        }

        let savings = income + expenses;
        let savings_rate = if income > 0.0 {
            savings / income * 100.0
        } else {
            0.0
        };

        Self {
            total_income: income,
            total_expenses: expenses.abs(),
            savings,
            savings_rate,
            transaction_count: txns.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub signed: f64,
    pub unsigned: f64,
    pub count: usize,
}

/// Per-category sums, in category order.
pub fn category_totals(txns: &[NormalizedTransaction]) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<Category, CategoryTotal> = BTreeMap::new();
    for t in txns {
        let entry = totals.entry(t.category).or_insert(CategoryTotal {
            category: t.category,
            signed: 0.0,
            unsigned: 0.0,
            count: 0,
        });
        entry.signed += t.signed_amount;
        entry.unsigned += t.transaction.amount;
        entry.count += 1;
    }
    totals.into_values().collect()
}

/// Signed sums per month per category. Rows with an unparsed date are left out.
pub fn monthly_by_category(
    txns: &[NormalizedTransaction],
) -> BTreeMap<YearMonth, BTreeMap<Category, f64>> {
    let mut out: BTreeMap<YearMonth, BTreeMap<Category, f64>> = BTreeMap::new();
    for t in txns {
        let Some(date) = t.transaction.date.resolved() else {
            continue;
        };
        *out.entry(YearMonth::of(date))
            .or_default()
            .entry(t.category)
            .or_insert(0.0) += t.signed_amount;
    }
    out
}

/// Unsigned sums per month per transaction type label.
pub fn monthly_by_kind<'a, I>(txns: I) -> BTreeMap<YearMonth, BTreeMap<String, f64>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut out: BTreeMap<YearMonth, BTreeMap<String, f64>> = BTreeMap::new();
    for t in txns {
        let Some(date) = t.date.resolved() else {
            continue;
        };
        *out.entry(YearMonth::of(date))
            .or_default()
            .entry(t.kind.label().to_string())
            .or_insert(0.0) += t.amount;
    }
    out
}

const RECIPIENT_MARKERS: [&str; 3] = ["zelle payment to ", "zelle to ", "transfer to "];

/// Recipient names from transfer descriptions: the first word after the first marker
/// found, lower-cased. Descriptions with no marker, or with nothing after the chosen
/// marker, contribute nothing.
pub fn extract_recipients<'a, I>(descriptions: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    descriptions
        .into_iter()
        .filter_map(|desc| {
            let lowered = desc.to_lowercase();
            let marker = RECIPIENT_MARKERS.iter().find(|m| lowered.contains(**m))?;
            let (_, rest) = lowered.split_once(*marker)?;
            rest.split_whitespace().next().map(str::to_string)
        })
        .collect()
}

/// Most frequent recipients among Transfer rows, ties broken by name.
pub fn top_recipients(txns: &[NormalizedTransaction], n: usize) -> Vec<(String, usize)> {
    let recipients = extract_recipients(
        txns.iter()
            .filter(|t| t.category == Category::Transfer)
            .map(|t| t.transaction.description.as_str()),
    );

    let mut counts: HashMap<String, usize> = HashMap::new();
    for r in recipients {
        *counts.entry(r).or_insert(0) += 1;
    }
    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}

/// Expense categories ranked by spend magnitude, largest first.
pub fn top_categories(txns: &[NormalizedTransaction], n: usize) -> Vec<(Category, f64)> {
    let mut ranked: Vec<(Category, f64)> = category_totals(txns)
        .into_iter()
        .filter(|t| t.category.is_expense())
        .map(|t| (t.category, t.signed.abs()))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}

/// Percent change of each category between its last two months with activity.
///
/// `None` when the category has a single active month or the earlier month sums to zero.
pub fn category_growth(txns: &[NormalizedTransaction]) -> BTreeMap<Category, Option<f64>> {
    let mut per_category: BTreeMap<Category, BTreeMap<YearMonth, f64>> = BTreeMap::new();
    for (month, cats) in monthly_by_category(txns) {
        for (category, amount) in cats {
            per_category.entry(category).or_default().insert(month, amount.abs());
        }
    }

    per_category
        .into_iter()
        .map(|(category, months)| {
            let mut last_two = months.values().rev();
            let growth = match (last_two.next(), last_two.next()) {
                (Some(&current), Some(&previous)) if previous != 0.0 => {
                    Some((current - previous) / previous * 100.0)
                }
                _ => None,
            };
            (category, growth)
        })
        .collect()
}

/// Rows of one category, oldest first. Unparsed dates sort after every resolved date.
pub fn in_category(txns: &[NormalizedTransaction], category: Category) -> Vec<&NormalizedTransaction> {
    let mut rows: Vec<&NormalizedTransaction> =
        txns.iter().filter(|t| t.category == category).collect();
    rows.sort_by_key(|t| (t.transaction.date.resolved().is_none(), t.transaction.date.resolved()));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerlens_core::{StatementDate, TxnKind};

    fn row(date: &str, category: Category, signed: f64, desc: &str) -> NormalizedTransaction {
        NormalizedTransaction {
            transaction: Transaction::new(
                StatementDate::from_stored(date),
                signed,
                TxnKind::Debit,
                desc,
                "Chase",
            ),
            category,
            signed_amount: signed,
        }
    }

    fn sample() -> Vec<NormalizedTransaction> {
        vec![
            row("2025-03-01", Category::Income, 2000.0, "Payroll"),
            row("2025-03-02", Category::Rent, -1150.0, "Zelle Payment To Rebecca Rent"),
            row("2025-03-05", Category::FoodAndDining, -50.0, "Chipotle"),
            row("2025-04-05", Category::FoodAndDining, -75.0, "Chipotle"),
            row("2025-04-09", Category::Transfer, -60.0, "Zelle Payment To Alex 213"),
            row("2025-04-10", Category::Transfer, -20.0, "Zelle to alex"),
            row("2025-04-11", Category::Transfer, -35.0, "Online transfer to Sam"),
            row("2025-04-12", Category::InternalTransfer, 1000.0, "Online Transfer To Sav"),
            row("garbage", Category::Groceries, -10.0, "Kroger"),
        ]
    }

    #[test]
    fn test_summary_excludes_internal_transfers() {
        let s = Summary::from_transactions(&sample());
        assert_eq!(s.total_income, 2000.0);
        assert_eq!(s.total_expenses, 1400.0);
        assert_eq!(s.savings, 600.0);
        assert!((s.savings_rate - 30.0).abs() < 1e-9);
        assert_eq!(s.transaction_count, 9);
    }

    #[test]
    fn test_savings_rate_zero_without_income() {
        let s = Summary::from_transactions(&[row("2025-03-05", Category::Shopping, -20.0, "x")]);
        assert_eq!(s.total_income, 0.0);
        assert_eq!(s.savings, -20.0);
        assert_eq!(s.savings_rate, 0.0);

        let empty = Summary::from_transactions(&[]);
        assert_eq!(empty.savings_rate, 0.0);
    }

    #[test]
    fn test_monthly_by_category_skips_unparsed() {
        let monthly = monthly_by_category(&sample());
        assert_eq!(monthly.len(), 2);
        let march = &monthly[&YearMonth::new(2025, 3)];
        assert_eq!(march[&Category::Income], 2000.0);
        assert_eq!(march[&Category::FoodAndDining], -50.0);
        assert!(monthly.values().all(|m| !m.contains_key(&Category::Groceries)));
    }

    #[test]
    fn test_monthly_by_kind_is_unsigned() {
        let rows = sample();
        let monthly = monthly_by_kind(rows.iter().map(|t| &t.transaction));
        assert_eq!(monthly[&YearMonth::new(2025, 3)]["Debit"], 3200.0);
    }

    #[test]
    fn test_recipients() {
        let names = extract_recipients([
            "Zelle Payment To Alex 2139876",
            "ZELLE TO BOB",
            "Online Transfer to Sam Smith",
            "Venmo cashout",
        ]);
        assert_eq!(names, vec!["alex", "bob", "sam"]);

        let top = top_recipients(&sample(), 5);
        assert_eq!(top[0], ("alex".to_string(), 2));
        assert_eq!(top[1], ("sam".to_string(), 1));
    }

    #[test]
    fn test_recipient_comes_only_from_first_marker() {
        let names = extract_recipients([
            "Transfer to Bob then Zelle Payment To ",
            "Zelle Payment To Carol via transfer to savings",
        ]);
        assert_eq!(names, vec!["carol"]);
    }

    #[test]
    fn test_top_categories_ranked_by_spend() {
        let top = top_categories(&sample(), 2);
        assert_eq!(top, vec![(Category::Rent, 1150.0), (Category::FoodAndDining, 125.0)]);
    }

    #[test]
    fn test_category_growth() {
        let growth = category_growth(&sample());
        let food = growth[&Category::FoodAndDining].unwrap();
        assert!((food - 50.0).abs() < 1e-9);
        assert_eq!(growth[&Category::Rent], None);
    }

    #[test]
    fn test_in_category_sorted_by_date() {
        let rows = sample();
        let transfers = in_category(&rows, Category::Transfer);
        assert_eq!(transfers.len(), 3);
        assert_eq!(transfers[0].transaction.date.to_string(), "2025-04-09");
        assert_eq!(transfers[2].transaction.date.to_string(), "2025-04-11");
    }

    #[test]
    fn test_year_month_keys_serialize_as_strings() {
        let monthly = monthly_by_category(&sample());
        let json = serde_json::to_value(&monthly).unwrap();
        assert_eq!(json["2025-03"]["Rent"], -1150.0);
        assert_eq!(YearMonth::new(2024, 12).next(), YearMonth::new(2025, 1));
    }
}
