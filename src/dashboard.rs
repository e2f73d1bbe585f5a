//! Aggregations backing the dashboard cards.
//!
//! Everything here is a pure function over canonical rows: the view fetches
//! data through the facades and hands it to these to shape for display.
//! Chart rendering itself lives outside the core.

use std::collections::HashMap;

use time::{Date, Month};

use crate::models::{Account, Transaction, TransactionType};

/// The sum of every account's balance.
pub fn total_balance(accounts: &[Account]) -> f64 {
    accounts.iter().map(|account| account.balance).sum()
}

/// One category's expense total.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpending {
    /// The category label.
    pub category: String,
    /// The absolute amount spent, summed over the category's expenses.
    pub total_spent: f64,
}

/// Total spending per category, largest first.
///
/// Only expenses count; income rows are excluded entirely. Categories with
/// equal totals tie-break alphabetically so the output is deterministic.
pub fn spending_by_category(transactions: &[Transaction]) -> Vec<CategorySpending> {
    let mut totals: HashMap<&str, f64> = HashMap::new();

    for transaction in transactions {
        if transaction.kind == TransactionType::Expense {
            *totals.entry(transaction.category.as_str()).or_insert(0.0) +=
                transaction.amount.abs();
        }
    }

    let mut spending: Vec<CategorySpending> = totals
        .into_iter()
        .map(|(category, total_spent)| CategorySpending {
            category: category.to_owned(),
            total_spent,
        })
        .collect();

    spending.sort_by(|a, b| {
        b.total_spent
            .total_cmp(&a.total_spent)
            .then_with(|| a.category.cmp(&b.category))
    });

    spending
}

/// Absolute income and expense totals for one account.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IncomeExpense {
    /// Money in, as a positive magnitude.
    pub income: f64,
    /// Money out, as a positive magnitude.
    pub expense: f64,
}

/// Compare money in and money out for the account with `account_id`.
pub fn income_vs_expense(transactions: &[Transaction], account_id: &str) -> IncomeExpense {
    let mut totals = IncomeExpense::default();

    for transaction in transactions.iter().filter(|t| t.account_id == account_id) {
        match transaction.kind {
            TransactionType::Income => totals.income += transaction.amount.abs(),
            TransactionType::Expense => totals.expense += transaction.amount.abs(),
        }
    }

    totals
}

/// The most recent `count` transactions, newest first.
///
/// Ties on the same day keep the order of the underlying collection.
pub fn recent_transactions(transactions: &[Transaction], count: usize) -> Vec<Transaction> {
    let mut rows = transactions.to_vec();
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    rows.truncate(count);

    rows
}

/// One calendar month's income and expense totals.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotals {
    /// The month, represented by its first day.
    pub month: Date,
    /// Income in the month, as a positive magnitude.
    pub income: f64,
    /// Expenses in the month, as a positive magnitude.
    pub expense: f64,
}

/// Income and expense totals per calendar month, chronological.
///
/// Only months with at least one transaction appear.
pub fn monthly_totals(transactions: &[Transaction]) -> Vec<MonthlyTotals> {
    let mut totals: HashMap<Date, (f64, f64)> = HashMap::new();

    for transaction in transactions {
        let month = transaction.date.replace_day(1).unwrap();
        let entry = totals.entry(month).or_insert((0.0, 0.0));

        match transaction.kind {
            TransactionType::Income => entry.0 += transaction.amount.abs(),
            TransactionType::Expense => entry.1 += transaction.amount.abs(),
        }
    }

    let mut months: Vec<MonthlyTotals> = totals
        .into_iter()
        .map(|(month, (income, expense))| MonthlyTotals {
            month,
            income,
            expense,
        })
        .collect();

    months.sort_by_key(|totals| totals.month);

    months
}

/// The number of rows the recent-transactions card shows.
pub const RECENT_TRANSACTION_COUNT: usize = 10;

/// Everything the dashboard page shows, computed in one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    /// The sum of every account's balance.
    pub total_balance: f64,
    /// The newest transactions, up to [RECENT_TRANSACTION_COUNT].
    pub recent_transactions: Vec<Transaction>,
    /// Income and expense totals per calendar month, chronological.
    pub monthly_totals: Vec<MonthlyTotals>,
    /// Total spending per category, largest first.
    pub spending_by_category: Vec<CategorySpending>,
}

/// Bundle the aggregations the dashboard page renders.
pub fn summarize(accounts: &[Account], transactions: &[Transaction]) -> DashboardSummary {
    DashboardSummary {
        total_balance: total_balance(accounts),
        recent_transactions: recent_transactions(transactions, RECENT_TRANSACTION_COUNT),
        monthly_totals: monthly_totals(transactions),
        spending_by_category: spending_by_category(transactions),
    }
}

/// Format month dates as three-letter axis labels.
pub fn month_labels(months: &[Date]) -> Vec<String> {
    months
        .iter()
        .map(|date| {
            let label = match date.month() {
                Month::January => "Jan",
                Month::February => "Feb",
                Month::March => "Mar",
                Month::April => "Apr",
                Month::May => "May",
                Month::June => "Jun",
                Month::July => "Jul",
                Month::August => "Aug",
                Month::September => "Sep",
                Month::October => "Oct",
                Month::November => "Nov",
                Month::December => "Dec",
            };

            label.to_owned()
        })
        .collect()
}
