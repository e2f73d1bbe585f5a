//! The query engine: pure filtering, sorting and paging over canonical rows.
//!
//! [apply] has no side effects and no I/O; identical inputs produce
//! identical outputs, and the sort is stable so ties keep the order of the
//! underlying collection.

use std::cmp::Ordering;

use time::Date;

use crate::models::{Transaction, TransactionType};

/// The dropdown sentinel meaning "no filtering".
pub const ALL_SENTINEL: &str = "All";

/// The filter criteria applied to a transaction listing.
///
/// All supplied criteria must match (logical AND). An absent criterion is a
/// no-op, as are the empty string and the `"All"` sentinel the view's
/// dropdowns send for their defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilters {
    /// Keep transactions belonging to this account.
    pub account_id: Option<String>,
    /// Keep transactions with exactly this category.
    pub category: Option<String>,
    /// Keep transactions of this type.
    pub kind: Option<TransactionType>,
    /// Keep transactions on or after this day.
    pub date_from: Option<Date>,
    /// Keep transactions on or before this day.
    pub date_to: Option<Date>,
    /// Keep transactions whose description, category or type contains this
    /// text, case-insensitively.
    pub search: Option<String>,
}

impl TransactionFilters {
    /// Interpret a raw dropdown value, treating the empty string and the
    /// `"All"` sentinel as "no filtering".
    pub fn choice(raw: &str) -> Option<String> {
        let trimmed = raw.trim();

        if trimmed.is_empty() || trimmed == ALL_SENTINEL {
            None
        } else {
            Some(trimmed.to_owned())
        }
    }

    /// Whether `transaction` passes every supplied criterion.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        if let Some(account_id) = &self.account_id
            && !account_id.is_empty()
            && transaction.account_id != *account_id
        {
            return false;
        }

        if let Some(category) = &self.category
            && category != ALL_SENTINEL
            && transaction.category != *category
        {
            return false;
        }

        if let Some(kind) = self.kind
            && transaction.kind != kind
        {
            return false;
        }

        if let Some(from) = self.date_from
            && transaction.date < from
        {
            return false;
        }

        if let Some(to) = self.date_to
            && transaction.date > to
        {
            return false;
        }

        if let Some(search) = &self.search
            && !search.is_empty()
        {
            let needle = search.to_lowercase();
            let haystack = format!(
                "{} {} {}",
                transaction.description,
                transaction.category,
                transaction.kind.as_str()
            )
            .to_lowercase();

            if !haystack.contains(&needle) {
                return false;
            }
        }

        true
    }
}

/// The fields a transaction listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// Sort by calendar day.
    Date,
    /// Sort by signed amount.
    Amount,
    /// Sort by description.
    Description,
    /// Sort by category label.
    Category,
}

/// The order to sort transactions in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Sort in order of increasing value.
    Ascending,
    /// Sort in order of decreasing value.
    Descending,
}

/// A parsed `field:direction` sort key.
///
/// Amounts compare numerically; everything else compares by Unicode
/// code-point order (there is no locale-aware collation in the core).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    /// The field to compare.
    pub field: SortField,
    /// The direction to order results in.
    pub order: SortOrder,
}

impl Default for SortKey {
    /// Newest first, matching the view's default dropdown entry.
    fn default() -> Self {
        Self {
            field: SortField::Date,
            order: SortOrder::Descending,
        }
    }
}

impl SortKey {
    /// Parse a `field:direction` string such as `"amount:desc"`.
    ///
    /// An unknown field falls back to the `date:desc` default; any direction
    /// other than `asc` sorts descending.
    pub fn parse(text: &str) -> Self {
        let (field_text, direction) = text.split_once(':').unwrap_or((text, "desc"));

        let field = match field_text {
            "date" => SortField::Date,
            "amount" => SortField::Amount,
            "description" => SortField::Description,
            "category" => SortField::Category,
            _ => return Self::default(),
        };

        let order = if direction == "asc" {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        };

        Self { field, order }
    }

    fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        let ordering = match self.field {
            SortField::Date => a.date.cmp(&b.date),
            SortField::Amount => a.amount.total_cmp(&b.amount),
            SortField::Description => a.description.cmp(&b.description),
            SortField::Category => a.category.cmp(&b.category),
        };

        match self.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// Defines how transactions should be fetched from
/// [TransactionService::list](crate::services::TransactionService::list).
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionQuery {
    /// The filter criteria. All must match.
    pub filters: TransactionFilters,
    /// The sort key applied after filtering.
    pub sort: SortKey,
    /// The 1-based page number.
    pub page: u64,
    /// The number of rows per page.
    pub page_size: u64,
}

impl Default for TransactionQuery {
    fn default() -> Self {
        Self {
            filters: TransactionFilters::default(),
            sort: SortKey::default(),
            page: 1,
            page_size: 10,
        }
    }
}

/// One page of a filtered listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// The rows on this page.
    pub rows: Vec<T>,
    /// The number of rows that matched the filters, across all pages.
    pub total: usize,
    /// The 1-based page number this slice was taken for.
    pub page: u64,
    /// The page size the slice was taken with.
    pub page_size: u64,
}

impl<T> Page<T> {
    /// The number of pages the filtered listing spans.
    pub fn page_count(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }

        (self.total as u64).div_ceil(self.page_size)
    }
}

/// Filter, sort and page `rows` according to `query`.
///
/// `total` counts the rows that passed the filters, before paging. Pages
/// past the end return an empty slice rather than an error.
pub fn apply(rows: &[Transaction], query: &TransactionQuery) -> Page<Transaction> {
    let mut matched: Vec<Transaction> = rows
        .iter()
        .filter(|row| query.filters.matches(row))
        .cloned()
        .collect();

    matched.sort_by(|a, b| query.sort.compare(a, b));

    let total = matched.len();
    let start = query.page.saturating_sub(1).saturating_mul(query.page_size);
    let page_rows = matched
        .into_iter()
        .skip(usize::try_from(start).unwrap_or(usize::MAX))
        .take(usize::try_from(query.page_size).unwrap_or(usize::MAX))
        .collect();

    Page {
        rows: page_rows,
        total,
        page: query.page,
        page_size: query.page_size,
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{
        Page, SortField, SortKey, SortOrder, TransactionFilters, TransactionQuery, apply,
    };
    use crate::models::{Transaction, TransactionType};

    fn row(id: &str, account_id: &str, amount: f64, date: time::Date, description: &str) -> Transaction {
        let kind = TransactionType::from_amount(amount);
        let category = if amount > 0.0 { "Income" } else { "Food & Dining" };

        Transaction {
            id: id.to_owned(),
            account_id: account_id.to_owned(),
            amount,
            kind,
            category: category.to_owned(),
            date,
            description: description.to_owned(),
        }
    }

    fn sample_rows() -> Vec<Transaction> {
        vec![
            row("t1", "acc_1", -82.45, date!(2025 - 10 - 18), "Groceries"),
            row("t2", "acc_1", 1850.0, date!(2025 - 10 - 15), "Paycheck"),
            row("t3", "acc_2", -44.10, date!(2025 - 10 - 12), "Gas"),
            row("t4", "acc_1", -29.99, date!(2025 - 09 - 30), "Gym Membership"),
        ]
    }

    fn query(filters: TransactionFilters, sort: &str) -> TransactionQuery {
        TransactionQuery {
            filters,
            sort: SortKey::parse(sort),
            ..TransactionQuery::default()
        }
    }

    #[test]
    fn filtering_by_type_partitions_the_rows() {
        let rows = sample_rows();

        let income = apply(
            &rows,
            &query(
                TransactionFilters {
                    kind: Some(TransactionType::Income),
                    ..TransactionFilters::default()
                },
                "date:desc",
            ),
        );
        let expenses = apply(
            &rows,
            &query(
                TransactionFilters {
                    kind: Some(TransactionType::Expense),
                    ..TransactionFilters::default()
                },
                "date:desc",
            ),
        );

        assert_eq!(income.total + expenses.total, rows.len());
        assert!(income.rows.iter().all(|t| t.kind == TransactionType::Income));
        assert!(expenses.rows.iter().all(|t| t.kind == TransactionType::Expense));
    }

    #[test]
    fn income_filter_with_amount_sort_returns_only_the_income_row() {
        let rows = vec![
            row("t1", "acc_1", -50.0, date!(2025 - 10 - 01), "Groceries"),
            row("t2", "acc_1", 1850.0, date!(2025 - 10 - 15), "Paycheck"),
        ];

        let got = apply(
            &rows,
            &query(
                TransactionFilters {
                    kind: Some(TransactionType::Income),
                    ..TransactionFilters::default()
                },
                "amount:desc",
            ),
        );

        assert_eq!(got.total, 1);
        assert_eq!(got.rows.len(), 1);
        assert_eq!(got.rows[0].amount, 1850.0);
    }

    #[test]
    fn all_sentinel_and_empty_criteria_are_no_ops() {
        let rows = sample_rows();

        let filters = TransactionFilters {
            account_id: Some(String::new()),
            category: Some("All".to_owned()),
            ..TransactionFilters::default()
        };

        assert_eq!(apply(&rows, &query(filters, "date:desc")).total, rows.len());
        assert_eq!(TransactionFilters::choice("All"), None);
        assert_eq!(TransactionFilters::choice("  "), None);
        assert_eq!(TransactionFilters::choice("Housing"), Some("Housing".to_owned()));
    }

    #[test]
    fn search_matches_description_category_and_type_case_insensitively() {
        let rows = sample_rows();

        let by_description = apply(
            &rows,
            &query(
                TransactionFilters {
                    search: Some("gRoCeR".to_owned()),
                    ..TransactionFilters::default()
                },
                "date:desc",
            ),
        );
        let by_type = apply(
            &rows,
            &query(
                TransactionFilters {
                    search: Some("income".to_owned()),
                    ..TransactionFilters::default()
                },
                "date:desc",
            ),
        );

        assert_eq!(by_description.total, 1);
        assert_eq!(by_description.rows[0].id, "t1");
        assert_eq!(by_type.total, 1);
        assert_eq!(by_type.rows[0].id, "t2");
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let rows = sample_rows();

        let got = apply(
            &rows,
            &query(
                TransactionFilters {
                    date_from: Some(date!(2025 - 10 - 12)),
                    date_to: Some(date!(2025 - 10 - 15)),
                    ..TransactionFilters::default()
                },
                "date:asc",
            ),
        );

        assert_eq!(
            got.rows.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            ["t3", "t2"]
        );
    }

    #[test]
    fn filters_combine_with_logical_and() {
        let rows = sample_rows();

        let got = apply(
            &rows,
            &query(
                TransactionFilters {
                    account_id: Some("acc_1".to_owned()),
                    kind: Some(TransactionType::Expense),
                    date_from: Some(date!(2025 - 10 - 01)),
                    ..TransactionFilters::default()
                },
                "date:desc",
            ),
        );

        assert_eq!(
            got.rows.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            ["t1"]
        );
    }

    #[test]
    fn sorting_by_amount_is_numeric() {
        let rows = sample_rows();

        let got = apply(&rows, &query(TransactionFilters::default(), "amount:asc"));

        assert_eq!(
            got.rows.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            ["t1", "t3", "t4", "t2"]
        );
    }

    #[test]
    fn ties_keep_the_order_of_the_underlying_collection() {
        let rows = vec![
            row("t1", "acc_1", -10.0, date!(2025 - 10 - 01), "First"),
            row("t2", "acc_1", -10.0, date!(2025 - 10 - 01), "Second"),
            row("t3", "acc_1", -10.0, date!(2025 - 10 - 01), "Third"),
        ];

        let got = apply(&rows, &query(TransactionFilters::default(), "amount:asc"));

        assert_eq!(
            got.rows.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            ["t1", "t2", "t3"]
        );
    }

    #[test]
    fn applying_the_same_query_twice_yields_identical_output() {
        let rows = sample_rows();
        let q = query(TransactionFilters::default(), "description:asc");

        assert_eq!(apply(&rows, &q), apply(&rows, &q));
    }

    #[test]
    fn unknown_sort_keys_fall_back_to_newest_first() {
        assert_eq!(SortKey::parse("created_at:asc"), SortKey::default());
        assert_eq!(SortKey::parse(""), SortKey::default());
        assert_eq!(
            SortKey::parse("amount"),
            SortKey {
                field: SortField::Amount,
                order: SortOrder::Descending
            }
        );
        assert_eq!(
            SortKey::parse("date:sideways"),
            SortKey {
                field: SortField::Date,
                order: SortOrder::Descending
            }
        );
    }

    #[test]
    fn pagination_clips_to_the_available_rows() {
        let rows: Vec<Transaction> = (0..23)
            .map(|i| row(&format!("t{i}"), "acc_1", -1.0, date!(2025 - 10 - 01), "Coffee"))
            .collect();

        let page = |number| {
            apply(
                &rows,
                &TransactionQuery {
                    page: number,
                    page_size: 10,
                    ..TransactionQuery::default()
                },
            )
        };

        assert_eq!(page(1).rows.len(), 10);
        assert_eq!(page(3).rows.len(), 3);
        assert_eq!(page(3).total, 23);
        assert_eq!(page(4).rows.len(), 0);
        assert_eq!(page(4).total, 23);
    }

    #[test]
    fn page_count_rounds_up() {
        let page = Page::<Transaction> {
            rows: Vec::new(),
            total: 23,
            page: 1,
            page_size: 10,
        };

        assert_eq!(page.page_count(), 3);
    }
}
