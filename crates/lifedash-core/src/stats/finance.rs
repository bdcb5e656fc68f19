//! Monthly finance aggregates: totals, breakdowns, budget-vs-actual, series.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use lifedash_domain::{Budget, MonthKey, SavingsGoal, Transaction, TransactionKind};

/// Fixed palette used for breakdown slices, applied by rank.
pub const CHART_COLORS: [&str; 8] = [
    "#22c55e", "#3b82f6", "#f97316", "#8b5cf6", "#06b6d4", "#ec4899", "#eab308", "#64748b",
];
/// Number of breakdown slices kept; the tail is dropped.
pub const DEFAULT_BREAKDOWN_LIMIT: usize = 8;
/// Length of the income/expense series.
pub const SERIES_MONTHS: usize = 6;
/// Transactions shown in the recent history list.
pub const DEFAULT_RECENT_TRANSACTIONS: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyStats {
    pub period: MonthKey,
    pub total_income: f64,
    pub total_expenses: f64,
    /// Income minus expenses; negative when overspent.
    pub net_savings: f64,
    pub last_month_expenses: f64,
    /// Percent change of expenses against last month; 0 when last month had none.
    pub expense_change: f64,
    pub expense_by_category: BTreeMap<String, f64>,
    pub transaction_count: usize,
}

/// Folds the calendar month containing `today` into totals.
pub fn monthly_stats(transactions: &[Transaction], today: NaiveDate) -> MonthlyStats {
    let period = MonthKey::of(today);
    let previous = period.previous();

    let mut total_income = 0.0;
    let mut total_expenses = 0.0;
    let mut last_month_expenses = 0.0;
    let mut expense_by_category = BTreeMap::new();
    let mut transaction_count = 0;

    for txn in transactions {
        if period.contains(txn.date) {
            transaction_count += 1;
            match txn.kind {
                TransactionKind::Income => total_income += txn.amount,
                TransactionKind::Expense => {
                    total_expenses += txn.amount;
                    *expense_by_category
                        .entry(txn.breakdown_label().to_string())
                        .or_insert(0.0) += txn.amount;
                }
                TransactionKind::Transfer => {}
            }
        } else if previous.contains(txn.date) && txn.kind == TransactionKind::Expense {
            last_month_expenses += txn.amount;
        }
    }

    let expense_change = if last_month_expenses > 0.0 {
        (total_expenses - last_month_expenses) / last_month_expenses * 100.0
    } else {
        0.0
    };

    MonthlyStats {
        period,
        total_income,
        total_expenses,
        net_savings: total_income - total_expenses,
        last_month_expenses,
        expense_change,
        expense_by_category,
        transaction_count,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownSlice {
    pub name: String,
    pub value: f64,
    pub color: &'static str,
}

/// Largest `limit` expense buckets, descending, coloured by rank.
pub fn expense_breakdown(by_category: &BTreeMap<String, f64>, limit: usize) -> Vec<BreakdownSlice> {
    let mut entries: Vec<(&String, f64)> = by_category
        .iter()
        .map(|(name, value)| (name, *value))
        .collect();
    entries.sort_by(|a, b| b.1.total_cmp(&a.1));
    entries
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, (name, value))| BreakdownSlice {
            name: name.clone(),
            value,
            color: CHART_COLORS[index % CHART_COLORS.len()],
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetComparison {
    pub budget_id: Uuid,
    pub category: String,
    pub budget: f64,
    pub spent: f64,
    /// Fill percentage, capped at 100.
    pub percentage: f64,
    pub remaining: f64,
    pub over: bool,
}

impl BudgetComparison {
    pub fn for_budget(budget: &Budget, spent: f64) -> Self {
        let ratio = if budget.amount > 0.0 {
            spent / budget.amount * 100.0
        } else if spent > 0.0 {
            100.0
        } else {
            0.0
        };
        Self {
            budget_id: budget.id,
            category: budget.budget_category.clone(),
            budget: budget.amount,
            spent,
            percentage: ratio.min(100.0),
            remaining: (budget.amount - spent).max(0.0),
            over: spent > budget.amount,
        }
    }
}

/// Compares each budget of the current month against this month's spending.
pub fn budget_comparison(
    budgets: &[Budget],
    expense_by_category: &BTreeMap<String, f64>,
    today: NaiveDate,
) -> Vec<BudgetComparison> {
    let period = MonthKey::of(today);
    budgets
        .iter()
        .filter(|budget| budget.period() == period)
        .map(|budget| {
            let spent = expense_by_category
                .get(&budget.budget_category)
                .copied()
                .unwrap_or(0.0);
            BudgetComparison::for_budget(budget, spent)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthPoint {
    pub period: MonthKey,
    pub label: &'static str,
    pub income: f64,
    pub expenses: f64,
    pub savings: f64,
}

/// Income, expenses and savings for the last `months` calendar months, oldest first.
pub fn monthly_series(
    transactions: &[Transaction],
    today: NaiveDate,
    months: usize,
) -> Vec<MonthPoint> {
    let current = MonthKey::of(today);
    (0..months)
        .rev()
        .map(|back| {
            let period = current.shift(-(back as i32));
            let (income, expenses) = transactions
                .iter()
                .filter(|txn| period.contains(txn.date))
                .fold((0.0, 0.0), |(income, expenses), txn| match txn.kind {
                    TransactionKind::Income => (income + txn.amount, expenses),
                    TransactionKind::Expense => (income, expenses + txn.amount),
                    TransactionKind::Transfer => (income, expenses),
                });
            MonthPoint {
                period,
                label: period.short_label(),
                income,
                expenses,
                savings: income - expenses,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SavingsSummary {
    pub total_saved: f64,
    pub total_target: f64,
    /// Overall progress, capped at 100.
    pub percentage: f64,
}

pub fn savings_summary(goals: &[SavingsGoal]) -> SavingsSummary {
    let total_saved: f64 = goals.iter().map(|goal| goal.current_amount).sum();
    let total_target: f64 = goals.iter().map(|goal| goal.target_amount).sum();
    let percentage = if total_target > 0.0 {
        (total_saved / total_target * 100.0).min(100.0)
    } else {
        0.0
    };
    SavingsSummary {
        total_saved,
        total_target,
        percentage,
    }
}

/// Most recent transactions by date, newest first.
pub fn recent_transactions(transactions: &[Transaction], limit: usize) -> Vec<&Transaction> {
    let mut recent: Vec<&Transaction> = transactions.iter().collect();
    recent.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    recent.truncate(limit);
    recent
}
