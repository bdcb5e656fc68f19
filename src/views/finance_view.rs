use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use lifedash_config::Config;
use lifedash_core::stats::finance::{
    self, BreakdownSlice, BudgetComparison, MonthPoint, MonthlyStats, SavingsSummary,
    DEFAULT_BREAKDOWN_LIMIT, DEFAULT_RECENT_TRANSACTIONS, SERIES_MONTHS,
};
use lifedash_domain::{Budget, SavingsGoal, Transaction};

use crate::ui::MoneyFormat;

/// Row limits for the finance screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinanceLimits {
    pub breakdown: usize,
    pub recent: usize,
}

impl Default for FinanceLimits {
    fn default() -> Self {
        Self {
            breakdown: DEFAULT_BREAKDOWN_LIMIT,
            recent: DEFAULT_RECENT_TRANSACTIONS,
        }
    }
}

impl From<&Config> for FinanceLimits {
    fn from(config: &Config) -> Self {
        Self {
            breakdown: config.breakdown_limit,
            recent: config.recent_transactions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub id: Uuid,
    pub name: String,
    pub current: f64,
    pub target: f64,
    /// Clamped to 100.
    pub percentage: f64,
}

impl From<&SavingsGoal> for GoalProgress {
    fn from(goal: &SavingsGoal) -> Self {
        Self {
            id: goal.id,
            name: goal.name.clone(),
            current: goal.current_amount,
            target: goal.target_amount,
            percentage: goal.display_progress(),
        }
    }
}

/// Everything the finance screen of one category shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinanceView {
    pub category_id: Uuid,
    pub stats: MonthlyStats,
    pub breakdown: Vec<BreakdownSlice>,
    pub budgets: Vec<BudgetComparison>,
    pub series: Vec<MonthPoint>,
    pub savings: SavingsSummary,
    pub goals: Vec<GoalProgress>,
    pub recent: Vec<Transaction>,
    pub money: MoneyFormat,
}

impl FinanceView {
    pub fn build(
        category_id: Uuid,
        transactions: &[Transaction],
        budgets: &[Budget],
        goals: &[SavingsGoal],
        today: NaiveDate,
        limits: FinanceLimits,
        money: MoneyFormat,
    ) -> Self {
        let transactions = owned_by(transactions, category_id, |txn| txn.category_id);
        let budgets = owned_by(budgets, category_id, |budget| budget.category_id);
        let goals = owned_by(goals, category_id, |goal| goal.category_id);

        let stats = finance::monthly_stats(&transactions, today);
        let breakdown = finance::expense_breakdown(&stats.expense_by_category, limits.breakdown);
        let budget_rows = finance::budget_comparison(&budgets, &stats.expense_by_category, today);

        Self {
            category_id,
            breakdown,
            budgets: budget_rows,
            series: finance::monthly_series(&transactions, today, SERIES_MONTHS),
            savings: finance::savings_summary(&goals),
            goals: goals.iter().map(GoalProgress::from).collect(),
            recent: finance::recent_transactions(&transactions, limits.recent)
                .into_iter()
                .cloned()
                .collect(),
            stats,
            money,
        }
    }

    pub fn format_amount(&self, amount: f64) -> String {
        self.money.format(amount)
    }

    pub fn over_budget(&self) -> impl Iterator<Item = &BudgetComparison> {
        self.budgets.iter().filter(|row| row.over)
    }
}

fn owned_by<T: Clone>(records: &[T], category_id: Uuid, owner: fn(&T) -> Uuid) -> Vec<T> {
    records
        .iter()
        .filter(|record| owner(record) == category_id)
        .cloned()
        .collect()
}
