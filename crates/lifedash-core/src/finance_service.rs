//! Validated CRUD for transactions, budgets and savings goals.

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use lifedash_domain::{Budget, CategoryType, SavingsGoal, Timestamped, Transaction};

use crate::{storage::RecordStore, CategoryService, CoreError, CoreResult};

pub struct FinanceService;

impl FinanceService {
    pub fn add_transaction<S: RecordStore>(store: &S, txn: Transaction) -> CoreResult<Transaction> {
        let txn = Self::validate_transaction(txn)?;
        CategoryService::require_kind(store, txn.category_id, CategoryType::Finance)?;
        let txn = store.insert(txn)?;
        info!(id = %txn.id, kind = %txn.kind, amount = txn.amount, "recorded transaction");
        Ok(txn)
    }

    pub fn update_transaction<S: RecordStore>(
        store: &S,
        mut txn: Transaction,
        now: DateTime<Utc>,
    ) -> CoreResult<Transaction> {
        store.get::<Transaction>(txn.id)?;
        CategoryService::require_kind(store, txn.category_id, CategoryType::Finance)?;
        txn.touch(now);
        let txn = store.update(Self::validate_transaction(txn)?)?;
        info!(id = %txn.id, "updated transaction");
        Ok(txn)
    }

    pub fn delete_transaction<S: RecordStore>(store: &S, id: Uuid) -> CoreResult<()> {
        store.delete::<Transaction>(id)?;
        info!(%id, "deleted transaction");
        Ok(())
    }

    pub fn add_budget<S: RecordStore>(store: &S, mut budget: Budget) -> CoreResult<Budget> {
        budget.budget_category = budget.budget_category.trim().to_string();
        if budget.budget_category.is_empty() {
            return Err(CoreError::invalid("budget category cannot be empty"));
        }
        Self::validate_positive("budget amount", budget.amount)?;
        if !(1..=12).contains(&budget.month) {
            return Err(CoreError::invalid(format!(
                "budget month {} is out of range",
                budget.month
            )));
        }
        CategoryService::require_kind(store, budget.category_id, CategoryType::Finance)?;
        let budget = store.insert(budget)?;
        info!(
            id = %budget.id,
            category = %budget.budget_category,
            period = %budget.period(),
            "added budget"
        );
        Ok(budget)
    }

    pub fn delete_budget<S: RecordStore>(store: &S, id: Uuid) -> CoreResult<()> {
        store.delete::<Budget>(id)?;
        info!(%id, "deleted budget");
        Ok(())
    }

    pub fn add_savings_goal<S: RecordStore>(store: &S, goal: SavingsGoal) -> CoreResult<SavingsGoal> {
        let goal = Self::validate_goal(goal)?;
        CategoryService::require_kind(store, goal.category_id, CategoryType::Finance)?;
        let goal = store.insert(goal)?;
        info!(id = %goal.id, name = %goal.name, "added savings goal");
        Ok(goal)
    }

    pub fn update_savings_goal<S: RecordStore>(
        store: &S,
        mut goal: SavingsGoal,
        now: DateTime<Utc>,
    ) -> CoreResult<SavingsGoal> {
        store.get::<SavingsGoal>(goal.id)?;
        CategoryService::require_kind(store, goal.category_id, CategoryType::Finance)?;
        goal.touch(now);
        store.update(Self::validate_goal(goal)?)
    }

    pub fn delete_savings_goal<S: RecordStore>(store: &S, id: Uuid) -> CoreResult<()> {
        store.delete::<SavingsGoal>(id)?;
        info!(%id, "deleted savings goal");
        Ok(())
    }

    fn validate_transaction(mut txn: Transaction) -> CoreResult<Transaction> {
        Self::validate_positive("transaction amount", txn.amount)?;
        txn.description = txn.description.trim().to_string();
        if txn.description.is_empty() {
            return Err(CoreError::invalid("transaction description cannot be empty"));
        }
        txn.category_name = txn
            .category_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        Ok(txn)
    }

    fn validate_goal(mut goal: SavingsGoal) -> CoreResult<SavingsGoal> {
        goal.name = goal.name.trim().to_string();
        if goal.name.is_empty() {
            return Err(CoreError::invalid("savings goal name cannot be empty"));
        }
        Self::validate_positive("target amount", goal.target_amount)?;
        if !goal.current_amount.is_finite() || goal.current_amount < 0.0 {
            return Err(CoreError::invalid("current amount cannot be negative"));
        }
        Ok(goal)
    }

    fn validate_positive(what: &str, amount: f64) -> CoreResult<()> {
        if amount.is_finite() && amount > 0.0 {
            Ok(())
        } else {
            Err(CoreError::invalid(format!("{what} must be positive")))
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use lifedash_domain::{Category, MonthKey, TransactionKind};

    use super::*;
    use crate::memory::MemoryRecordStore;

    fn wallet(store: &MemoryRecordStore) -> Uuid {
        CategoryService::create(store, "Wallet", CategoryType::Finance, None, Utc::now())
            .unwrap()
            .id
    }

    fn txn(category_id: Uuid, amount: f64, description: &str) -> Transaction {
        Transaction::new(
            category_id,
            TransactionKind::Expense,
            amount,
            description,
            NaiveDate::from_ymd_opt(2025, 5, 5).unwrap(),
            Utc::now(),
        )
    }

    #[test]
    fn rejects_non_positive_amounts_and_blank_descriptions() {
        let store = MemoryRecordStore::new();
        let wallet = wallet(&store);
        assert!(FinanceService::add_transaction(&store, txn(wallet, 0.0, "Lunch")).is_err());
        assert!(FinanceService::add_transaction(&store, txn(wallet, -3.0, "Lunch")).is_err());
        assert!(FinanceService::add_transaction(&store, txn(wallet, 3.0, "  ")).is_err());
        assert!(store.list::<Transaction>().unwrap().is_empty());
    }

    #[test]
    fn blank_category_label_is_stored_as_unset() {
        let store = MemoryRecordStore::new();
        let wallet = wallet(&store);
        let stored = FinanceService::add_transaction(
            &store,
            txn(wallet, 9.5, "Bus").with_category_name(" "),
        )
        .unwrap();
        assert_eq!(stored.category_name, None);
        assert_eq!(stored.breakdown_label(), "Other");
    }

    #[test]
    fn budget_month_must_be_a_calendar_month() {
        let store = MemoryRecordStore::new();
        let mut budget = Budget::new(
            wallet(&store),
            "Travel",
            300.0,
            MonthKey::new(2025, 5),
            Utc::now(),
        );
        budget.month = 13;
        assert!(FinanceService::add_budget(&store, budget).is_err());
    }

    #[test]
    fn update_transaction_requires_existing_row() {
        let store = MemoryRecordStore::new();
        let wallet = wallet(&store);
        let err = FinanceService::update_transaction(&store, txn(wallet, 1.0, "Gum"), Utc::now())
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[test]
    fn records_need_an_existing_finance_category() {
        let store = MemoryRecordStore::new();
        let err = FinanceService::add_transaction(&store, txn(Uuid::new_v4(), 4.0, "Tea"))
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));

        let gym = CategoryService::create(&store, "Gym", CategoryType::Fitness, None, Utc::now())
            .unwrap();
        let err =
            FinanceService::add_transaction(&store, txn(gym.id, 4.0, "Tea")).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let budget = Budget::new(gym.id, "Travel", 300.0, MonthKey::new(2025, 5), Utc::now());
        assert!(FinanceService::add_budget(&store, budget).is_err());
        let goal = SavingsGoal::new(gym.id, "Bike", 500.0, Utc::now());
        assert!(FinanceService::add_savings_goal(&store, goal).is_err());

        assert!(store.list::<Transaction>().unwrap().is_empty());
        assert!(store.list::<Budget>().unwrap().is_empty());
        assert!(store.list::<SavingsGoal>().unwrap().is_empty());
        assert_eq!(store.list::<Category>().unwrap().len(), 1);
    }
}
