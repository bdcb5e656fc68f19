//! Personal finance records: transactions, monthly budgets, savings goals.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// Expense labels offered by the transaction form.
pub const EXPENSE_CATEGORIES: [&str; 10] = [
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Bills & Utilities",
    "Healthcare",
    "Education",
    "Travel",
    "Personal Care",
    "Other",
];

/// Payment methods offered by the transaction form.
pub const PAYMENT_METHODS: [&str; 6] = [
    "Cash",
    "Debit Card",
    "Credit Card",
    "Bank Transfer",
    "Mobile Payment",
    "Other",
];

/// Bucket used for expenses recorded without a category label.
pub const UNLABELLED_EXPENSE: &str = "Other";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
    Transfer,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
            TransactionKind::Transfer => "Transfer",
        };
        f.write_str(label)
    }
}

/// A single money movement inside a finance category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub category_id: Uuid,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub description: String,
    #[serde(rename = "transaction_date")]
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_frequency: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        category_id: Uuid,
        kind: TransactionKind,
        amount: f64,
        description: impl Into<String>,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            category_id,
            kind,
            amount,
            description: description.into(),
            date,
            category_name: None,
            payment_method: None,
            is_recurring: false,
            recurring_frequency: None,
            tags: Vec::new(),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_category_name(mut self, name: impl Into<String>) -> Self {
        self.category_name = Some(name.into());
        self
    }

    /// Label used for expense breakdowns; missing or blank labels fall into "Other".
    pub fn breakdown_label(&self) -> &str {
        self.category_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(UNLABELLED_EXPENSE)
    }
}

/// A monthly spending ceiling for one free-text expense label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: Uuid,
    pub category_id: Uuid,
    pub budget_category: String,
    pub amount: f64,
    /// 1-based calendar month.
    pub month: u32,
    pub year: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    pub fn new(
        category_id: Uuid,
        budget_category: impl Into<String>,
        amount: f64,
        period: MonthKey,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            category_id,
            budget_category: budget_category.into(),
            amount,
            month: period.month,
            year: period.year,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn period(&self) -> MonthKey {
        MonthKey::new(self.year, self.month)
    }
}

/// A savings target with its current progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavingsGoal {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SavingsGoal {
    pub fn new(
        category_id: Uuid,
        name: impl Into<String>,
        target_amount: f64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            category_id,
            name: name.into(),
            target_amount,
            current_amount: 0.0,
            target_date: None,
            icon: None,
            color: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Unclamped progress percentage; zero when the target is zero.
    pub fn progress_percent(&self) -> f64 {
        if self.target_amount > 0.0 {
            self.current_amount / self.target_amount * 100.0
        } else {
            0.0
        }
    }

    /// Progress clamped to 100 for bar-fill display.
    pub fn display_progress(&self) -> f64 {
        self.progress_percent().min(100.0)
    }
}

macro_rules! record_traits {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Identifiable for $ty {
                fn id(&self) -> Uuid {
                    self.id
                }
            }

            impl Timestamped for $ty {
                fn created_at(&self) -> DateTime<Utc> {
                    self.created_at
                }

                fn updated_at(&self) -> DateTime<Utc> {
                    self.updated_at
                }

                fn touch(&mut self, now: DateTime<Utc>) {
                    self.updated_at = now;
                }
            }
        )+
    };
}

record_traits!(Transaction, Budget, SavingsGoal);
