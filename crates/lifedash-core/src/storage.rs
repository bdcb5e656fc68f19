use std::{cmp::Ordering, sync::Arc};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use uuid::Uuid;

use lifedash_domain::{
    Budget, Category, Identifiable, Item, SavingsGoal, Table, Timestamped, Todo, Transaction,
    WorkoutLog,
};

use crate::{feed::ChangeFeed, CoreError};

/// A row kind kept in one store table.
pub trait Record:
    Serialize + DeserializeOwned + Clone + Identifiable + Timestamped + Send + Sync + 'static
{
    const TABLE: Table;

    /// Listing order the store applies to this table.
    fn list_order(a: &Self, b: &Self) -> Ordering;
}

impl Record for Category {
    const TABLE: Table = Table::Categories;

    fn list_order(a: &Self, b: &Self) -> Ordering {
        a.created_at.cmp(&b.created_at)
    }
}

impl Record for Item {
    const TABLE: Table = Table::Items;

    fn list_order(a: &Self, b: &Self) -> Ordering {
        b.created_at.cmp(&a.created_at)
    }
}

impl Record for WorkoutLog {
    const TABLE: Table = Table::WorkoutLogs;

    fn list_order(a: &Self, b: &Self) -> Ordering {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    }
}

impl Record for Transaction {
    const TABLE: Table = Table::Transactions;

    fn list_order(a: &Self, b: &Self) -> Ordering {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    }
}

impl Record for Budget {
    const TABLE: Table = Table::Budgets;

    fn list_order(a: &Self, b: &Self) -> Ordering {
        b.period()
            .cmp(&a.period())
            .then_with(|| a.budget_category.cmp(&b.budget_category))
    }
}

impl Record for SavingsGoal {
    const TABLE: Table = Table::SavingsGoals;

    /// Target date ascending; goals without a date go last.
    fn list_order(a: &Self, b: &Self) -> Ordering {
        match (a.target_date, b.target_date) {
            (Some(left), Some(right)) => left.cmp(&right),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.created_at.cmp(&b.created_at),
        }
    }
}

impl Record for Todo {
    const TABLE: Table = Table::Todos;

    fn list_order(a: &Self, b: &Self) -> Ordering {
        b.created_at.cmp(&a.created_at)
    }
}

/// Collection-scoped CRUD over the external record store.
///
/// `update` replaces the stored row with the same id. Every successful
/// mutation is announced on the store's change feed, when it has one.
pub trait RecordStore: Send + Sync {
    fn list<R: Record>(&self) -> Result<Vec<R>, CoreError>;
    fn insert<R: Record>(&self, record: R) -> Result<R, CoreError>;
    fn update<R: Record>(&self, record: R) -> Result<R, CoreError>;
    fn delete<R: Record>(&self, id: Uuid) -> Result<(), CoreError>;

    fn get<R: Record>(&self, id: Uuid) -> Result<R, CoreError> {
        self.list::<R>()?
            .into_iter()
            .find(|record| record.id() == id)
            .ok_or_else(|| CoreError::not_found(R::TABLE, id))
    }

    fn changes(&self) -> Option<Arc<ChangeFeed>> {
        None
    }
}

/// Encodes a record as a stored row.
pub fn encode_row<R: Record>(record: &R) -> Result<Value, CoreError> {
    Ok(serde_json::to_value(record)?)
}

/// Decodes stored rows and applies the table's listing order.
pub fn decode_rows<R: Record>(rows: &[Value]) -> Result<Vec<R>, CoreError> {
    let mut records = rows
        .iter()
        .map(|row| serde_json::from_value::<R>(row.clone()))
        .collect::<Result<Vec<_>, _>>()?;
    records.sort_by(R::list_order);
    Ok(records)
}

/// Reads the `id` column of a stored row.
pub fn row_id(row: &Value) -> Option<Uuid> {
    row.get("id")
        .and_then(Value::as_str)
        .and_then(|raw| Uuid::parse_str(raw).ok())
}

/// Row-level table mutations shared by the concrete stores.
pub fn insert_row<R: Record>(rows: &mut Vec<Value>, record: &R) -> Result<(), CoreError> {
    if rows.iter().any(|row| row_id(row) == Some(record.id())) {
        return Err(CoreError::Storage(format!(
            "duplicate id {} in {}",
            record.id(),
            R::TABLE
        )));
    }
    rows.push(encode_row(record)?);
    Ok(())
}

pub fn replace_row<R: Record>(rows: &mut [Value], record: &R) -> Result<(), CoreError> {
    let slot = rows
        .iter_mut()
        .find(|row| row_id(row) == Some(record.id()))
        .ok_or_else(|| CoreError::not_found(R::TABLE, record.id()))?;
    *slot = encode_row(record)?;
    Ok(())
}

pub fn remove_row(table: Table, rows: &mut Vec<Value>, id: Uuid) -> Result<(), CoreError> {
    let before = rows.len();
    rows.retain(|row| row_id(row) != Some(id));
    if rows.len() == before {
        return Err(CoreError::not_found(table, id));
    }
    Ok(())
}
