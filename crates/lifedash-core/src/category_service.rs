//! Business logic helpers for category management.

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use lifedash_domain::{
    Budget, Category, CategoryType, Item, SavingsGoal, Timestamped, Transaction, WorkoutLog,
};

use crate::{
    objects::{release_image, ImageCleanup, ObjectStore},
    storage::{Record, RecordStore},
    CoreError, CoreResult,
};

/// What a cascading category delete removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryRemoval {
    pub items_removed: usize,
    /// Workout logs, transactions, budgets and savings goals owned by the category.
    pub records_removed: usize,
    pub images: Vec<ImageCleanup>,
}

impl CategoryRemoval {
    pub fn orphaned_images(&self) -> usize {
        self.images
            .iter()
            .filter(|cleanup| cleanup.is_orphaned())
            .count()
    }
}

/// Provides validated operations for [`Category`] records.
pub struct CategoryService;

impl CategoryService {
    /// Returns all categories in creation order.
    pub fn list<S: RecordStore>(store: &S) -> CoreResult<Vec<Category>> {
        store.list()
    }

    /// Loads the owning category of a dedicated record and checks its type.
    pub fn require_kind<S: RecordStore>(
        store: &S,
        id: Uuid,
        kind: CategoryType,
    ) -> CoreResult<Category> {
        let category: Category = store.get(id)?;
        if category.category_type != kind {
            return Err(CoreError::invalid(format!(
                "category `{}` is {}, expected {}",
                category.name,
                category.category_type.label(),
                kind.label()
            )));
        }
        Ok(category)
    }

    pub fn create<S: RecordStore>(
        store: &S,
        name: &str,
        category_type: CategoryType,
        icon: Option<String>,
        now: DateTime<Utc>,
    ) -> CoreResult<Category> {
        let name = Self::validate_name(name)?;
        let mut category = Category::new(name, category_type, now);
        category.icon = icon.filter(|icon| !icon.trim().is_empty());
        let category = store.insert(category)?;
        info!(id = %category.id, kind = %category.category_type, "created category");
        Ok(category)
    }

    pub fn rename<S: RecordStore>(
        store: &S,
        id: Uuid,
        name: &str,
        now: DateTime<Utc>,
    ) -> CoreResult<Category> {
        let mut category: Category = store.get(id)?;
        category.name = Self::validate_name(name)?;
        category.touch(now);
        let category = store.update(category)?;
        info!(%id, name = %category.name, "renamed category");
        Ok(category)
    }

    pub fn set_icon<S: RecordStore>(
        store: &S,
        id: Uuid,
        icon: Option<String>,
        now: DateTime<Utc>,
    ) -> CoreResult<Category> {
        let mut category: Category = store.get(id)?;
        category.icon = icon.filter(|icon| !icon.trim().is_empty());
        category.touch(now);
        store.update(category)
    }

    /// Deletes a category and everything it owns.
    ///
    /// Items are deleted with their images released one by one; release
    /// failures are reported in the result, not raised. Dedicated records are
    /// removed next and the category row last.
    pub fn delete<S, O>(store: &S, objects: &O, id: Uuid) -> CoreResult<CategoryRemoval>
    where
        S: RecordStore,
        O: ObjectStore + ?Sized,
    {
        let category: Category = store.get(id)?;
        let mut removal = CategoryRemoval::default();

        for item in store
            .list::<Item>()?
            .into_iter()
            .filter(|item| item.category_id == id)
        {
            store.delete::<Item>(item.id)?;
            removal.items_removed += 1;
            removal.images.push(release_image(objects, &item.image_url));
        }

        removal.records_removed = Self::delete_owned(store, id, |log: &WorkoutLog| log.category_id)?
            + Self::delete_owned(store, id, |txn: &Transaction| txn.category_id)?
            + Self::delete_owned(store, id, |budget: &Budget| budget.category_id)?
            + Self::delete_owned(store, id, |goal: &SavingsGoal| goal.category_id)?;

        store.delete::<Category>(id)?;
        info!(
            %id,
            name = %category.name,
            items = removal.items_removed,
            records = removal.records_removed,
            orphaned = removal.orphaned_images(),
            "deleted category"
        );
        Ok(removal)
    }

    fn delete_owned<S, R>(store: &S, category_id: Uuid, owner: fn(&R) -> Uuid) -> CoreResult<usize>
    where
        S: RecordStore,
        R: Record,
    {
        let owned: Vec<Uuid> = store
            .list::<R>()?
            .iter()
            .filter(|record| owner(record) == category_id)
            .map(|record| record.id())
            .collect();
        for record_id in &owned {
            store.delete::<R>(*record_id)?;
        }
        Ok(owned.len())
    }

    fn validate_name(candidate: &str) -> CoreResult<String> {
        let trimmed = candidate.trim();
        if trimmed.is_empty() {
            Err(CoreError::invalid("category name cannot be empty"))
        } else {
            Ok(trimmed.to_string())
        }
    }
}
