//! Top-level coordinator over the record and object stores.
//!
//! A [`Dashboard`] loads every collection once, keeps them current by
//! draining change-feed signals, and routes user intents to the services.
//! Reads for the screens go through the view builders in [`crate::views`].

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use lifedash_config::Config;
use lifedash_core::{
    CategoryService, ChangeFeed, Clock, FinanceService, FitnessService, ImageCleanup, ImageUpload,
    ItemChanges, ItemService, NewItem, ObjectStore, RecordStore, Subscription, TodoService,
};
use lifedash_domain::{
    Budget, Category, CategoryType, Item, SavingsGoal, Table, Todo, Transaction, WorkoutLog,
};
use lifedash_storage_json::{FsObjectStore, JsonRecordStore};

use crate::{
    errors::DashboardError,
    ui::{DetailRenderer, MoneyFormat},
    views::{FinanceLimits, FinanceView, FitnessView, ItemGrid, ItemSort, TodoView},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    /// Blocking failure; the reason comes from the store.
    Failed(String),
}

/// Every collection as last fetched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub categories: Vec<Category>,
    pub items: Vec<Item>,
    pub workout_logs: Vec<WorkoutLog>,
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub savings_goals: Vec<SavingsGoal>,
    pub todos: Vec<Todo>,
}

#[derive(Debug, Clone)]
pub enum CategoryIntent {
    Create {
        name: String,
        category_type: CategoryType,
        icon: Option<String>,
    },
    Rename {
        id: Uuid,
        name: String,
    },
    SetIcon {
        id: Uuid,
        icon: Option<String>,
    },
    Delete(Uuid),
}

#[derive(Debug, Clone)]
pub enum ItemIntent {
    Create { category_id: Uuid, item: NewItem },
    Update { id: Uuid, changes: ItemChanges },
    ReplaceImage { id: Uuid, image: ImageUpload },
    Delete(Uuid),
}

#[derive(Debug, Clone)]
pub enum FinanceIntent {
    AddTransaction(Transaction),
    UpdateTransaction(Transaction),
    DeleteTransaction(Uuid),
    AddBudget(Budget),
    DeleteBudget(Uuid),
    AddSavingsGoal(SavingsGoal),
    UpdateSavingsGoal(SavingsGoal),
    DeleteSavingsGoal(Uuid),
}

#[derive(Debug, Clone)]
pub enum FitnessIntent {
    AddWorkout(WorkoutLog),
    UpdateWorkout(WorkoutLog),
    DeleteWorkout(Uuid),
}

#[derive(Debug, Clone)]
pub enum TodoIntent {
    Add(Todo),
    Update(Todo),
    Toggle(Uuid),
    Delete(Uuid),
}

/// A user action emitted by one of the views.
#[derive(Debug, Clone)]
pub enum Intent {
    Category(CategoryIntent),
    Item(ItemIntent),
    Finance(FinanceIntent),
    Fitness(FitnessIntent),
    Todo(TodoIntent),
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::Category(CategoryIntent::Create { .. }) => "category.create",
            Intent::Category(CategoryIntent::Rename { .. }) => "category.rename",
            Intent::Category(CategoryIntent::SetIcon { .. }) => "category.set_icon",
            Intent::Category(CategoryIntent::Delete(_)) => "category.delete",
            Intent::Item(ItemIntent::Create { .. }) => "item.create",
            Intent::Item(ItemIntent::Update { .. }) => "item.update",
            Intent::Item(ItemIntent::ReplaceImage { .. }) => "item.replace_image",
            Intent::Item(ItemIntent::Delete(_)) => "item.delete",
            Intent::Finance(FinanceIntent::AddTransaction(_)) => "finance.add_transaction",
            Intent::Finance(FinanceIntent::UpdateTransaction(_)) => "finance.update_transaction",
            Intent::Finance(FinanceIntent::DeleteTransaction(_)) => "finance.delete_transaction",
            Intent::Finance(FinanceIntent::AddBudget(_)) => "finance.add_budget",
            Intent::Finance(FinanceIntent::DeleteBudget(_)) => "finance.delete_budget",
            Intent::Finance(FinanceIntent::AddSavingsGoal(_)) => "finance.add_goal",
            Intent::Finance(FinanceIntent::UpdateSavingsGoal(_)) => "finance.update_goal",
            Intent::Finance(FinanceIntent::DeleteSavingsGoal(_)) => "finance.delete_goal",
            Intent::Fitness(FitnessIntent::AddWorkout(_)) => "fitness.add_workout",
            Intent::Fitness(FitnessIntent::UpdateWorkout(_)) => "fitness.update_workout",
            Intent::Fitness(FitnessIntent::DeleteWorkout(_)) => "fitness.delete_workout",
            Intent::Todo(TodoIntent::Add(_)) => "todo.add",
            Intent::Todo(TodoIntent::Update(_)) => "todo.update",
            Intent::Todo(TodoIntent::Toggle(_)) => "todo.toggle",
            Intent::Todo(TodoIntent::Delete(_)) => "todo.delete",
        }
    }
}

impl From<CategoryIntent> for Intent {
    fn from(intent: CategoryIntent) -> Self {
        Intent::Category(intent)
    }
}

impl From<ItemIntent> for Intent {
    fn from(intent: ItemIntent) -> Self {
        Intent::Item(intent)
    }
}

impl From<FinanceIntent> for Intent {
    fn from(intent: FinanceIntent) -> Self {
        Intent::Finance(intent)
    }
}

impl From<FitnessIntent> for Intent {
    fn from(intent: FitnessIntent) -> Self {
        Intent::Fitness(intent)
    }
}

impl From<TodoIntent> for Intent {
    fn from(intent: TodoIntent) -> Self {
        Intent::Todo(intent)
    }
}

/// What a dispatched intent changed besides its records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntentReport {
    /// The id of a created record, when the intent created one.
    pub created: Option<Uuid>,
    pub images: Vec<ImageCleanup>,
}

impl IntentReport {
    fn created(id: Uuid) -> Self {
        Self {
            created: Some(id),
            images: Vec::new(),
        }
    }

    fn images(images: Vec<ImageCleanup>) -> Self {
        Self {
            created: None,
            images,
        }
    }

    pub fn orphaned_images(&self) -> usize {
        self.images
            .iter()
            .filter(|cleanup| cleanup.is_orphaned())
            .count()
    }
}

pub struct Dashboard<S, O> {
    store: S,
    objects: O,
    clock: Box<dyn Clock>,
    config: Config,
    state: LoadState,
    snapshot: Snapshot,
    subscriptions: Vec<Subscription>,
}

impl Dashboard<JsonRecordStore, FsObjectStore> {
    /// Opens the filesystem-backed stores under the configured data dir.
    pub fn open(config: Config, clock: Box<dyn Clock>) -> Result<Self, DashboardError> {
        let feed = Arc::new(ChangeFeed::new());
        let store = JsonRecordStore::with_feed(config.records_dir(), feed)?;
        let objects = FsObjectStore::new(
            config.objects_dir(),
            config.image_bucket.clone(),
            config.resolve_public_base_url(),
        )?;
        info!(root = %store.root().display(), "opened json stores");
        Ok(Self::new(store, objects, clock, config))
    }
}

impl<S, O> Dashboard<S, O>
where
    S: RecordStore,
    O: ObjectStore,
{
    /// Subscribes to every table when the store has a change feed.
    pub fn new(store: S, objects: O, clock: Box<dyn Clock>, config: Config) -> Self {
        let subscriptions = store
            .changes()
            .map(|feed| {
                Table::ALL
                    .iter()
                    .map(|table| feed.subscribe(*table))
                    .collect()
            })
            .unwrap_or_default();
        Self {
            store,
            objects,
            clock,
            config,
            state: LoadState::Loading,
            snapshot: Snapshot::default(),
            subscriptions,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn objects(&self) -> &O {
        &self.objects
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// User-facing text for the blocking failure screen.
    pub fn failure_message(&self) -> Option<String> {
        match &self.state {
            LoadState::Failed(reason) => Some(DashboardError::LoadFailed(reason.clone()).to_string()),
            _ => None,
        }
    }

    /// Fetches every collection. Any failure leaves the dashboard in
    /// [`LoadState::Failed`] and keeps the previous snapshot.
    pub fn load(&mut self) -> Result<(), DashboardError> {
        self.state = LoadState::Loading;
        let snapshot = Table::ALL.iter().try_fold(Snapshot::default(), |mut snapshot, table| {
            self.fetch_into(&mut snapshot, *table).map(|_| snapshot)
        });
        match snapshot {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                for subscription in &self.subscriptions {
                    subscription.take_pending();
                }
                self.state = LoadState::Ready;
                info!(
                    categories = self.snapshot.categories.len(),
                    items = self.snapshot.items.len(),
                    "dashboard loaded"
                );
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "dashboard load failed");
                let reason = err.to_string();
                self.state = LoadState::Failed(reason.clone());
                Err(DashboardError::LoadFailed(reason))
            }
        }
    }

    /// Re-fetches one collection in full.
    pub fn refresh(&mut self, table: Table) -> Result<(), DashboardError> {
        let mut snapshot = std::mem::take(&mut self.snapshot);
        let outcome = self.fetch_into(&mut snapshot, table);
        self.snapshot = snapshot;
        outcome?;
        debug!(%table, "refreshed collection");
        Ok(())
    }

    /// Drains change signals and re-fetches exactly the changed tables.
    pub fn refresh_pending(&mut self) -> Result<Vec<Table>, DashboardError> {
        let changed: Vec<Table> = self
            .subscriptions
            .iter()
            .filter(|subscription| subscription.take_pending())
            .map(|subscription| subscription.table)
            .collect();
        for table in &changed {
            self.refresh(*table)?;
        }
        Ok(changed)
    }

    /// Runs one intent against the stores, then brings the snapshot up to date.
    ///
    /// Store errors abort the intent and leave the snapshot as it was.
    pub fn dispatch(&mut self, intent: impl Into<Intent>) -> Result<IntentReport, DashboardError> {
        if let LoadState::Failed(reason) = &self.state {
            return Err(DashboardError::LoadFailed(reason.clone()));
        }
        let intent = intent.into();
        let name = intent.name();
        let now = self.clock.now();
        let store = &self.store;
        let objects = &self.objects;

        let (touched, report): (Vec<Table>, IntentReport) = match intent {
            Intent::Category(intent) => match intent {
                CategoryIntent::Create {
                    name,
                    category_type,
                    icon,
                } => {
                    let category = CategoryService::create(store, &name, category_type, icon, now)?;
                    (vec![Table::Categories], IntentReport::created(category.id))
                }
                CategoryIntent::Rename { id, name } => {
                    CategoryService::rename(store, id, &name, now)?;
                    (vec![Table::Categories], IntentReport::default())
                }
                CategoryIntent::SetIcon { id, icon } => {
                    CategoryService::set_icon(store, id, icon, now)?;
                    (vec![Table::Categories], IntentReport::default())
                }
                CategoryIntent::Delete(id) => {
                    let removal = CategoryService::delete(store, objects, id)?;
                    let touched = Table::ALL
                        .iter()
                        .copied()
                        .filter(|table| *table != Table::Todos)
                        .collect();
                    (touched, IntentReport::images(removal.images))
                }
            },
            Intent::Item(intent) => match intent {
                ItemIntent::Create { category_id, item } => {
                    let category: Category = store.get(category_id)?;
                    let item = ItemService::create(store, objects, &category, item, now)?;
                    (vec![Table::Items], IntentReport::created(item.id))
                }
                ItemIntent::Update { id, changes } => {
                    let item: Item = store.get(id)?;
                    let category: Category = store.get(item.category_id)?;
                    ItemService::update(store, &category, id, changes, now)?;
                    (vec![Table::Items], IntentReport::default())
                }
                ItemIntent::ReplaceImage { id, image } => {
                    let (_, cleanup) = ItemService::replace_image(store, objects, id, image, now)?;
                    (vec![Table::Items], IntentReport::images(vec![cleanup]))
                }
                ItemIntent::Delete(id) => {
                    let cleanup = ItemService::delete(store, objects, id)?;
                    (vec![Table::Items], IntentReport::images(vec![cleanup]))
                }
            },
            Intent::Finance(intent) => match intent {
                FinanceIntent::AddTransaction(txn) => {
                    let txn = FinanceService::add_transaction(store, txn)?;
                    (vec![Table::Transactions], IntentReport::created(txn.id))
                }
                FinanceIntent::UpdateTransaction(txn) => {
                    FinanceService::update_transaction(store, txn, now)?;
                    (vec![Table::Transactions], IntentReport::default())
                }
                FinanceIntent::DeleteTransaction(id) => {
                    FinanceService::delete_transaction(store, id)?;
                    (vec![Table::Transactions], IntentReport::default())
                }
                FinanceIntent::AddBudget(budget) => {
                    let budget = FinanceService::add_budget(store, budget)?;
                    (vec![Table::Budgets], IntentReport::created(budget.id))
                }
                FinanceIntent::DeleteBudget(id) => {
                    FinanceService::delete_budget(store, id)?;
                    (vec![Table::Budgets], IntentReport::default())
                }
                FinanceIntent::AddSavingsGoal(goal) => {
                    let goal = FinanceService::add_savings_goal(store, goal)?;
                    (vec![Table::SavingsGoals], IntentReport::created(goal.id))
                }
                FinanceIntent::UpdateSavingsGoal(goal) => {
                    FinanceService::update_savings_goal(store, goal, now)?;
                    (vec![Table::SavingsGoals], IntentReport::default())
                }
                FinanceIntent::DeleteSavingsGoal(id) => {
                    FinanceService::delete_savings_goal(store, id)?;
                    (vec![Table::SavingsGoals], IntentReport::default())
                }
            },
            Intent::Fitness(intent) => match intent {
                FitnessIntent::AddWorkout(log) => {
                    let log = FitnessService::add_workout(store, log)?;
                    (vec![Table::WorkoutLogs], IntentReport::created(log.id))
                }
                FitnessIntent::UpdateWorkout(log) => {
                    FitnessService::update_workout(store, log, now)?;
                    (vec![Table::WorkoutLogs], IntentReport::default())
                }
                FitnessIntent::DeleteWorkout(id) => {
                    FitnessService::delete_workout(store, id)?;
                    (vec![Table::WorkoutLogs], IntentReport::default())
                }
            },
            Intent::Todo(intent) => match intent {
                TodoIntent::Add(todo) => {
                    let todo = TodoService::add(store, todo)?;
                    (vec![Table::Todos], IntentReport::created(todo.id))
                }
                TodoIntent::Update(todo) => {
                    TodoService::update(store, todo, now)?;
                    (vec![Table::Todos], IntentReport::default())
                }
                TodoIntent::Toggle(id) => {
                    TodoService::toggle(store, id, now)?;
                    (vec![Table::Todos], IntentReport::default())
                }
                TodoIntent::Delete(id) => {
                    TodoService::delete(store, id)?;
                    (vec![Table::Todos], IntentReport::default())
                }
            },
        };

        info!(intent = name, orphaned = report.orphaned_images(), "dispatched intent");
        self.sync(&touched)?;
        Ok(report)
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.snapshot
            .categories
            .iter()
            .find(|category| category.id == id)
    }

    /// Detail renderer honoring the configured color preference.
    pub fn detail_renderer(&self) -> DetailRenderer {
        DetailRenderer::from(&self.config)
    }

    pub fn item_grid(&self, selected: Option<Uuid>, sort: ItemSort) -> ItemGrid<'_> {
        ItemGrid::build(&self.snapshot.categories, &self.snapshot.items, selected, sort)
    }

    pub fn finance_view(&self, category_id: Uuid) -> FinanceView {
        FinanceView::build(
            category_id,
            &self.snapshot.transactions,
            &self.snapshot.budgets,
            &self.snapshot.savings_goals,
            self.today(),
            FinanceLimits::from(&self.config),
            MoneyFormat::from(&self.config),
        )
    }

    pub fn fitness_view(&self, category_id: Uuid) -> FitnessView {
        FitnessView::with_config(
            category_id,
            &self.snapshot.workout_logs,
            self.today(),
            &self.config,
        )
    }

    pub fn todo_view(&self) -> TodoView<'_> {
        TodoView::build(&self.snapshot.todos, self.today())
    }

    /// Without a feed the touched tables are re-fetched directly.
    fn sync(&mut self, touched: &[Table]) -> Result<(), DashboardError> {
        if self.subscriptions.is_empty() {
            for table in touched {
                self.refresh(*table)?;
            }
        } else {
            self.refresh_pending()?;
        }
        Ok(())
    }

    fn fetch_into(&self, snapshot: &mut Snapshot, table: Table) -> Result<(), DashboardError> {
        let store = &self.store;
        match table {
            Table::Categories => snapshot.categories = store.list()?,
            Table::Items => snapshot.items = store.list()?,
            Table::WorkoutLogs => snapshot.workout_logs = store.list()?,
            Table::Transactions => snapshot.transactions = store.list()?,
            Table::Budgets => snapshot.budgets = store.list()?,
            Table::SavingsGoals => snapshot.savings_goals = store.list()?,
            Table::Todos => snapshot.todos = store.list()?,
        }
        Ok(())
    }
}
