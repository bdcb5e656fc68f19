//! Per-table "something changed" notifications.
//!
//! Signals carry no diff; a subscriber re-fetches the whole table when one
//! arrives.

use std::sync::{
    mpsc::{self, Receiver, Sender, TryRecvError},
    Mutex,
};

use lifedash_domain::Table;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableChanged {
    pub table: Table,
}

/// Receiving end handed to one subscriber.
#[derive(Debug)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub table: Table,
    receiver: Receiver<TableChanged>,
}

impl Subscription {
    /// Drains queued signals; true when at least one arrived.
    pub fn take_pending(&self) -> bool {
        let mut changed = false;
        loop {
            match self.receiver.try_recv() {
                Ok(_) => changed = true,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        changed
    }
}

#[derive(Debug)]
struct Subscriber {
    id: SubscriptionId,
    table: Table,
    sender: Sender<TableChanged>,
}

#[derive(Debug, Default)]
struct FeedState {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

#[derive(Debug, Default)]
pub struct ChangeFeed {
    state: Mutex<FeedState>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, table: Table) -> Subscription {
        let (sender, receiver) = mpsc::channel();
        let mut state = self.lock();
        state.next_id += 1;
        let id = SubscriptionId(state.next_id);
        state.subscribers.push(Subscriber { id, table, sender });
        debug!(%table, subscription = id.0, "subscribed to change feed");
        Subscription {
            id,
            table,
            receiver,
        }
    }

    /// Stops delivery to `id`; false when it was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut state = self.lock();
        let before = state.subscribers.len();
        state.subscribers.retain(|subscriber| subscriber.id != id);
        state.subscribers.len() != before
    }

    /// Signals every subscriber of `table`. Dropped receivers are pruned.
    pub fn notify(&self, table: Table) {
        let mut state = self.lock();
        state.subscribers.retain(|subscriber| {
            subscriber.table != table || subscriber.sender.send(TableChanged { table }).is_ok()
        });
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FeedState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("change feed lock poisoned; continuing with inner state");
                poisoned.into_inner()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifies_only_matching_table() {
        let feed = ChangeFeed::new();
        let items = feed.subscribe(Table::Items);
        let todos = feed.subscribe(Table::Todos);

        feed.notify(Table::Items);
        feed.notify(Table::Items);

        assert!(items.take_pending());
        assert!(!items.take_pending());
        assert!(!todos.take_pending());
    }

    #[test]
    fn unsubscribe_and_dropped_receivers_stop_delivery() {
        let feed = ChangeFeed::new();
        let first = feed.subscribe(Table::Budgets);
        let second = feed.subscribe(Table::Budgets);

        assert!(feed.unsubscribe(first.id));
        assert!(!feed.unsubscribe(first.id));
        drop(second);
        feed.notify(Table::Budgets);
        assert_eq!(feed.subscriber_count(), 0);
    }
}
