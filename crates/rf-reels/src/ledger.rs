//! Balance ledger with change observers

use std::fmt;

use crate::error::{SlotError, SlotResult};

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(u64)>;

/// Player balance. Observers are told the new balance after every change.
pub struct BalanceLedger {
    balance: u64,
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
}

impl BalanceLedger {
    pub fn new(initial: u64) -> Self {
        Self {
            balance: initial,
            observers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Register a balance observer. Not called for the current balance.
    pub fn subscribe(&mut self, observer: impl FnMut(u64) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if `id` was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn can_afford(&self, amount: u64) -> bool {
        self.balance >= amount
    }

    /// Take `amount`. On error nothing changes and nobody is notified.
    pub fn debit(&mut self, amount: u64) -> SlotResult<u64> {
        if !self.can_afford(amount) {
            return Err(SlotError::InsufficientBalance {
                balance: self.balance,
                bet: amount,
            });
        }
        self.balance -= amount;
        self.notify();
        Ok(self.balance)
    }

    /// Add `amount` and notify, even for zero
    pub fn credit(&mut self, amount: u64) -> u64 {
        self.balance = self.balance.saturating_add(amount);
        self.notify();
        self.balance
    }

    fn notify(&mut self) {
        let balance = self.balance;
        for (_, observer) in self.observers.iter_mut() {
            observer(balance);
        }
    }
}

impl fmt::Debug for BalanceLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BalanceLedger")
            .field("balance", &self.balance)
            .field("observers", &self.observers.len())
            .finish()
    }
}
