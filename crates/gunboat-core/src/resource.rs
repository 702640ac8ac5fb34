//! Bounded stock-and-flow counter used for health, energy and powerup integrity.

use serde::{Deserialize, Serialize};

/// A stock of some resource bounded by `[0, capacity]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceCache {
    capacity: f64,
    stored: f64,
}

impl ResourceCache {
    /// Creates a cache. Negative or non-finite inputs are treated as zero and
    /// the initial stock is clamped to the capacity.
    pub fn new(capacity: f64, stored: f64) -> Self {
        let capacity = sanitize(capacity);
        Self {
            capacity,
            stored: sanitize(stored).min(capacity),
        }
    }

    /// A cache holding its full capacity.
    pub fn full(capacity: f64) -> Self {
        Self::new(capacity, capacity)
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn stored(&self) -> f64 {
        self.stored
    }

    /// Fraction of capacity currently stored. An empty-capacity cache reports 0.
    pub fn fraction(&self) -> f64 {
        if self.capacity > 0.0 {
            self.stored / self.capacity
        } else {
            0.0
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stored <= 0.0
    }

    pub fn is_full(&self) -> bool {
        self.stored >= self.capacity
    }

    /// Removes up to `amount` and returns how much was actually removed.
    pub fn take(&mut self, amount: f64) -> f64 {
        let taken = sanitize(amount).min(self.stored);
        self.stored -= taken;
        if self.stored < 0.0 {
            self.stored = 0.0;
        }
        taken
    }

    /// Removes exactly `amount` if that much is stored, otherwise nothing.
    pub fn try_take(&mut self, amount: f64) -> bool {
        let amount = sanitize(amount);
        if amount > self.stored {
            return false;
        }
        self.take(amount);
        true
    }

    /// Adds up to `amount` and returns the overflow that did not fit.
    pub fn offer(&mut self, amount: f64) -> f64 {
        let amount = sanitize(amount);
        let accepted = amount.min(self.capacity - self.stored).max(0.0);
        self.stored = (self.stored + accepted).min(self.capacity);
        amount - accepted
    }

    /// Empties the cache, returning what was stored.
    pub fn drain(&mut self) -> f64 {
        std::mem::take(&mut self.stored)
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
