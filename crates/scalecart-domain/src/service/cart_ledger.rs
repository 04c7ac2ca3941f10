//! Per-customer cart ledger

use std::collections::HashMap;

use scalecart_types::RegistrationPolicy;
use tracing::debug;

use crate::model::{CartKey, CartLine};

/// What a registration did to the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// A new cart line was created
    Added,
    /// The key already existed; count left unchanged
    Refreshed,
    /// The item's existing line moved to a new weight
    Rekeyed { previous_weight: u32 },
}

/// Cart lines keyed by (item class, captured weight), in insertion order
///
/// Lines are only ever created or refreshed by [`CartLedger::register`] and
/// only ever removed all at once by [`CartLedger::reset`].
#[derive(Debug, Clone, Default)]
pub struct CartLedger {
    policy: RegistrationPolicy,
    lines: Vec<CartLine>,
    index: HashMap<CartKey, usize>,
}

impl CartLedger {
    pub fn new(policy: RegistrationPolicy) -> Self {
        Self {
            policy,
            lines: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn policy(&self) -> RegistrationPolicy {
        self.policy
    }

    /// Record the item on the scale at its captured weight
    ///
    /// Repeated registrations of one physical item never raise the count.
    pub fn register(&mut self, item_name: &str, weight: u32) -> RegisterOutcome {
        let key = CartKey::new(item_name, weight);
        if let Some(&idx) = self.index.get(&key) {
            self.lines[idx].captured_weight = weight;
            debug!(item = item_name, weight_g = weight, "cart line refreshed");
            return RegisterOutcome::Refreshed;
        }

        if self.policy == RegistrationPolicy::Overwrite {
            if let Some(idx) = self.lines.iter().position(|l| l.item_name == item_name) {
                let previous_weight = self.lines[idx].captured_weight;
                self.index.remove(&self.lines[idx].key());
                self.lines[idx].captured_weight = weight;
                self.index.insert(key, idx);
                debug!(
                    item = item_name,
                    weight_g = weight,
                    previous_weight_g = previous_weight,
                    "cart line re-weighed"
                );
                return RegisterOutcome::Rekeyed { previous_weight };
            }
        }

        self.lines.push(CartLine {
            item_name: item_name.to_string(),
            captured_weight: weight,
            count: 1,
        });
        self.index.insert(key, self.lines.len() - 1);
        debug!(item = item_name, weight_g = weight, "cart line added");
        RegisterOutcome::Added
    }

    /// Drop every line; only done after a checkout handoff
    pub fn reset(&mut self) {
        self.lines.clear();
        self.index.clear();
    }

    pub fn get(&self, key: &CartKey) -> Option<&CartLine> {
        self.index.get(key).map(|&idx| &self.lines[idx])
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reregistering_same_key_keeps_count() {
        let mut ledger = CartLedger::new(RegistrationPolicy::Overwrite);
        assert_eq!(ledger.register("apple", 150), RegisterOutcome::Added);
        assert_eq!(ledger.register("apple", 150), RegisterOutcome::Refreshed);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.lines()[0].count, 1);
    }

    #[test]
    fn test_overwrite_rekeys_to_latest_weight() {
        let mut ledger = CartLedger::new(RegistrationPolicy::Overwrite);
        ledger.register("apple", 50);
        assert_eq!(
            ledger.register("apple", 55),
            RegisterOutcome::Rekeyed { previous_weight: 50 }
        );

        let apples: Vec<_> = ledger.lines().iter().filter(|l| l.item_name == "apple").collect();
        assert_eq!(apples.len(), 1);
        assert_eq!(apples[0].captured_weight, 55);
        assert_eq!(apples[0].count, 1);
        assert!(ledger.get(&CartKey::new("apple", 50)).is_none());
        assert!(ledger.get(&CartKey::new("apple", 55)).is_some());
    }

    #[test]
    fn test_per_weight_keeps_separate_lines() {
        let mut ledger = CartLedger::new(RegistrationPolicy::PerWeight);
        ledger.register("rice", 500);
        ledger.register("rice", 1000);
        ledger.register("rice", 500);
        assert_eq!(ledger.len(), 2);
        assert!(ledger.lines().iter().all(|l| l.count == 1));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut ledger = CartLedger::new(RegistrationPolicy::Overwrite);
        ledger.register("milk", 500);
        ledger.register("banana", 345);
        ledger.register("milk", 505);
        ledger.register("apple", 150);
        let names: Vec<&str> = ledger.lines().iter().map(|l| l.item_name.as_str()).collect();
        assert_eq!(names, vec!["milk", "banana", "apple"]);
    }

    #[test]
    fn test_reset_starts_fresh_key_space() {
        let mut ledger = CartLedger::new(RegistrationPolicy::Overwrite);
        ledger.register("apple", 50);
        ledger.register("banana", 345);
        ledger.reset();
        assert!(ledger.is_empty());
        assert!(ledger.get(&CartKey::new("apple", 50)).is_none());
        assert_eq!(ledger.register("apple", 50), RegisterOutcome::Added);
        assert_eq!(ledger.len(), 1);
    }
}
