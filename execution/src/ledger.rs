//! Balance, statistics and inventory shared by every game.
//!
//! The ledger is loaded once from its [Store] and written back synchronously
//! after every mutation. Storage failures are logged and never surface to
//! callers: the in-memory record stays authoritative.

use crate::state::Store;
use royal_types::casino::{Item, LedgerRecord, Loot, Stats, CREDIT_AMOUNT, STARTING_BALANCE};
use std::collections::BTreeSet;
use tracing::{info, warn};

pub struct Ledger<S: Store> {
    store: S,
    record: LedgerRecord,
    next_item_id: u64,
}

impl<S: Store> Ledger<S> {
    /// Loads the record from `store`, falling back to the default record when
    /// nothing is stored or the stored blob does not parse.
    pub fn open(store: S) -> Self {
        let record = match store.read() {
            Ok(Some(blob)) => match serde_json::from_str::<LedgerRecord>(&blob) {
                Ok(record) => record,
                Err(e) => {
                    warn!("Discarding corrupt ledger record: {}", e);
                    LedgerRecord::default()
                }
            },
            Ok(None) => LedgerRecord::default(),
            Err(e) => {
                warn!("Storage error during load: {}", e);
                LedgerRecord::default()
            }
        };
        let next_item_id = next_id_after(&record.inventory);
        let mut ledger = Self {
            store,
            record,
            next_item_id,
        };
        let renumbered = ledger.assign_missing_ids();
        if renumbered > 0 {
            info!(renumbered, "assigned fresh inventory ids");
            ledger.persist();
        }
        if ledger.record.balance == 0 {
            info!(balance = STARTING_BALANCE, "balance exhausted, refilling");
            ledger.set_balance(STARTING_BALANCE as i64);
        }
        ledger
    }

    pub fn balance(&self) -> u64 {
        self.record.balance
    }

    /// Sets the balance, clamping negative amounts to zero.
    pub fn set_balance(&mut self, amount: i64) {
        self.record.balance = amount.max(0) as u64;
        self.persist();
    }

    /// Applies a signed delta to the balance, saturating at both ends.
    pub fn add_balance(&mut self, delta: i64) {
        self.record.balance = self.record.balance.saturating_add_signed(delta);
        self.persist();
    }

    pub fn credit(&mut self, amount: u64) {
        self.record.balance = self.record.balance.saturating_add(amount);
        self.persist();
    }

    pub fn debit(&mut self, amount: u64) {
        self.record.balance = self.record.balance.saturating_sub(amount);
        self.persist();
    }

    /// Tops the balance up by the fixed credit amount.
    pub fn take_credit(&mut self) {
        info!(amount = CREDIT_AMOUNT, "credit taken");
        self.credit(CREDIT_AMOUNT);
    }

    pub fn stats(&self) -> &Stats {
        &self.record.stats
    }

    /// Records a settled round. Losses add the full wager to `lost`.
    pub fn record_round(&mut self, wagered: u64, won: u64, is_win: bool) {
        let stats = &mut self.record.stats;
        stats.wagered += wagered;
        stats.games += 1;
        if is_win {
            stats.won += won;
            stats.wins += 1;
            stats.biggest_win = stats.biggest_win.max(won);
        } else {
            stats.lost += wagered;
        }
        self.persist();
    }

    pub fn inventory(&self) -> &[Item] {
        &self.record.inventory
    }

    pub fn item(&self, id: u64) -> Option<&Item> {
        self.record.inventory.iter().find(|item| item.id == id)
    }

    /// Appends `loot` to the inventory under a fresh id.
    pub fn acquire(&mut self, loot: Loot) -> Item {
        let item = Item {
            loot,
            id: self.next_item_id,
        };
        self.next_item_id += 1;
        self.record.inventory.push(item.clone());
        self.persist();
        item
    }

    /// Removes the item with `id`, returning it if it was owned.
    pub fn remove_item(&mut self, id: u64) -> Option<Item> {
        let idx = self.record.inventory.iter().position(|item| item.id == id)?;
        let item = self.record.inventory.remove(idx);
        self.persist();
        Some(item)
    }

    pub fn record(&self) -> &LedgerRecord {
        &self.record
    }

    /// Clears the stored record and restores defaults.
    pub fn reset(&mut self) {
        if let Err(e) = self.store.clear() {
            warn!("Storage error during clear: {}", e);
        }
        self.record = LedgerRecord::default();
        info!("ledger reset");
        self.persist();
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Gives a fresh id to every item whose stored id is 0 or already taken.
    fn assign_missing_ids(&mut self) -> usize {
        let mut seen = BTreeSet::new();
        let mut renumbered = 0;
        for item in &mut self.record.inventory {
            if item.id == 0 || !seen.insert(item.id) {
                item.id = self.next_item_id;
                self.next_item_id += 1;
                seen.insert(item.id);
                renumbered += 1;
            }
        }
        renumbered
    }

    fn persist(&mut self) {
        let blob = match serde_json::to_string(&self.record) {
            Ok(blob) => blob,
            Err(e) => {
                warn!("Failed to encode ledger record: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.write(&blob) {
            warn!("Storage error during save: {}", e);
        }
    }
}

fn next_id_after(inventory: &[Item]) -> u64 {
    inventory.iter().map(|item| item.id).max().map_or(1, |id| id + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::FailingStore;
    use crate::state::Memory;
    use royal_types::casino::Rarity;

    fn loot(name: &str, value: u64) -> Loot {
        Loot {
            name: name.to_string(),
            rarity: Rarity::Common,
            value,
            icon: "🔪".to_string(),
        }
    }

    #[test]
    fn test_fresh_ledger_defaults() {
        let ledger = Ledger::open(Memory::default());
        assert_eq!(ledger.balance(), STARTING_BALANCE);
        assert_eq!(ledger.stats(), &Stats::default());
        assert!(ledger.inventory().is_empty());
    }

    #[test]
    fn test_corrupt_record_falls_back() {
        let ledger = Ledger::open(Memory::with_blob("{not json"));
        assert_eq!(ledger.balance(), STARTING_BALANCE);
        assert_eq!(ledger.stats(), &Stats::default());
    }

    #[test]
    fn test_loads_stored_record() {
        let blob = r#"{"balance":420,"stats":{"wagered":50,"won":0,"lost":50,"games":1,"wins":0,"biggestWin":0}}"#;
        let ledger = Ledger::open(Memory::with_blob(blob));
        assert_eq!(ledger.balance(), 420);
        assert_eq!(ledger.stats().lost, 50);
    }

    #[test]
    fn test_empty_balance_is_refilled() {
        let blob = r#"{"balance":0,"stats":{"wagered":1000,"won":0,"lost":1000,"games":3,"wins":0,"biggestWin":0}}"#;
        let ledger = Ledger::open(Memory::with_blob(blob));
        assert_eq!(ledger.balance(), STARTING_BALANCE);
        // Stats survive the refill
        assert_eq!(ledger.stats().games, 3);
    }

    #[test]
    fn test_balance_never_negative() {
        let mut ledger = Ledger::open(Memory::default());
        ledger.add_balance(-5_000);
        assert_eq!(ledger.balance(), 0);

        ledger.set_balance(-1);
        assert_eq!(ledger.balance(), 0);

        ledger.add_balance(250);
        assert_eq!(ledger.balance(), 250);
    }

    #[test]
    fn test_every_mutation_persists() {
        let mut ledger = Ledger::open(Memory::default());
        ledger.debit(100);

        let stored: LedgerRecord =
            serde_json::from_str(ledger.store().blob().expect("record not saved")).unwrap();
        assert_eq!(stored.balance, 900);

        ledger.record_round(100, 0, false);
        let stored: LedgerRecord = serde_json::from_str(ledger.store().blob().unwrap()).unwrap();
        assert_eq!(stored.stats.lost, 100);
        assert_eq!(stored.stats.wagered, 100);
    }

    #[test]
    fn test_record_round() {
        let mut ledger = Ledger::open(Memory::default());
        ledger.record_round(100, 250, true);
        ledger.record_round(50, 0, false);
        ledger.record_round(20, 40, true);

        let stats = ledger.stats();
        assert_eq!(stats.wagered, 170);
        assert_eq!(stats.won, 290);
        assert_eq!(stats.lost, 50);
        assert_eq!(stats.games, 3);
        assert_eq!(stats.wins, 2);
        assert_eq!(stats.biggest_win, 250);
        assert_eq!(stats.games, stats.wins + stats.losses());
    }

    #[test]
    fn test_take_credit() {
        let mut ledger = Ledger::open(Memory::default());
        ledger.take_credit();
        assert_eq!(ledger.balance(), STARTING_BALANCE + CREDIT_AMOUNT);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut ledger = Ledger::open(Memory::default());
        ledger.debit(700);
        ledger.record_round(700, 0, false);
        ledger.acquire(loot("Basic Knife", 20));

        ledger.reset();
        assert_eq!(ledger.balance(), STARTING_BALANCE);
        assert_eq!(ledger.stats(), &Stats::default());
        assert!(ledger.inventory().is_empty());

        ledger.reset();
        assert_eq!(ledger.balance(), STARTING_BALANCE);
    }

    #[test]
    fn test_inventory_ids_are_unique() {
        let mut ledger = Ledger::open(Memory::default());
        let a = ledger.acquire(loot("Basic Knife", 20));
        let b = ledger.acquire(loot("Simple Gun", 30));
        assert_ne!(a.id, b.id);

        let removed = ledger.remove_item(a.id).expect("item missing");
        assert_eq!(removed.name(), "Basic Knife");
        assert!(ledger.item(a.id).is_none());

        // Removed ids are not handed out again
        let c = ledger.acquire(loot("Blue Pistol", 60));
        assert_ne!(c.id, a.id);
        assert_ne!(c.id, b.id);

        assert!(ledger.remove_item(9_999).is_none());
    }

    #[test]
    fn test_ids_continue_after_reload() {
        let mut ledger = Ledger::open(Memory::default());
        let first = ledger.acquire(loot("Basic Knife", 20));
        let store = Memory::with_blob(ledger.store().blob().unwrap());

        let mut reloaded = Ledger::open(store);
        let second = reloaded.acquire(loot("Simple Gun", 30));
        assert!(second.id > first.id);
    }

    #[test]
    fn test_fractional_ids_keep_record() {
        let blob = r#"{"balance":4321,"stats":{"wagered":70,"won":0,"lost":70,"games":7,"wins":0,"biggestWin":0},"inventory":[
            {"name":"Rare Knife","rarity":"rare","value":120,"icon":"🗡️","id":1718000000000.4567},
            {"name":"Basic Knife","rarity":"common","value":20,"icon":"🔪","id":1718000000000.9},
            {"name":"Golden AK","rarity":"legendary","value":300,"icon":"💎","id":-3}
        ]}"#;
        let mut ledger = Ledger::open(Memory::with_blob(blob));
        assert_eq!(ledger.balance(), 4321);
        assert_eq!(ledger.stats().games, 7);
        assert_eq!(ledger.inventory().len(), 3);

        let ids: BTreeSet<u64> = ledger.inventory().iter().map(|item| item.id).collect();
        assert_eq!(ids.len(), 3);
        assert!(!ids.contains(&0));
        assert_eq!(ledger.inventory()[0].id, 1_718_000_000_000);

        // Renumbered ids are saved and not handed out again
        let stored: LedgerRecord = serde_json::from_str(ledger.store().blob().unwrap()).unwrap();
        assert_eq!(stored.inventory, ledger.inventory());
        let next = ledger.acquire(loot("Simple Gun", 30));
        assert!(!ids.contains(&next.id));
    }

    #[test]
    fn test_large_balance_does_not_wrap() {
        let blob = format!(
            r#"{{"balance":{},"stats":{{"wagered":0,"won":0,"lost":0,"games":0,"wins":0,"biggestWin":0}}}}"#,
            u64::MAX - 10
        );
        let mut ledger = Ledger::open(Memory::with_blob(blob));
        assert_eq!(ledger.balance(), u64::MAX - 10);

        ledger.debit(100);
        assert_eq!(ledger.balance(), u64::MAX - 110);
        ledger.credit(1_000);
        assert_eq!(ledger.balance(), u64::MAX);
        ledger.add_balance(-1);
        assert_eq!(ledger.balance(), u64::MAX - 1);
    }

    #[test]
    fn test_storage_failure_keeps_memory_state() {
        let mut ledger = Ledger::open(FailingStore);
        ledger.debit(300);
        assert_eq!(ledger.balance(), 700);
        ledger.reset();
        assert_eq!(ledger.balance(), STARTING_BALANCE);
    }
}
