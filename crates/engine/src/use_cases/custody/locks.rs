//! Per-weapon serialization of custody changes.

use std::sync::Arc;

use armory_domain::WeaponId;
use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per weapon with a custody change in flight.
///
/// Holds no entity data. The store's partial unique index still rejects a
/// second Active row if another process writes to the same database.
#[derive(Default)]
pub struct CustodyLocks {
    weapons: DashMap<WeaponId, Arc<Mutex<()>>>,
}

impl CustodyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other change for `weapon_id` is in flight.
    pub async fn acquire(&self, weapon_id: WeaponId) -> CustodyGuard<'_> {
        let lock = self.weapons.entry(weapon_id).or_default().clone();
        CustodyGuard {
            locks: self,
            weapon_id,
            held: Some(lock.lock_owned().await),
        }
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.weapons.len()
    }
}

/// Held lock for one weapon. The map entry goes away with the last holder.
pub struct CustodyGuard<'a> {
    locks: &'a CustodyLocks,
    weapon_id: WeaponId,
    held: Option<OwnedMutexGuard<()>>,
}

impl Drop for CustodyGuard<'_> {
    fn drop(&mut self) {
        drop(self.held.take());
        // Waiters cloned the Arc under the shard lock, so a count of one
        // means only the map still refers to it.
        self.locks
            .weapons
            .remove_if(&self.weapon_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn same_weapon_waits_other_weapon_does_not() {
        let locks = Arc::new(CustodyLocks::new());
        let held = locks.acquire(WeaponId::new(1)).await;

        let other = tokio::time::timeout(Duration::from_millis(50), locks.acquire(WeaponId::new(2)))
            .await;
        assert!(other.is_ok(), "a different weapon must not block");

        let same = tokio::time::timeout(Duration::from_millis(50), locks.acquire(WeaponId::new(1)))
            .await;
        assert!(same.is_err(), "the same weapon must wait");

        drop(held);
        let same = tokio::time::timeout(Duration::from_millis(50), locks.acquire(WeaponId::new(1)))
            .await;
        assert!(same.is_ok());
    }

    #[tokio::test]
    async fn entries_are_dropped_with_the_last_holder() {
        let locks = CustodyLocks::new();
        {
            let _first = locks.acquire(WeaponId::new(1)).await;
            let _second = locks.acquire(WeaponId::new(2)).await;
            assert_eq!(locks.tracked(), 2);
        }
        assert_eq!(locks.tracked(), 0);
    }

    #[tokio::test]
    async fn waiter_keeps_the_entry_alive() {
        let locks = Arc::new(CustodyLocks::new());
        let held = locks.acquire(WeaponId::new(1)).await;

        let waiter = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(WeaponId::new(1)).await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        drop(held);
        assert_eq!(locks.tracked(), 1, "the waiter still holds the mutex");

        waiter.await.expect("waiter finishes");
        assert_eq!(locks.tracked(), 0);
    }
}
