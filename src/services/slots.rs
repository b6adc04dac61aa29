use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::models::UserSlots;

/// Keyed storage for per-user conversation slots.
///
/// Records are created lazily: `get` on an unknown user returns default
/// slots and registers them.
pub trait SlotStore: Send + Sync {
    fn get(&self, user_id: &str) -> anyhow::Result<UserSlots>;
    fn upsert(&self, user_id: &str, slots: &UserSlots) -> anyhow::Result<()>;
    fn reset(&self, user_id: &str) -> anyhow::Result<()>;
}

#[derive(Default)]
pub struct InMemorySlotStore {
    slots: Mutex<HashMap<String, UserSlots>>,
}

impl InMemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SlotStore for InMemorySlotStore {
    fn get(&self, user_id: &str) -> anyhow::Result<UserSlots> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| anyhow::anyhow!("slot store lock poisoned"))?;
        Ok(slots.entry(user_id.to_string()).or_default().clone())
    }

    fn upsert(&self, user_id: &str, updated: &UserSlots) -> anyhow::Result<()> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| anyhow::anyhow!("slot store lock poisoned"))?;
        slots.insert(user_id.to_string(), updated.clone());
        Ok(())
    }

    fn reset(&self, user_id: &str) -> anyhow::Result<()> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| anyhow::anyhow!("slot store lock poisoned"))?;
        slots.entry(user_id.to_string()).or_default().reset();
        Ok(())
    }
}

/// Per-user turn locks. A turn holds its user's guard from the first slot
/// read to the last outbound send, so turns for one user never interleave.
/// A user's entry is dropped once no turn holds or waits on it.
type LockMap = HashMap<String, Arc<tokio::sync::Mutex<()>>>;

#[derive(Default)]
pub struct TurnLocks {
    locks: Mutex<LockMap>,
}

impl TurnLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, user_id: &str) -> TurnGuard<'_> {
        let lock = {
            let mut locks = self.map();
            Arc::clone(locks.entry(user_id.to_string()).or_default())
        };
        let guard = Arc::clone(&lock).lock_owned().await;
        TurnGuard {
            locks: self,
            user_id: user_id.to_string(),
            lock,
            guard: Some(guard),
        }
    }

    /// Number of users with a turn running or queued.
    pub fn active(&self) -> usize {
        self.map().len()
    }

    fn map(&self) -> std::sync::MutexGuard<'_, LockMap> {
        self.locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

pub struct TurnGuard<'a> {
    locks: &'a TurnLocks,
    user_id: String,
    lock: Arc<tokio::sync::Mutex<()>>,
    guard: Option<tokio::sync::OwnedMutexGuard<()>>,
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        let mut locks = self.locks.map();
        // One reference in the map and one here: nobody else is waiting.
        if Arc::strong_count(&self.lock) == 2 {
            locks.remove(&self.user_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DesiredTime, Location};

    #[test]
    fn test_get_creates_default_record() {
        let store = InMemorySlotStore::new();
        assert!(store.is_empty());

        let slots = store.get("user-1").unwrap();
        assert_eq!(slots, UserSlots::default());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_reset_keeps_record() {
        let store = InMemorySlotStore::new();
        let slots = UserSlots {
            preferred_cuisine: Some("thai".to_string()),
            location: Some(Location { lat: 1.0, long: 2.0 }),
            desired_time: Some(DesiredTime::Tonight),
            debug_enabled: true,
        };
        store.upsert("user-1", &slots).unwrap();

        store.reset("user-1").unwrap();

        assert_eq!(store.get("user-1").unwrap(), UserSlots::default());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_users_are_isolated() {
        let store = InMemorySlotStore::new();
        let mut slots = store.get("a").unwrap();
        slots.preferred_cuisine = Some("korean".to_string());
        store.upsert("a", &slots).unwrap();

        assert_eq!(store.get("b").unwrap().preferred_cuisine, None);
        assert_eq!(
            store.get("a").unwrap().preferred_cuisine.as_deref(),
            Some("korean")
        );
    }

    #[tokio::test]
    async fn test_turn_lock_serializes_same_user() {
        let locks = Arc::new(TurnLocks::new());
        let guard = locks.acquire("a").await;

        let contender = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let _g = locks.acquire("a").await;
            })
        };
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        // Another user is not blocked.
        let _other = locks.acquire("b").await;

        drop(guard);
        contender.await.unwrap();
    }

    #[tokio::test]
    async fn test_turn_lock_entries_are_released() {
        let locks = Arc::new(TurnLocks::new());
        let first = locks.acquire("a").await;
        assert_eq!(locks.active(), 1);

        let waiter = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let _g = locks.acquire("a").await;
            })
        };
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        // Releasing while another turn waits keeps the entry.
        drop(first);
        assert_eq!(locks.active(), 1);

        waiter.await.unwrap();
        assert_eq!(locks.active(), 0);

        let _again = locks.acquire("a").await;
        assert_eq!(locks.active(), 1);
    }
}
