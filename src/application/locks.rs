use crate::domain::ids::AccountId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-account mutual exclusion for cart mutations and submissions.
///
/// Each account gets its own async mutex, created on first use. Holding the
/// returned guard serializes the read-modify-write of that account's cart
/// against every other engine sharing this registry; other accounts are not
/// affected.
///
/// Entries nobody holds or waits on are dropped on the next `lock` call, so
/// the registry only grows with the number of accounts currently busy.
#[derive(Debug, Default, Clone)]
pub struct AccountLocks {
    locks: Arc<Mutex<HashMap<AccountId, Arc<Mutex<()>>>>>,
}

impl AccountLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, account_id: AccountId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            // A count of one means only the registry still refers to it
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(account_id).or_default())
        };
        lock.lock_owned().await
    }
}
