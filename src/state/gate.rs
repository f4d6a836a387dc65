/// Password prompt gating the portfolio
///
/// This is a soft content gate, not access control: the secret ships inside
/// the binary in plain form and anyone can read it out.
use super::storage::KeyValueStore;

/// Storage key holding the accepted password
pub const STORAGE_KEY: &str = "portfolio-password";

/// Shown when a submission does not match
pub const DENIED_MESSAGE: &str = "Incorrect password. Please try again.";

/// Build-time secret, overridable with `FOLIO_SECRET` at compile time
pub const SECRET: &str = match option_env!("FOLIO_SECRET") {
    Some(secret) => secret,
    None => "ProductManagementJourney",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    Denied,
}

#[derive(Debug)]
pub struct AccessGate<S> {
    store: S,
    secret: String,
    unlocked: bool,
    error: Option<&'static str>,
}

impl<S: KeyValueStore> AccessGate<S> {
    /// Open the gate against the build-time secret
    pub fn open(store: S) -> Self {
        Self::with_secret(store, SECRET)
    }

    /// Check the persisted value once; a match skips the prompt entirely
    pub fn with_secret(store: S, secret: impl Into<String>) -> Self {
        let secret = secret.into();
        let unlocked = match store.get(STORAGE_KEY) {
            Ok(saved) => saved.as_deref() == Some(secret.as_str()),
            Err(e) => {
                tracing::warn!("Failed to read saved password: {e}");
                false
            }
        };

        Self {
            store,
            secret,
            unlocked,
            error: None,
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    /// Inline message after a failed submission
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// The user edited the input; hide any previous message
    pub fn edit(&mut self) {
        self.error = None;
    }

    pub fn check(&mut self, input: &str) -> Access {
        if input != self.secret {
            self.error = Some(DENIED_MESSAGE);
            return Access::Denied;
        }

        self.unlocked = true;
        self.error = None;
        if let Err(e) = self.store.set(STORAGE_KEY, input) {
            // The session stays unlocked; only the next visit prompts again.
            tracing::warn!("Failed to persist password: {e}");
        }
        Access::Granted
    }

    #[cfg(test)]
    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::storage::{MemoryStore, StorageError};

    #[test]
    fn test_correct_secret_unlocks_and_persists() {
        let mut gate = AccessGate::with_secret(MemoryStore::new(), "open-sesame");
        assert!(!gate.is_unlocked());

        assert_eq!(gate.check("open-sesame"), Access::Granted);
        assert!(gate.is_unlocked());

        let store = gate.into_store();
        assert_eq!(store.get(STORAGE_KEY).unwrap().as_deref(), Some("open-sesame"));

        // Reload with the persisted value: no prompt.
        let reloaded = AccessGate::with_secret(store, "open-sesame");
        assert!(reloaded.is_unlocked());
    }

    #[test]
    fn test_wrong_secret_is_denied_and_not_persisted() {
        let mut gate = AccessGate::with_secret(MemoryStore::new(), "open-sesame");
        assert_eq!(gate.check("guess"), Access::Denied);
        assert!(!gate.is_unlocked());
        assert_eq!(gate.error(), Some(DENIED_MESSAGE));

        gate.edit();
        assert_eq!(gate.error(), None);

        let store = gate.into_store();
        assert_eq!(store.get(STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_stale_persisted_value_prompts() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "old-secret").unwrap();
        let gate = AccessGate::with_secret(store, "new-secret");
        assert!(!gate.is_unlocked());
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::NoDataDir)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::NoDataDir)
        }
    }

    #[test]
    fn test_storage_failure_still_unlocks_session() {
        let mut gate = AccessGate::with_secret(BrokenStore, "s");
        assert!(!gate.is_unlocked());
        assert_eq!(gate.check("s"), Access::Granted);
        assert!(gate.is_unlocked());
    }

    #[test]
    fn test_default_secret() {
        let mut gate = AccessGate::open(MemoryStore::new());
        assert_eq!(gate.check(SECRET), Access::Granted);
    }
}
