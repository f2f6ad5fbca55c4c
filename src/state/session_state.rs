// ============================================================================
// SESSION STORE - Sesión (token + rol) persistida en localStorage
// ============================================================================

use std::rc::Rc;

use crate::error::AppError;
use crate::models::auth::Session;
use crate::state::reactivity::Subscribers;
use crate::utils::constants::{ROLE_KEY, TOKEN_KEY};
use crate::utils::storage::KeyValueStore;

/// Sesión compartida por todas las vistas.
///
/// Token y rol solo se escriben juntos (login) y se borran juntos (logout).
#[derive(Clone)]
pub struct SessionStore {
    storage: Rc<dyn KeyValueStore>,
    subscribers: Subscribers,
}

impl SessionStore {
    pub fn new(storage: Rc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            subscribers: Subscribers::new(),
        }
    }

    /// Sesión actual; claves ausentes se leen como `None` / `""`
    pub fn get(&self) -> Session {
        Session {
            token: self
                .storage
                .get_item(TOKEN_KEY)
                .filter(|token| !token.is_empty()),
            role: self.storage.get_item(ROLE_KEY).unwrap_or_default(),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.get().token
    }

    /// Guardar token y rol después de un login exitoso
    pub fn set(&self, token: &str, role: &str) -> Result<(), AppError> {
        self.storage.set_item(TOKEN_KEY, token)?;
        if let Err(e) = self.storage.set_item(ROLE_KEY, role) {
            // No dejar un token sin rol
            let _ = self.storage.remove_item(TOKEN_KEY);
            return Err(e);
        }
        log::info!("🔐 [SESSION] Sesión guardada (rol: '{}')", role);
        self.subscribers.notify();
        Ok(())
    }

    /// Logout - limpiar token y rol
    pub fn clear(&self) -> Result<(), AppError> {
        self.storage.remove_item(TOKEN_KEY)?;
        self.storage.remove_item(ROLE_KEY)?;
        log::info!("🗑️ [SESSION] Sesión eliminada");
        self.subscribers.notify();
        Ok(())
    }

    /// Notificación cuando cambia la sesión (login / logout)
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.subscribers.subscribe(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::Role;
    use crate::utils::storage::MemoryStorage;
    use std::cell::Cell;

    #[test]
    fn fresh_storage_reads_as_empty_session() {
        let store = SessionStore::new(Rc::new(MemoryStorage::new()));
        let session = store.get();
        assert_eq!(session.token, None);
        assert_eq!(session.role, "");
    }

    #[test]
    fn set_persists_token_and_role_under_known_keys() {
        let storage = MemoryStorage::new();
        let store = SessionStore::new(Rc::new(storage.clone()));

        store.set("tok-1", "vendedor").unwrap();

        assert_eq!(storage.get_item("token").as_deref(), Some("tok-1"));
        assert_eq!(storage.get_item("rol").as_deref(), Some("vendedor"));
        assert_eq!(store.get().role(), Some(Role::Vendedor));
    }

    #[test]
    fn clear_removes_both_keys_and_notifies() {
        let storage = MemoryStorage::new();
        let store = SessionStore::new(Rc::new(storage.clone()));
        let changes = Rc::new(Cell::new(0));
        {
            let changes = changes.clone();
            store.subscribe(move || changes.set(changes.get() + 1));
        }

        store.set("tok", "precio").unwrap();
        store.clear().unwrap();

        assert!(storage.is_empty());
        assert_eq!(store.get(), Session::default());
        assert_eq!(changes.get(), 2);
    }

    #[test]
    fn empty_token_is_treated_as_absent() {
        let storage = MemoryStorage::new();
        storage.set_item("token", "").unwrap();
        let store = SessionStore::new(Rc::new(storage));
        assert_eq!(store.token(), None);
    }
}
