use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::AppError;

/// Almacenamiento clave/valor persistente (localStorage en el navegador)
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError>;
    fn remove_item(&self, key: &str) -> Result<(), AppError>;
}

/// Implementación en memoria, para tests y fuera del navegador
#[derive(Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), AppError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::LocalStorage;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::KeyValueStore;
    use crate::error::AppError;
    use web_sys::{window, Storage};

    /// `window.localStorage`
    #[derive(Clone, Default)]
    pub struct LocalStorage;

    impl LocalStorage {
        fn storage(&self) -> Result<Storage, AppError> {
            window()
                .and_then(|w| w.local_storage().ok().flatten())
                .ok_or_else(|| AppError::Storage("No se pudo acceder a localStorage".to_string()))
        }
    }

    impl KeyValueStore for LocalStorage {
        fn get_item(&self, key: &str) -> Option<String> {
            self.storage().ok()?.get_item(key).ok()?
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
            self.storage()?
                .set_item(key, value)
                .map_err(|_| AppError::Storage(format!("Error guardando '{}' en localStorage", key)))
        }

        fn remove_item(&self, key: &str) -> Result<(), AppError> {
            self.storage()?
                .remove_item(key)
                .map_err(|_| AppError::Storage(format!("Error eliminando '{}' de localStorage", key)))
        }
    }
}
