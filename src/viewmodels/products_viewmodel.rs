// ============================================================================
// PRODUCTS VIEWMODEL - Listado de productos
// ============================================================================

use std::rc::Rc;

use crate::models::Product;
use crate::services::ClientFactory;
use crate::state::ReactiveState;
use crate::viewmodels::LoadState;

#[derive(Clone)]
pub struct ProductsViewModel {
    factory: Rc<ClientFactory>,
    state: ReactiveState<LoadState<Vec<Product>>>,
}

impl ProductsViewModel {
    pub fn new(factory: Rc<ClientFactory>) -> Self {
        Self {
            factory,
            state: ReactiveState::new(LoadState::Loading),
        }
    }

    pub fn state(&self) -> LoadState<Vec<Product>> {
        self.state.get()
    }

    pub fn subscribe<F: Fn() + 'static>(&self, callback: F) {
        self.state.subscribe(callback);
    }

    /// Una carga por montaje de la vista
    pub async fn load(&self) {
        self.state.set(LoadState::Loading);
        let client = self.factory.get_client().await;
        match client.list_products().await {
            Ok(products) => self.state.set(LoadState::Ready(products)),
            Err(err) => {
                log::error!("❌ [PRODUCTOS] Error cargando productos: {}", err);
                self.state.set(LoadState::Failed("Error al cargar productos".to_string()));
            }
        }
    }
}
