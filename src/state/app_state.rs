// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::router::{authorize, GuardDecision, Route};
use crate::services::{ClientFactory, HttpTransport};
use crate::state::{ReactiveState, SessionStore};
use crate::utils::storage::KeyValueStore;
use crate::viewmodels::{
    LoginViewModel, ProductFormViewModel, ProductsViewModel, SalesViewModel, UserFormViewModel,
};

/// Vista montada. Se crea de nuevo en cada navegación, así el carrito
/// y los formularios arrancan vacíos.
#[derive(Clone)]
pub enum Page {
    Productos(ProductsViewModel),
    Login(LoginViewModel),
    Ventas(SalesViewModel),
    CrearUsuario(UserFormViewModel),
    CrearProducto(ProductFormViewModel),
}

impl Page {
    fn mount(route: Route, factory: &Rc<ClientFactory>) -> Self {
        let factory = factory.clone();
        match route {
            Route::Productos => Page::Productos(ProductsViewModel::new(factory)),
            Route::Login => Page::Login(LoginViewModel::new(factory)),
            Route::Ventas => Page::Ventas(SalesViewModel::new(factory)),
            Route::CrearUsuario => Page::CrearUsuario(UserFormViewModel::new(factory)),
            Route::CrearProducto => Page::CrearProducto(ProductFormViewModel::new(factory)),
        }
    }

    pub fn route(&self) -> Route {
        match self {
            Page::Productos(_) => Route::Productos,
            Page::Login(_) => Route::Login,
            Page::Ventas(_) => Route::Ventas,
            Page::CrearUsuario(_) => Route::CrearUsuario,
            Page::CrearProducto(_) => Route::CrearProducto,
        }
    }
}

/// Resultado de una navegación ya pasada por el guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub route: Route,
    /// `true` = reemplazar la entrada del historial (redirecciones)
    pub replace: bool,
}

#[derive(Clone)]
pub struct AppState {
    pub session: SessionStore,
    pub factory: Rc<ClientFactory>,
    pub route: ReactiveState<Route>,
    page: Rc<RefCell<Option<Page>>>,
}

impl AppState {
    pub fn new(config: AppConfig, storage: Rc<dyn KeyValueStore>, transport: Rc<dyn HttpTransport>) -> Self {
        let session = SessionStore::new(storage);
        let factory = Rc::new(ClientFactory::new(config, transport, session.clone()));
        Self {
            session,
            factory,
            route: ReactiveState::new(Route::Productos),
            page: Rc::new(RefCell::new(None)),
        }
    }

    pub fn current_route(&self) -> Route {
        self.route.get()
    }

    pub fn page(&self) -> Option<Page> {
        self.page.borrow().clone()
    }

    /// Aplica el guard sin cambiar estado
    pub fn resolve(&self, requested: Route, replace: bool) -> Navigation {
        match authorize(requested, &self.session.get()) {
            GuardDecision::Render => Navigation {
                route: requested,
                replace,
            },
            GuardDecision::Redirect { to, replace } => {
                log::info!("🚫 [ROUTER] {} no permitido, redirigiendo a {}", requested.path(), to.path());
                Navigation { route: to, replace }
            }
        }
    }

    /// Navega (guard incluido) y monta una vista nueva
    pub fn navigate(&self, requested: Route, replace: bool) -> Navigation {
        let navigation = self.resolve(requested, replace);
        *self.page.borrow_mut() = Some(Page::mount(navigation.route, &self.factory));
        self.route.set(navigation.route);
        navigation
    }

    /// Logout; si la vista actual deja de estar permitida se vuelve a `/`
    pub fn logout(&self) -> Result<Navigation, AppError> {
        self.session.clear()?;
        let current = self.current_route();
        let navigation = self.resolve(current, true);
        if navigation.route != current {
            return Ok(self.navigate(navigation.route, true));
        }
        // La vista sigue permitida: ni historial ni montaje nuevo
        Ok(Navigation {
            route: current,
            replace: false,
        })
    }

    /// Suscribirse a cambios de ruta y de sesión (para re-renderizar)
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + Clone + 'static,
    {
        self.route.subscribe(callback.clone());
        self.session.subscribe(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::HttpMethod;
    use crate::testing::{block_on, MockTransport};
    use crate::utils::storage::MemoryStorage;
    use std::cell::Cell;

    fn app(role: Option<&str>) -> AppState {
        let state = AppState::new(
            AppConfig::default(),
            Rc::new(MemoryStorage::new()),
            Rc::new(MockTransport::default()),
        );
        if let Some(role) = role {
            state.session.set("tok", role).unwrap();
        }
        state
    }

    #[test]
    fn allowed_route_mounts_its_page() {
        let state = app(Some("vendedor"));

        let nav = state.navigate(Route::Ventas, false);

        assert_eq!(nav, Navigation { route: Route::Ventas, replace: false });
        assert_eq!(state.current_route(), Route::Ventas);
        assert!(matches!(state.page(), Some(Page::Ventas(_))));
    }

    #[test]
    fn forbidden_route_redirects_home_with_replace() {
        let state = app(Some("comprador"));

        let nav = state.navigate(Route::Ventas, false);

        assert_eq!(nav, Navigation { route: Route::Productos, replace: true });
        assert!(matches!(state.page(), Some(Page::Productos(_))));
    }

    #[test]
    fn anonymous_session_cannot_reach_protected_routes() {
        let state = app(None);
        for route in [Route::Ventas, Route::CrearUsuario, Route::CrearProducto] {
            assert_eq!(state.navigate(route, false).route, Route::Productos);
        }
    }

    #[test]
    fn navigating_again_mounts_a_fresh_cart() {
        let transport = Rc::new(MockTransport::default());
        transport.on(
            HttpMethod::Get,
            "/productos",
            200,
            r#"[{"id": 1, "nombre": "Mouse", "precio": 10, "stock": 5}]"#,
        );
        let state = AppState::new(AppConfig::default(), Rc::new(MemoryStorage::new()), transport);
        state.session.set("tok", "vendedor").unwrap();
        state.navigate(Route::Ventas, false);
        if let Some(Page::Ventas(vm)) = state.page() {
            block_on(vm.load_products());
            vm.select_product(Some(1));
            vm.add_item().unwrap();
            assert_eq!(vm.state().cart.len(), 1);
        }

        state.navigate(Route::Ventas, false);

        match state.page() {
            Some(Page::Ventas(vm)) => assert!(vm.state().cart.is_empty()),
            _ => panic!("se esperaba la vista de ventas"),
        }
    }

    #[test]
    fn logout_on_protected_page_returns_home() {
        let state = app(Some("precio"));
        state.navigate(Route::CrearUsuario, false);

        let nav = state.logout().unwrap();

        assert_eq!(nav.route, Route::Productos);
        assert_eq!(state.current_route(), Route::Productos);
        assert_eq!(state.session.token(), None);
    }

    #[test]
    fn logout_on_public_page_keeps_the_mounted_view() {
        let state = app(Some("vendedor"));
        state.navigate(Route::Productos, false);
        let hits = Rc::new(Cell::new(0));
        if let Some(Page::Productos(vm)) = state.page() {
            let hits = hits.clone();
            vm.subscribe(move || hits.set(hits.get() + 1));
        }

        let nav = state.logout().unwrap();

        assert_eq!(nav, Navigation { route: Route::Productos, replace: false });
        assert_eq!(state.session.token(), None);
        // Un viewmodel recién montado no tendría el subscriber de arriba
        match state.page() {
            Some(Page::Productos(vm)) => {
                block_on(vm.load());
                assert!(hits.get() > 0);
            }
            _ => panic!("se esperaba la vista de productos"),
        }
    }

    #[test]
    fn changes_notify_subscribers() {
        let state = app(None);
        let hits = Rc::new(Cell::new(0));
        {
            let hits = hits.clone();
            state.subscribe_to_changes(move || hits.set(hits.get() + 1));
        }

        state.navigate(Route::Login, false);
        state.session.set("t", "vendedor").unwrap();

        assert_eq!(hits.get(), 2);
    }
}
