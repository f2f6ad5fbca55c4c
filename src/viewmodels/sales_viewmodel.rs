// ============================================================================
// SALES VIEWMODEL - Registrar venta (carrito)
// ============================================================================
// Flujo: LoadingProducts -> Ready -> (agregar | quitar)* -> Confirming
//        -> Ready (carrito vacío) | Error (carrito intacto, se puede reintentar)
//
// El stock se valida contra la última lista descargada. No se vuelve a
// pedir la lista ni se reconcilia con ventas de otras sesiones: el backend
// tiene la última palabra al confirmar.
// ============================================================================

use std::rc::Rc;

use crate::error::AppError;
use crate::models::{CartLine, Product, SaleRequest, SaleResponse};
use crate::services::ClientFactory;
use crate::state::ReactiveState;
use crate::viewmodels::Notice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalesPhase {
    LoadingProducts,
    Ready,
    Confirming,
    Error,
}

/// Motivo por el que "Agregar al carrito" está deshabilitado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddRejection {
    Busy,
    NoProduct,
    InvalidQuantity,
    InsufficientStock { available: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SalesState {
    pub phase: SalesPhase,
    pub products: Vec<Product>,
    pub selected: Option<i64>,
    /// Valor del input; puede ser 0 o negativo mientras se escribe
    pub cantidad: i64,
    pub only_in_stock: bool,
    pub cart: Vec<CartLine>,
    pub notice: Option<Notice>,
}

impl Default for SalesState {
    fn default() -> Self {
        Self {
            phase: SalesPhase::LoadingProducts,
            products: Vec::new(),
            selected: None,
            cantidad: 1,
            only_in_stock: false,
            cart: Vec::new(),
            notice: None,
        }
    }
}

impl SalesState {
    pub fn products_loaded(&mut self, result: Result<Vec<Product>, AppError>) {
        match result {
            Ok(products) => {
                self.products = products;
                self.phase = SalesPhase::Ready;
            }
            Err(err) => {
                log::error!("❌ [VENTAS] Error cargando productos: {}", err);
                self.phase = SalesPhase::Error;
                self.notice = Some(Notice::Error("Error al cargar productos".to_string()));
            }
        }
    }

    /// Productos para el selector (filtrados si `only_in_stock`)
    pub fn visible_products(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| !self.only_in_stock || p.has_stock())
            .collect()
    }

    pub fn selected_product(&self) -> Option<&Product> {
        let id = self.selected?;
        self.products.iter().find(|p| p.id == id)
    }

    pub fn select_product(&mut self, id: Option<i64>) {
        self.selected = id.filter(|id| self.products.iter().any(|p| p.id == *id));
    }

    pub fn set_quantity(&mut self, cantidad: i64) {
        self.cantidad = cantidad;
    }

    /// Al filtrar, una selección que queda oculta se descarta
    pub fn set_only_in_stock(&mut self, only_in_stock: bool) {
        self.only_in_stock = only_in_stock;
        if only_in_stock && self.selected_product().map_or(false, |p| !p.has_stock()) {
            self.selected = None;
        }
    }

    /// Cantidad ya reservada en el carrito para un producto
    pub fn in_cart(&self, product_id: i64) -> u32 {
        self.cart
            .iter()
            .find(|line| line.product.id == product_id)
            .map_or(0, |line| line.cantidad)
    }

    pub fn check_add(&self) -> Result<(), AddRejection> {
        if matches!(self.phase, SalesPhase::LoadingProducts | SalesPhase::Confirming) {
            return Err(AddRejection::Busy);
        }
        let product = self.selected_product().ok_or(AddRejection::NoProduct)?;
        if self.cantidad <= 0 {
            return Err(AddRejection::InvalidQuantity);
        }
        let available = product.stock.saturating_sub(self.in_cart(product.id));
        if self.cantidad > i64::from(available) {
            return Err(AddRejection::InsufficientStock { available });
        }
        Ok(())
    }

    pub fn can_add(&self) -> bool {
        self.check_add().is_ok()
    }

    /// Aviso junto al input de cantidad
    pub fn stock_warning(&self) -> Option<String> {
        match self.check_add() {
            Err(AddRejection::InsufficientStock { available }) => {
                Some(format!("Stock insuficiente (disponible: {})", available))
            }
            _ => None,
        }
    }

    /// Agrega la línea o suma a la existente del mismo producto.
    /// Rechazado = sin cambios de estado.
    pub fn add_item(&mut self) -> Result<(), AddRejection> {
        self.check_add()?;
        let product = match self.selected_product() {
            Some(product) => product.clone(),
            None => return Err(AddRejection::NoProduct),
        };
        // check_add garantiza 0 < cantidad <= stock (u32)
        let cantidad = u32::try_from(self.cantidad).map_err(|_| AddRejection::InvalidQuantity)?;

        match self.cart.iter_mut().find(|line| line.product.id == product.id) {
            Some(line) => line.cantidad += cantidad,
            None => self.cart.push(CartLine { product, cantidad }),
        }
        self.notice = None;
        Ok(())
    }

    /// Quita la línea del producto; `false` si no estaba
    pub fn remove_item(&mut self, product_id: i64) -> bool {
        let before = self.cart.len();
        self.cart.retain(|line| line.product.id != product_id);
        self.cart.len() != before
    }

    pub fn total(&self) -> f64 {
        self.cart.iter().map(CartLine::subtotal).sum()
    }

    pub fn can_confirm(&self) -> bool {
        !self.cart.is_empty()
            && !matches!(self.phase, SalesPhase::LoadingProducts | SalesPhase::Confirming)
    }

    /// Pasa a `Confirming` y arma la venta; `None` si no se puede confirmar
    pub fn begin_confirm(&mut self) -> Option<SaleRequest> {
        if !self.can_confirm() {
            return None;
        }
        self.phase = SalesPhase::Confirming;
        self.notice = None;
        Some(SaleRequest::from_cart(&self.cart))
    }

    pub fn finish_confirm(&mut self, result: Result<SaleResponse, AppError>) {
        match result {
            Ok(response) => {
                self.cart.clear();
                self.selected = None;
                self.cantidad = 1;
                self.phase = SalesPhase::Ready;
                let text = response
                    .mensaje
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| "Venta registrada con éxito".to_string());
                self.notice = Some(Notice::Success(text));
            }
            Err(err) => {
                self.phase = SalesPhase::Error;
                self.notice = Some(Notice::Error(err.user_message()));
            }
        }
    }
}

#[derive(Clone)]
pub struct SalesViewModel {
    factory: Rc<ClientFactory>,
    state: ReactiveState<SalesState>,
}

impl SalesViewModel {
    pub fn new(factory: Rc<ClientFactory>) -> Self {
        Self {
            factory,
            state: ReactiveState::new(SalesState::default()),
        }
    }

    pub fn state(&self) -> SalesState {
        self.state.get()
    }

    pub fn subscribe<F: Fn() + 'static>(&self, callback: F) {
        self.state.subscribe(callback);
    }

    pub async fn load_products(&self) {
        let client = self.factory.get_client().await;
        let result = client.list_products().await;
        self.state.update(|s| s.products_loaded(result));
    }

    pub fn select_product(&self, id: Option<i64>) {
        self.state.update(|s| s.select_product(id));
    }

    /// Sin notificar: la vista actualiza el botón y el aviso de stock en el lugar
    pub fn set_quantity(&self, cantidad: i64) {
        self.state.update_silent(|s| s.set_quantity(cantidad));
    }

    pub fn set_only_in_stock(&self, only_in_stock: bool) {
        self.state.update(|s| s.set_only_in_stock(only_in_stock));
    }

    pub fn add_item(&self) -> Result<(), AddRejection> {
        let mut outcome = Ok(());
        self.state.update(|s| outcome = s.add_item());
        outcome
    }

    pub fn remove_item(&self, product_id: i64) -> bool {
        let mut removed = false;
        self.state.update(|s| removed = s.remove_item(product_id));
        removed
    }

    /// Envía el carrito una sola vez. `true` si la venta quedó registrada.
    pub async fn confirm(&self) -> bool {
        let mut request = None;
        self.state.update(|s| request = s.begin_confirm());
        let Some(request) = request else {
            return false;
        };

        log::info!("🧾 [VENTAS] Confirmando venta con {} líneas", request.items.len());
        let client = self.factory.get_client().await;
        let result = client.register_sale(&request).await;
        let ok = result.is_ok();
        self.state.update(|s| s.finish_confirm(result));
        ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::http::HttpMethod;
    use crate::testing::{block_on, Fixture};

    const CATALOG: &str = r#"[
        {"id": 1, "nombre": "Laptop", "precio": 800, "stock": 10},
        {"id": 2, "nombre": "Mouse", "precio": 25, "stock": 50},
        {"id": 3, "nombre": "Teclado", "precio": 45, "stock": 0}
    ]"#;

    fn ready_state() -> SalesState {
        let mut state = SalesState::default();
        state.products_loaded(Ok(serde_json::from_str(CATALOG).unwrap()));
        state
    }

    fn add(state: &mut SalesState, id: i64, cantidad: i64) -> Result<(), AddRejection> {
        state.select_product(Some(id));
        state.set_quantity(cantidad);
        state.add_item()
    }

    fn loaded_vm(fx: &Fixture) -> SalesViewModel {
        fx.transport.on(HttpMethod::Get, "/productos", 200, CATALOG);
        let vm = SalesViewModel::new(fx.factory.clone());
        block_on(vm.load_products());
        vm
    }

    #[test]
    fn nothing_can_be_added_while_loading() {
        let state = SalesState::default();
        assert_eq!(state.check_add(), Err(AddRejection::Busy));
        assert!(!state.can_confirm());
    }

    #[test]
    fn add_requires_a_selected_product() {
        let state = ready_state();
        assert_eq!(state.check_add(), Err(AddRejection::NoProduct));
    }

    #[test]
    fn add_within_stock_appears_once() {
        let mut state = ready_state();
        add(&mut state, 1, 2).unwrap();

        assert_eq!(state.cart.len(), 1);
        assert_eq!(state.cart[0].product.nombre, "Laptop");
        assert_eq!(state.cart[0].cantidad, 2);
    }

    #[test]
    fn add_over_stock_is_rejected_without_changes() {
        let mut state = ready_state();
        state.select_product(Some(1));
        state.set_quantity(9999);
        let before = state.clone();

        assert_eq!(state.add_item(), Err(AddRejection::InsufficientStock { available: 10 }));
        assert_eq!(state, before);
        assert!(!state.can_add());
        assert_eq!(
            state.stock_warning().as_deref(),
            Some("Stock insuficiente (disponible: 10)")
        );
    }

    #[test]
    fn zero_stock_product_cannot_be_added() {
        let mut state = ready_state();
        assert_eq!(
            add(&mut state, 3, 1),
            Err(AddRejection::InsufficientStock { available: 0 })
        );
        assert!(state.cart.is_empty());
    }

    #[test]
    fn non_positive_quantity_is_rejected() {
        let mut state = ready_state();
        assert_eq!(add(&mut state, 1, 0), Err(AddRejection::InvalidQuantity));
        assert_eq!(add(&mut state, 1, -3), Err(AddRejection::InvalidQuantity));
        assert!(state.cart.is_empty());
    }

    #[test]
    fn re_adding_merges_and_respects_remaining_stock() {
        let mut state = ready_state();
        add(&mut state, 1, 6).unwrap();
        add(&mut state, 1, 4).unwrap();

        assert_eq!(state.cart.len(), 1);
        assert_eq!(state.cart[0].cantidad, 10);
        assert_eq!(
            add(&mut state, 1, 1),
            Err(AddRejection::InsufficientStock { available: 0 })
        );
    }

    #[test]
    fn remove_takes_out_only_that_line() {
        let mut state = ready_state();
        add(&mut state, 1, 1).unwrap();
        add(&mut state, 2, 1).unwrap();

        assert!(state.remove_item(1));

        assert_eq!(state.cart.len(), 1);
        assert_eq!(state.cart[0].product.id, 2);
        assert_eq!(state.cart[0].cantidad, 1);
    }

    #[test]
    fn removing_absent_line_is_a_no_op() {
        let mut state = ready_state();
        add(&mut state, 2, 3).unwrap();
        let before = state.cart.clone();

        assert!(!state.remove_item(99));
        assert_eq!(state.cart, before);
    }

    #[test]
    fn empty_cart_cannot_be_confirmed() {
        let mut state = ready_state();
        assert!(!state.can_confirm());
        assert_eq!(state.begin_confirm(), None);
        assert_eq!(state.phase, SalesPhase::Ready);
    }

    #[test]
    fn total_sums_line_subtotals() {
        let mut state = ready_state();
        add(&mut state, 1, 2).unwrap();
        add(&mut state, 2, 4).unwrap();
        assert_eq!(state.total(), 1700.0);
    }

    #[test]
    fn stock_filter_hides_empty_products_and_drops_hidden_selection() {
        let mut state = ready_state();
        state.select_product(Some(3));
        state.set_only_in_stock(true);

        let names: Vec<&str> = state.visible_products().iter().map(|p| p.nombre.as_str()).collect();
        assert_eq!(names, vec!["Laptop", "Mouse"]);
        assert_eq!(state.selected, None);
    }

    #[test]
    fn selecting_unknown_product_clears_selection() {
        let mut state = ready_state();
        state.select_product(Some(42));
        assert_eq!(state.selected, None);
    }

    #[test]
    fn load_failure_shows_message() {
        let fx = Fixture::with_role("vendedor");
        fx.transport.fail(
            HttpMethod::Get,
            "/productos",
            AppError::Network("Network error".to_string()),
        );
        let vm = SalesViewModel::new(fx.factory.clone());

        block_on(vm.load_products());

        let state = vm.state();
        assert_eq!(state.phase, SalesPhase::Error);
        assert_eq!(
            state.notice,
            Some(Notice::Error("Error al cargar productos".to_string()))
        );
    }

    #[test]
    fn confirm_success_clears_cart_and_sends_once() {
        let fx = Fixture::with_role("vendedor");
        let vm = loaded_vm(&fx);
        fx.transport.on(HttpMethod::Post, "/ventas", 201, r#"{"mensaje":"Venta registrada"}"#);
        vm.select_product(Some(1));
        vm.set_quantity(2);
        vm.add_item().unwrap();
        vm.select_product(Some(2));
        vm.set_quantity(1);
        vm.add_item().unwrap();

        assert!(block_on(vm.confirm()));

        let state = vm.state();
        assert!(state.cart.is_empty());
        assert_eq!(state.phase, SalesPhase::Ready);
        assert_eq!(state.notice, Some(Notice::Success("Venta registrada".to_string())));
        assert_eq!(fx.transport.count("/ventas"), 1);

        let sent = fx.transport.last_request("/ventas").unwrap();
        let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"items": [
                {"producto_id": 1, "cantidad": 2},
                {"producto_id": 2, "cantidad": 1}
            ]})
        );
        assert_eq!(sent.header("Authorization"), Some("Bearer test-token"));
    }

    #[test]
    fn confirm_stock_error_keeps_cart_and_shows_server_text() {
        let fx = Fixture::with_role("vendedor");
        let vm = loaded_vm(&fx);
        fx.transport.on(
            HttpMethod::Post,
            "/ventas",
            400,
            r#"{"error":"Stock insuficiente para Laptop"}"#,
        );
        vm.select_product(Some(1));
        vm.set_quantity(3);
        vm.add_item().unwrap();
        let cart_before = vm.state().cart;

        assert!(!block_on(vm.confirm()));

        let state = vm.state();
        assert_eq!(state.cart, cart_before);
        assert_eq!(state.phase, SalesPhase::Error);
        assert_eq!(
            state.notice,
            Some(Notice::Error("Stock insuficiente para Laptop".to_string()))
        );
        assert!(state.can_confirm());
    }

    #[test]
    fn retry_after_failure_can_succeed() {
        let fx = Fixture::with_role("vendedor");
        let vm = loaded_vm(&fx);
        fx.transport.on(HttpMethod::Post, "/ventas", 503, "");
        vm.select_product(Some(2));
        vm.add_item().unwrap();
        assert!(!block_on(vm.confirm()));

        fx.transport.on(HttpMethod::Post, "/ventas", 200, "");
        assert!(block_on(vm.confirm()));

        assert!(vm.state().cart.is_empty());
        assert_eq!(fx.transport.count("/ventas"), 2);
    }

    #[test]
    fn confirm_with_empty_cart_sends_nothing() {
        let fx = Fixture::with_role("vendedor");
        let vm = loaded_vm(&fx);

        assert!(!block_on(vm.confirm()));
        assert_eq!(fx.transport.count("/ventas"), 0);
    }
}
