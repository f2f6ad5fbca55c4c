// ============================================================================
// PRODUCT FORM VIEWMODEL - Alta de productos
// ============================================================================

use std::rc::Rc;

use crate::error::AppError;
use crate::models::NewProduct;
use crate::router::CREAR_PRODUCTO_ROLES;
use crate::services::ClientFactory;
use crate::state::ReactiveState;
use crate::viewmodels::{Notice, REQUIRED_FIELDS_MESSAGE};

/// Campos tal como se escriben en los inputs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub nombre: String,
    pub precio: String,
    pub stock: String,
    pub loading: bool,
    pub notice: Option<Notice>,
}

impl ProductForm {
    /// Validación previa al envío
    pub fn validate(&self) -> Result<NewProduct, AppError> {
        let nombre = self.nombre.trim();
        let precio = self.precio.trim();
        let stock = self.stock.trim();
        if nombre.is_empty() || precio.is_empty() || stock.is_empty() {
            return Err(AppError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
        }

        // "NaN" / "inf" parsean como f64 pero no son JSON válido
        let precio: f64 = precio
            .parse()
            .ok()
            .filter(|p: &f64| p.is_finite())
            .ok_or_else(|| AppError::Validation("El precio debe ser un número".to_string()))?;
        if precio < 0.0 {
            return Err(AppError::Validation("El precio no puede ser negativo".to_string()));
        }
        let stock: u32 = stock
            .parse()
            .map_err(|_| AppError::Validation("El stock debe ser un número entero".to_string()))?;

        Ok(NewProduct {
            nombre: nombre.to_string(),
            precio,
            stock,
        })
    }
}

#[derive(Clone)]
pub struct ProductFormViewModel {
    factory: Rc<ClientFactory>,
    form: ReactiveState<ProductForm>,
}

impl ProductFormViewModel {
    pub fn new(factory: Rc<ClientFactory>) -> Self {
        Self {
            factory,
            form: ReactiveState::new(ProductForm::default()),
        }
    }

    pub fn form(&self) -> ProductForm {
        self.form.get()
    }

    pub fn subscribe<F: Fn() + 'static>(&self, callback: F) {
        self.form.subscribe(callback);
    }

    /// La vista también revisa el rol, además del guard de la ruta
    pub fn has_permission(&self) -> bool {
        self.factory.session().get().has_any_role(CREAR_PRODUCTO_ROLES)
    }

    pub fn set_nombre(&self, value: &str) {
        self.form.update_silent(|f| f.nombre = value.to_string());
    }

    pub fn set_precio(&self, value: &str) {
        self.form.update_silent(|f| f.precio = value.to_string());
    }

    pub fn set_stock(&self, value: &str) {
        self.form.update_silent(|f| f.stock = value.to_string());
    }

    pub async fn submit(&self) {
        let form = self.form.get();
        if form.loading {
            return;
        }
        let product = match form.validate() {
            Ok(product) => product,
            Err(err) => {
                self.form.update(|f| f.notice = Some(Notice::Error(err.user_message())));
                return;
            }
        };

        self.form.update(|f| {
            f.loading = true;
            f.notice = None;
        });

        let client = self.factory.get_client().await;
        match client.create_product(&product).await {
            Ok(_) => {
                log::info!("✅ [CREAR PRODUCTO] {} creado", product.nombre);
                self.form.set(ProductForm {
                    notice: Some(Notice::Success("Producto creado con éxito".to_string())),
                    ..ProductForm::default()
                });
            }
            Err(err) => {
                log::error!("❌ [CREAR PRODUCTO] {}", err);
                self.form.update(|f| {
                    f.loading = false;
                    f.notice = Some(Notice::Error(format!(
                        "Error al crear producto: {}",
                        err.user_message()
                    )));
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::http::HttpMethod;
    use crate::testing::{block_on, Fixture};

    fn filled(vm: &ProductFormViewModel) {
        vm.set_nombre("Mouse");
        vm.set_precio("25");
        vm.set_stock("50");
    }

    #[test]
    fn permission_follows_role() {
        assert!(ProductFormViewModel::new(Fixture::with_role("vendedor").factory.clone()).has_permission());
        assert!(ProductFormViewModel::new(Fixture::with_role("comprador").factory.clone()).has_permission());
        assert!(!ProductFormViewModel::new(Fixture::with_role("administrador").factory.clone()).has_permission());
        assert!(!ProductFormViewModel::new(Fixture::new().factory.clone()).has_permission());
    }

    #[test]
    fn missing_fields_are_rejected_before_sending() {
        let fx = Fixture::with_role("vendedor");
        let vm = ProductFormViewModel::new(fx.factory.clone());
        vm.set_nombre("Mouse");

        block_on(vm.submit());

        assert_eq!(fx.transport.count("/productos"), 0);
        assert_eq!(
            vm.form().notice,
            Some(Notice::Error(REQUIRED_FIELDS_MESSAGE.to_string()))
        );
    }

    #[test]
    fn success_posts_payload_and_resets_fields() {
        let fx = Fixture::with_role("vendedor");
        fx.transport.on(HttpMethod::Post, "/productos", 201, r#"{"id": 1}"#);
        let vm = ProductFormViewModel::new(fx.factory.clone());
        filled(&vm);

        block_on(vm.submit());

        let sent = fx.transport.last_request("/productos").unwrap();
        let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"nombre": "Mouse", "precio": 25.0, "stock": 50}));
        assert_eq!(sent.header("Authorization"), Some("Bearer test-token"));

        let form = vm.form();
        assert_eq!(form.nombre, "");
        assert_eq!(form.precio, "");
        assert_eq!(form.stock, "");
        assert_eq!(form.notice, Some(Notice::Success("Producto creado con éxito".to_string())));
    }

    #[test]
    fn failure_keeps_fields_and_shows_error() {
        let fx = Fixture::with_role("vendedor");
        fx.transport.on(HttpMethod::Post, "/productos", 500, r#"{"error":"Server error"}"#);
        let vm = ProductFormViewModel::new(fx.factory.clone());
        filled(&vm);

        block_on(vm.submit());

        let form = vm.form();
        assert_eq!(form.nombre, "Mouse");
        assert!(!form.loading);
        assert_eq!(
            form.notice,
            Some(Notice::Error("Error al crear producto: Server error".to_string()))
        );
    }

    #[test]
    fn non_numeric_stock_is_a_validation_error() {
        let form = ProductForm {
            nombre: "Test".to_string(),
            precio: "10".to_string(),
            stock: "diez".to_string(),
            ..ProductForm::default()
        };
        assert!(matches!(form.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn negative_price_is_not_sent() {
        let fx = Fixture::with_role("vendedor");
        let vm = ProductFormViewModel::new(fx.factory.clone());
        filled(&vm);
        vm.set_precio("-5");

        block_on(vm.submit());

        assert_eq!(fx.transport.count("/productos"), 0);
        assert_eq!(
            vm.form().notice,
            Some(Notice::Error("El precio no puede ser negativo".to_string()))
        );
    }

    #[test]
    fn non_finite_price_is_a_validation_error() {
        for precio in ["NaN", "inf", "-inf"] {
            let form = ProductForm {
                nombre: "Test".to_string(),
                precio: precio.to_string(),
                stock: "1".to_string(),
                ..ProductForm::default()
            };
            assert_eq!(
                form.validate(),
                Err(AppError::Validation("El precio debe ser un número".to_string())),
                "precio {}",
                precio
            );
        }
    }

    #[test]
    fn zero_price_is_accepted() {
        let form = ProductForm {
            nombre: "Regalo".to_string(),
            precio: "0".to_string(),
            stock: "3".to_string(),
            ..ProductForm::default()
        };
        assert_eq!(form.validate().map(|p| p.precio), Ok(0.0));
    }
}
