use serde::{Deserialize, Serialize};
use crate::models::product::Product;

/// Línea del carrito. `cantidad` nunca supera el stock conocido al agregar.
#[derive(Clone, PartialEq, Debug)]
pub struct CartLine {
    pub product: Product,
    pub cantidad: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> f64 {
        self.product.precio * f64::from(self.cantidad)
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct SaleItem {
    pub producto_id: i64,
    pub cantidad: u32,
}

/// Body de `POST /ventas`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct SaleRequest {
    pub items: Vec<SaleItem>,
}

impl SaleRequest {
    pub fn from_cart(lines: &[CartLine]) -> Self {
        Self {
            items: lines
                .iter()
                .map(|line| SaleItem {
                    producto_id: line.product.id,
                    cantidad: line.cantidad,
                })
                .collect(),
        }
    }
}

/// Respuesta de `POST /ventas`; el backend puede responder vacío
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct SaleResponse {
    #[serde(default, alias = "message")]
    pub mensaje: Option<String>,
    #[serde(default)]
    pub total: Option<f64>,
}
