use serde::{Deserialize, Deserializer, Serialize};

/// Producto tal como lo devuelve `GET /productos`.
///
/// El backend no es consistente con los nombres de campo (`ID`, `name`,
/// `PRECIO`, ...), los alias los normalizan. Un campo `null` o ausente
/// toma el valor por defecto en vez de invalidar toda la lista.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct Product {
    #[serde(alias = "ID", alias = "Id")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default", alias = "name", alias = "NOMBRE", alias = "Nombre")]
    pub nombre: String,
    #[serde(default, deserialize_with = "null_as_default", alias = "price", alias = "PRECIO", alias = "Precio")]
    pub precio: f64,
    #[serde(default, deserialize_with = "null_as_default", alias = "STOCK", alias = "Stock")]
    pub stock: u32,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Product {
    pub fn has_stock(&self) -> bool {
        self.stock > 0
    }

    /// Texto de la opción en el selector de ventas: "Laptop - $800.00 (stock 10)"
    pub fn option_label(&self) -> String {
        format!("{} - ${:.2} (stock {})", self.nombre, self.precio, self.stock)
    }
}

/// Body de `POST /productos`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct NewProduct {
    pub nombre: String,
    pub precio: f64,
    pub stock: u32,
}
