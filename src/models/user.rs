use serde::{Deserialize, Serialize};

/// Body de `POST /usuarios`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct NewUser {
    pub nombre: String,
    pub clave: String,
    pub rol: String,
}
