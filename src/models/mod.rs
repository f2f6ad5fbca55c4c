pub mod auth;
pub mod product;
pub mod sale;
pub mod user;

pub use auth::{LoginRequest, LoginResponse, Role, Session};
pub use product::{NewProduct, Product};
pub use sale::{CartLine, SaleItem, SaleRequest, SaleResponse};
pub use user::NewUser;
