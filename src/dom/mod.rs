// ============================================================================
// DOM MODULE - Helpers para manipulación DOM (solo wasm32)
// ============================================================================

pub mod element;
pub mod builder;
pub mod events;

pub use element::*;
pub use builder::*;
pub use events::*;
