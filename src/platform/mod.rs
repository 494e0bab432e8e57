//! Platform glue
//!
//! Browser-side implementations of the core contracts. Native builds use
//! [`crate::ui::LogHud`] instead.

#[cfg(target_arch = "wasm32")]
pub mod dom;

#[cfg(target_arch = "wasm32")]
pub use dom::DomHud;
