//! HTTP handlers for the MODARTE dashboard

pub mod health;
pub mod product;
pub mod reporting;
pub mod sale;

pub use health::*;
pub use product::*;
pub use reporting::*;
pub use sale::*;
