//! # TEMPLATE GRAMMAR
//!
//! **PURPOSE**: The immutable building blocks shared by compilation and reversal.
//!
//! - [`GrammarConfig`] - the bound characters and the type separator
//! - [`TypeCatalog`] - type name to pattern fragment table
//! - [`BracketScanner`] - depth-aware locator for bracketed spans

pub mod catalog;
pub mod config;
pub mod scanner;

pub use catalog::{TypeCatalog, DEFAULT_TYPE};
pub use config::GrammarConfig;
pub use scanner::BracketScanner;
