//! # RSROUTE CORE LIBRARY
//!
//! **ROUTE TEMPLATE COMPILER AND REVERSER**
//!
//! **GRAMMAR**: literal text, `{name}` / `{name:type}` parameters and `[...]`
//! optional segments nested to any depth
//! **OPERATIONS**: compile a template into a regex matching pattern, or reverse
//! it with parameter values into a literal path
//! **GUARANTEE**: Templates are parsed once into an immutable tree; both
//! operations are pure traversals, safe to run concurrently
//!
//! ```rust
//! use rsroute::api::{compile, reverse};
//! use std::collections::HashMap;
//!
//! assert_eq!(compile("/user/{id:digits}").unwrap().as_str(), r"/user/(?P<id>\d+)");
//!
//! let values: HashMap<&str, &str> = [("o2", "x")].into_iter().collect();
//! assert_eq!(reverse("/test[/{o1}][/{o2}][/{o3}]", &values).unwrap(), "/test/x");
//! ```

pub mod api;
pub mod config;
pub mod errors;
pub mod grammar;
pub mod routing;
pub mod values;
