//! Route handlers.

pub mod system;

pub use system::{not_found_handler, root_handler, routes_handler};
