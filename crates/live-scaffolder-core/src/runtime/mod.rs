//! Runtime detection
//!
//! The generated project runs on Node.js, so the only runtime checked is
//! Node.js and its major version.

pub mod check;

pub use check::{check_node, ensure_min_major, parse_version, require_node, RuntimeInfo};
