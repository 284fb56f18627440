//! Synthetic microbenchmarks for unit-inference tools.
//!
//! [`generator`] builds source files made of multiplication, addition and
//! comparison groups over freshly named variables, with controllable unit
//! annotation density. [`harness`] drives an external inference tool over a
//! sweep of such files and averages its reported solve time.

pub mod cli;
pub mod config;
pub mod errors;
pub mod generator;
pub mod harness;
pub mod types;
pub mod utils;

pub use utils::logger;
