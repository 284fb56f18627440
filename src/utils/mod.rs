//! Utility modules: logging setup and numeric conversions.
pub mod logger;
pub mod num;
