//! Microbenchmark source generation.
//!
//! Data flows one way: knobs are validated into groups, each group declares
//! fresh variables through a [`NameAllocator`], the sequence generators emit
//! operations or comparisons over them, and [`assemble`] wraps the groups in
//! the fixed class template.

mod assemble;
mod comps;
mod emit;
mod naming;
mod ops;
mod units;
mod variables;

pub use assemble::{
    ARTIFACT_EXTENSION, ArithmeticKnobs, ComparisonKnobs, FileConfig, GeneratedFile, assemble,
    generate_file, write_artifact,
};
pub use comps::{ComparisonGroup, build_comparison_sequence};
pub use naming::NameAllocator;
pub use ops::{Correction, Layout, OperationGroup, Operator, build_operation_sequence};
pub use units::{FixedPicker, RandomPicker, UnitPicker, assign_units};
pub use variables::{VariableBlock, annotated_count, declare};
