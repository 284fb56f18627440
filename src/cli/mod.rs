mod command;
mod runner;
mod util;

pub use command::Command;
pub use runner::{OutputMode, run, run_with_format, run_with_tool};
pub use util::{parse_kinds, parse_output_mode};
