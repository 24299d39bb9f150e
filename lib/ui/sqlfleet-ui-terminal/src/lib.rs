//! Terminal front end: argument parsing, config resolution, and wiring of
//! the collection pipeline.

mod cli;
mod sink;
mod targets;

pub use cli::{run, Cli};
pub use sink::CsvFileSink;
pub use targets::FileTargetSource;
