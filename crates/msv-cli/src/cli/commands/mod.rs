//! CLI command handlers, one file per command.

mod checksum;
mod verify;

pub use checksum::run_checksum;
pub use verify::run_verify;
