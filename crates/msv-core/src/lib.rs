pub mod config;
pub mod logging;

pub mod catalog;
pub mod checksum;
pub mod diff;
pub mod fetch;
pub mod verify;
