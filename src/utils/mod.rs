//! Process-level helpers shared by the binary and its tests

pub mod signals;

pub use signals::shutdown_signal;
