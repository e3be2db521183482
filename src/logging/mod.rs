//! Logging: console output through [`tracing`], plus an in-memory sink.

mod logger;
mod memory;
mod subscriber;
mod types;

pub use logger::Logger;
pub use memory::MemoryLog;
pub use subscriber::init_subscriber;
pub use types::{Level, Log};
