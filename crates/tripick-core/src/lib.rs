#![forbid(unsafe_code)]

//! Core: key events, deadline timers, and logging shared by tripick widgets.

pub mod event;
pub mod logging;
pub mod timer;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, info, trace, warn};
