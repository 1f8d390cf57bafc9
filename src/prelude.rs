//! Prelude module for convenient imports
//!
//! This is the recommended way to pull in the public API:
//! ```
//! use tinyfifo::prelude::*;
//! ```

pub use crate::pool::QueuePool;
pub use crate::{FaultHandler, PanicFaults, QueueHandle, QueueOps};

#[cfg(feature = "global-pool")]
pub use crate::global::{init_global_pool, with_global_pool};
