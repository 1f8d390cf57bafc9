#![no_std]

#[cfg(test)]
extern crate std;

#[cfg(feature = "global-pool")]
pub mod global;
pub mod layout;
pub mod pool;
pub mod prelude;

pub fn version() -> &'static str {
    "0.1.0"
}

/// Opaque queue handle: the byte offset of the queue's 2-byte descriptor
/// inside the region.
///
/// Handles are only meaningful for the pool that issued them. Every
/// operation re-validates its handle against the region before touching
/// any descriptor byte, so a forged or stale handle faults instead of
/// corrupting state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QueueHandle {
    pub offset: u16,
}

impl QueueHandle {
    pub const fn new(offset: u16) -> Self {
        Self { offset }
    }
}

/// Host-provided fatal fault hooks. Neither returns.
///
/// Firmware hosts route these into their trap mechanism; hosted targets
/// and tests use [`PanicFaults`].
pub trait FaultHandler {
    /// All 64 queue slots taken, or the block pool is exhausted.
    fn on_out_of_memory(&self) -> !;
    /// Invalid handle, dequeue from an empty queue, or use before init.
    fn on_illegal_operation(&self) -> !;
}

/// Fault handler for hosted targets: faults become panics.
pub struct PanicFaults;

impl FaultHandler for PanicFaults {
    fn on_out_of_memory(&self) -> ! {
        panic!("out of memory");
    }

    fn on_illegal_operation(&self) -> ! {
        panic!("illegal operation");
    }
}

/// The four queue operations, object-safe so a pool can sit behind a
/// `&'static mut dyn QueueOps` (see the `global` module).
pub trait QueueOps {
    fn create_queue(&mut self) -> QueueHandle;
    fn destroy_queue(&mut self, q: QueueHandle);
    fn enqueue_byte(&mut self, q: QueueHandle, b: u8);
    fn dequeue_byte(&mut self, q: QueueHandle) -> u8;
}
