//! Process-wide queue pool behind module-level entry points.
//!
//! # Single-Threaded Design
//!
//! The global pool is **NOT thread-safe** by design. It uses `UnsafeCell`
//! instead of a mutex for zero-cost access in no_std embedded
//! environments.
//!
//! ## Important Constraints:
//! - **Single caller context only** - one thread, one interrupt level
//! - **No concurrent access** - all operations must be sequential
//! - **Tests require `--test-threads=1`** - parallel tests would corrupt
//!   state
//!
//! This is the correct design for firmware where applications run
//! single-threaded, deterministic latency matters, and memory is fixed.
//! If the host must call from multiple contexts, it provides its own
//! mutual exclusion around these entry points.
//!
//! ## Automatic Default Initialization
//!
//! The global pool **auto-installs** a built-in [`PanicFaults`]-backed
//! pool if the host never calls [`init_global_pool`]. First use is always
//! safe; hosts that need their own fault handler install a static pool
//! explicitly:
//!
//! ```rust,ignore
//! use tinyfifo::prelude::*;
//!
//! static mut POOL: QueuePool<TrapFaults> = QueuePool::new(TrapFaults);
//!
//! fn main() {
//!     unsafe { init_global_pool(&mut *core::ptr::addr_of_mut!(POOL)); }
//!
//!     let q = tinyfifo::global::create_queue();
//!     tinyfifo::global::enqueue_byte(q, 0x41);
//! }
//! ```

use crate::pool::QueuePool;
use crate::{FaultHandler, PanicFaults, QueueHandle, QueueOps};
use core::cell::UnsafeCell;

/// Type-erased global pool storage
struct GlobalStorage {
    pool_ptr: UnsafeCell<Option<&'static mut dyn QueueOps>>,
}

unsafe impl Sync for GlobalStorage {}

impl GlobalStorage {
    const fn new() -> Self {
        Self {
            pool_ptr: UnsafeCell::new(None),
        }
    }

    fn init(&self, pool: &'static mut dyn QueueOps) {
        unsafe {
            *self.pool_ptr.get() = Some(pool);
        }
    }
}

static GLOBAL: GlobalStorage = GlobalStorage::new();

/// Installs the host's pool as the process-wide instance.
///
/// Optional: if never called, the first entry point auto-installs a
/// built-in pool whose faults panic.
pub fn init_global_pool<F: FaultHandler + 'static>(pool: &'static mut QueuePool<F>) {
    GLOBAL.init(pool);
}

fn install_default() {
    static mut POOL: QueuePool<PanicFaults> = QueuePool::new(PanicFaults);
    unsafe {
        let pool_ptr = core::ptr::addr_of_mut!(POOL);
        GLOBAL.init(&mut *pool_ptr);
    }
}

/// Execute a closure with mutable access to the global pool.
///
/// # Safety
/// Safe in a single caller context only; see the module docs.
#[inline]
pub fn with_global_pool<C, R>(f: C) -> R
where
    C: FnOnce(&mut dyn QueueOps) -> R,
{
    unsafe {
        if (*GLOBAL.pool_ptr.get()).is_none() {
            install_default();
        }
        f((*GLOBAL.pool_ptr.get()).as_deref_mut().unwrap())
    }
}

/// Creates a queue in the global pool.
#[inline]
pub fn create_queue() -> QueueHandle {
    with_global_pool(|pool| pool.create_queue())
}

/// Destroys a queue in the global pool, returning its blocks.
#[inline]
pub fn destroy_queue(q: QueueHandle) {
    with_global_pool(|pool| pool.destroy_queue(q))
}

/// Appends a byte to a queue in the global pool.
#[inline]
pub fn enqueue_byte(q: QueueHandle, b: u8) {
    with_global_pool(|pool| pool.enqueue_byte(q, b))
}

/// Removes and returns the oldest byte of a queue in the global pool.
#[inline]
pub fn dequeue_byte(q: QueueHandle) -> u8 {
    with_global_pool(|pool| pool.dequeue_byte(q))
}
