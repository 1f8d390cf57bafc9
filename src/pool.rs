//! Multi-queue byte FIFO pool over one fixed 2048-byte region.
//!
//! `QueuePool` carves a single region into up to 64 independent FIFO byte
//! queues. Queues grow and shrink dynamically by chaining 8-byte blocks
//! pulled from a shared free list, so the whole budget can back one busy
//! queue or be spread across many idle ones.
//!
//! # Use Cases
//!
//! - **Per-channel UART/SPI buffering** - one queue per endpoint, one
//!   shared region
//! - **Message routing** - accumulate bytes per destination before flush
//! - **MCU runtimes** - bounded, heap-free buffering with a hard ceiling
//!
//! # Memory Model
//!
//! All state, including the allocator's own bookkeeping, lives inside the
//! region (see [`crate::layout`]). A queue descriptor is 2 bytes; the head
//! and tail cursors live packed inside the tail block's metadata byte, not
//! in the descriptor. Combined payload capacity is 238 blocks x 7 bytes =
//! 1666 bytes.
//!
//! Faults are fatal: exhaustion and misuse are routed to the host's
//! [`FaultHandler`] and do not return.
//!
//! # Examples
//!
//! ```
//! use tinyfifo::prelude::*;
//!
//! let mut pool = QueuePool::new(PanicFaults);
//!
//! let q = pool.create_queue();
//! pool.enqueue_byte(q, 0x41);
//! pool.enqueue_byte(q, 0x42);
//!
//! assert_eq!(pool.dequeue_byte(q), 0x41);
//! assert_eq!(pool.dequeue_byte(q), 0x42);
//!
//! pool.destroy_queue(q);
//! ```
//!
//! # Performance
//!
//! | Operation     | Complexity | Notes                              |
//! |---------------|------------|------------------------------------|
//! | create_queue  | O(1)       | Lowest free slot wins              |
//! | enqueue_byte  | O(1)       | May pull one block from free list  |
//! | dequeue_byte  | O(1)       | May return one block to free list  |
//! | destroy_queue | O(chain)   | Walks and frees the block chain    |

use crate::layout::{
    block_base, head_cursor, pack_cursors, tail_cursor, BITMAP, BLOCK_META, BLOCK_PAYLOAD,
    DESCRIPTOR_SIZE, FREE_HEAD, INIT_FLAG, INIT_MAGIC, MAX_QUEUES, NONE_BLOCK, NUM_BLOCKS,
    QUEUE_TABLE, REGION_SIZE,
};
use crate::{FaultHandler, QueueHandle, QueueOps};

/// Fixed-footprint pool of FIFO byte queues.
///
/// Owns the 2048-byte region and the host's fault handler. The region is
/// initialized lazily: a sentinel byte gates one-time setup of the bitmap
/// and block free list on first use, so a pool can be built over memory
/// of indeterminate content without an explicit init call.
pub struct QueuePool<F: FaultHandler> {
    region: [u8; REGION_SIZE],
    faults: F,
}

impl<F: FaultHandler> QueuePool<F> {
    /// Creates a pool over a zeroed region.
    ///
    /// The zeroed sentinel still differs from the init magic, so lazy
    /// initialization runs on first use as usual.
    pub const fn new(faults: F) -> Self {
        Self {
            region: [0u8; REGION_SIZE],
            faults,
        }
    }

    /// Adopts a region of arbitrary content, e.g. uninitialized SRAM or a
    /// host-mapped window.
    pub const fn from_region(region: [u8; REGION_SIZE], faults: F) -> Self {
        Self { region, faults }
    }

    /// Read-only view of the region, laid out per [`crate::layout`].
    pub fn region(&self) -> &[u8; REGION_SIZE] {
        &self.region
    }

    /* ---- lazy init ---- */

    #[inline]
    fn init_if_needed(&mut self) {
        if self.region[INIT_FLAG] == INIT_MAGIC {
            return;
        }
        self.initialize();
    }

    fn initialize(&mut self) {
        for b in &mut self.region[BITMAP..BITMAP + 8] {
            *b = 0;
        }

        // Chain every block into one free list. Payload bytes and the
        // queue table are left as-is; they are meaningful only once the
        // bitmap marks them live.
        for i in 0..NUM_BLOCKS - 1 {
            self.set_block_meta(i as u8, (i + 1) as u8);
        }
        self.set_block_meta((NUM_BLOCKS - 1) as u8, NONE_BLOCK);
        self.region[FREE_HEAD] = 0;

        self.region[INIT_FLAG] = INIT_MAGIC;
    }

    /* ---- slot bitmap ---- */

    #[inline]
    fn bitmap(&self) -> u64 {
        let mut word = [0u8; 8];
        word.copy_from_slice(&self.region[BITMAP..BITMAP + 8]);
        u64::from_ne_bytes(word)
    }

    #[inline]
    fn set_bitmap(&mut self, word: u64) {
        self.region[BITMAP..BITMAP + 8].copy_from_slice(&word.to_ne_bytes());
    }

    /// Lowest free slot, or `None` when all 64 are taken.
    fn find_free_slot(&self) -> Option<u8> {
        let word = self.bitmap();
        if word == u64::MAX {
            return None;
        }
        Some(word.trailing_ones() as u8)
    }

    #[inline]
    fn mark_slot(&mut self, slot: u8) {
        self.set_bitmap(self.bitmap() | (1u64 << slot));
    }

    #[inline]
    fn clear_slot(&mut self, slot: u8) {
        self.set_bitmap(self.bitmap() & !(1u64 << slot));
    }

    /* ---- block free list ---- */

    fn alloc_block(&mut self) -> u8 {
        let head = self.region[FREE_HEAD];
        if head == NONE_BLOCK {
            self.faults.on_out_of_memory();
        }

        // The popped block keeps its stale contents; the caller overwrites
        // them before they become reachable from any chain.
        self.region[FREE_HEAD] = self.block_meta(head);
        head
    }

    /// Pushes a block back onto the free list. LIFO, so a freed block is
    /// the first to be reused.
    fn free_block(&mut self, idx: u8) {
        self.set_block_meta(idx, self.region[FREE_HEAD]);
        self.region[FREE_HEAD] = idx;
    }

    /* ---- descriptors and blocks ---- */

    #[inline]
    fn descriptor(&self, slot: u8) -> (u8, u8) {
        let base = QUEUE_TABLE + slot as usize * DESCRIPTOR_SIZE;
        (self.region[base], self.region[base + 1])
    }

    #[inline]
    fn set_descriptor(&mut self, slot: u8, head: u8, tail: u8) {
        let base = QUEUE_TABLE + slot as usize * DESCRIPTOR_SIZE;
        self.region[base] = head;
        self.region[base + 1] = tail;
    }

    #[inline]
    fn block_meta(&self, idx: u8) -> u8 {
        self.region[block_base(idx) + BLOCK_META]
    }

    #[inline]
    fn set_block_meta(&mut self, idx: u8, meta: u8) {
        self.region[block_base(idx) + BLOCK_META] = meta;
    }

    /* ---- handle validation ---- */

    /// Checks a handle against the region and returns its slot index.
    ///
    /// Rejects use before init, offsets outside the queue table, offsets
    /// not on a descriptor boundary, and slots whose bitmap bit is clear
    /// (never created, or already destroyed).
    fn validate(&self, q: QueueHandle) -> u8 {
        if self.region[INIT_FLAG] != INIT_MAGIC {
            self.faults.on_illegal_operation();
        }

        let offset = q.offset as usize;
        let table_end = QUEUE_TABLE + MAX_QUEUES * DESCRIPTOR_SIZE;
        if offset < QUEUE_TABLE || offset >= table_end {
            self.faults.on_illegal_operation();
        }
        if (offset - QUEUE_TABLE) % DESCRIPTOR_SIZE != 0 {
            self.faults.on_illegal_operation();
        }

        let slot = ((offset - QUEUE_TABLE) / DESCRIPTOR_SIZE) as u8;
        if self.bitmap() & (1u64 << slot) == 0 {
            self.faults.on_illegal_operation();
        }

        slot
    }
}

impl<F: FaultHandler> QueueOps for QueuePool<F> {
    fn create_queue(&mut self) -> QueueHandle {
        self.init_if_needed();

        let slot = match self.find_free_slot() {
            Some(slot) => slot,
            None => self.faults.on_out_of_memory(),
        };

        self.mark_slot(slot);
        self.set_descriptor(slot, NONE_BLOCK, NONE_BLOCK);

        QueueHandle::new((QUEUE_TABLE + slot as usize * DESCRIPTOR_SIZE) as u16)
    }

    fn destroy_queue(&mut self, q: QueueHandle) {
        let slot = self.validate(q);
        let (head, tail) = self.descriptor(slot);

        // Walk the chain front to back. The tail block's metadata is a
        // cursor pair, not a next-pointer, so the walk ends there.
        let mut current = head;
        while current != NONE_BLOCK {
            let next = if current == tail {
                NONE_BLOCK
            } else {
                self.block_meta(current)
            };
            self.free_block(current);
            current = next;
        }

        self.set_descriptor(slot, NONE_BLOCK, NONE_BLOCK);
        self.clear_slot(slot);
    }

    fn enqueue_byte(&mut self, q: QueueHandle, b: u8) {
        let slot = self.validate(q);
        let (head, tail) = self.descriptor(slot);

        if head == NONE_BLOCK {
            let blk = self.alloc_block();
            self.region[block_base(blk)] = b;
            self.set_block_meta(blk, pack_cursors(0, 1));
            self.set_descriptor(slot, blk, blk);
            return;
        }

        let meta = self.block_meta(tail);
        let head_off = head_cursor(meta);
        let tail_off = tail_cursor(meta);

        if (tail_off as usize) < BLOCK_PAYLOAD {
            self.region[block_base(tail) + tail_off as usize] = b;
            self.set_block_meta(tail, pack_cursors(head_off, tail_off + 1));
        } else {
            // Tail block full. Its metadata becomes a next-pointer, which
            // discards the cursor pair, so the head cursor read above must
            // migrate into the new tail's metadata.
            let blk = self.alloc_block();
            self.set_block_meta(tail, blk);

            self.region[block_base(blk)] = b;
            self.set_block_meta(blk, pack_cursors(head_off, 1));
            self.set_descriptor(slot, head, blk);
        }
    }

    fn dequeue_byte(&mut self, q: QueueHandle) -> u8 {
        let slot = self.validate(q);
        let (head, tail) = self.descriptor(slot);

        if head == NONE_BLOCK {
            self.faults.on_illegal_operation();
        }

        let meta = self.block_meta(tail);
        let mut head_off = head_cursor(meta);
        let tail_off = tail_cursor(meta);

        let result = self.region[block_base(head) + head_off as usize];
        head_off += 1;

        if head_off as usize == BLOCK_PAYLOAD {
            // Head block exhausted: release it now.
            if head == tail {
                self.free_block(head);
                self.set_descriptor(slot, NONE_BLOCK, NONE_BLOCK);
            } else {
                let next = self.block_meta(head);
                self.free_block(head);
                self.set_descriptor(slot, next, tail);
                self.set_block_meta(tail, pack_cursors(0, tail_off));
            }
        } else if head == tail && head_off == tail_off {
            // The byte just read was the last one. Collapse to empty on
            // this call, not the next.
            self.free_block(head);
            self.set_descriptor(slot, NONE_BLOCK, NONE_BLOCK);
        } else {
            self.set_block_meta(tail, pack_cursors(head_off, tail_off));
        }

        result
    }
}
