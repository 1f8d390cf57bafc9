//! Capacity and Block Accounting Example
//!
//! Fills the pool to its hard ceiling and shows how the documented region
//! layout can be inspected from outside: the free list and block chains
//! are readable straight out of the region bytes.
//!
//! Run with: cargo run --example capacity

use tinyfifo::layout::{block_base, BLOCK_META, BLOCK_PAYLOAD, FREE_HEAD, NONE_BLOCK, NUM_BLOCKS};
use tinyfifo::prelude::*;

/// Walks the in-region free list. The layout is a contract, so hosts and
/// debuggers may do exactly this.
fn free_blocks(region: &[u8; 2048]) -> usize {
    let mut count = 0;
    let mut cursor = region[FREE_HEAD];
    while cursor != NONE_BLOCK {
        count += 1;
        cursor = region[block_base(cursor) + BLOCK_META];
    }
    count
}

fn main() {
    println!("=== Capacity and Accounting ===\n");

    let mut pool = QueuePool::new(PanicFaults);
    let q = pool.create_queue();

    let capacity = NUM_BLOCKS * BLOCK_PAYLOAD;
    println!(
        "1. Pool geometry: {} blocks x {} payload bytes = {} bytes total",
        NUM_BLOCKS, BLOCK_PAYLOAD, capacity
    );
    println!("   free blocks at start: {}", free_blocks(pool.region()));

    println!("\n2. Fill one queue to the ceiling:");
    for i in 0..capacity {
        pool.enqueue_byte(q, (i % 256) as u8);
    }
    println!("   enqueued {} bytes", capacity);
    println!("   free blocks now: {}", free_blocks(pool.region()));
    println!("   (one more enqueue_byte would fault with out-of-memory)");

    println!("\n3. Drain half:");
    for _ in 0..capacity / 2 {
        pool.dequeue_byte(q);
    }
    println!(
        "   free blocks after draining {} bytes: {}",
        capacity / 2,
        free_blocks(pool.region())
    );

    println!("\n4. Drain the rest:");
    for _ in 0..capacity - capacity / 2 {
        pool.dequeue_byte(q);
    }
    println!("   free blocks back to: {}", free_blocks(pool.region()));

    pool.destroy_queue(q);
}
