//! Queue Pool Usage Example
//!
//! Demonstrates the basic lifecycle: create queues, enqueue and dequeue
//! bytes, and destroy queues to return their blocks.
//!
//! Run with: cargo run --example queue_usage

use tinyfifo::prelude::*;

fn main() {
    println!("=== Queue Pool Basics ===\n");

    let mut pool = QueuePool::new(PanicFaults);

    // === Create ===
    println!("1. Create two queues:");
    let tx = pool.create_queue();
    let rx = pool.create_queue();
    println!("   tx descriptor at region offset {}", tx.offset);
    println!("   rx descriptor at region offset {}", rx.offset);

    // === FIFO ordering ===
    println!("\n2. FIFO ordering per queue:");
    for b in b"HELLO" {
        pool.enqueue_byte(tx, *b);
    }
    for b in b"world" {
        pool.enqueue_byte(rx, *b);
    }

    print!("   tx drains: ");
    for _ in 0..5 {
        print!("{}", pool.dequeue_byte(tx) as char);
    }
    print!("\n   rx drains: ");
    for _ in 0..5 {
        print!("{}", pool.dequeue_byte(rx) as char);
    }
    println!();

    // === Block chaining ===
    println!("\n3. Queues span blocks transparently:");
    for i in 0..20u8 {
        pool.enqueue_byte(tx, i);
    }
    println!("   enqueued 20 bytes (7 payload bytes per block -> 3 blocks)");
    let mut sum = 0u32;
    for _ in 0..20 {
        sum += pool.dequeue_byte(tx) as u32;
    }
    println!("   drained, checksum {}", sum);

    // === Destroy ===
    println!("\n4. Destroy returns every block:");
    pool.destroy_queue(tx);
    pool.destroy_queue(rx);
    println!("   both queues destroyed; slots and blocks are reusable");

    let again = pool.create_queue();
    println!("   new queue reuses the lowest slot (offset {})", again.offset);
}
