//! Example: Global Pool in an Interrupt-like Context
//!
//! This demonstrates a typical embedded pattern where:
//! - A receive queue lives in the process-wide pool
//! - An interrupt handler enqueues incoming bytes (simulating UART RX)
//! - The main loop drains and processes them
//! - Single-threaded design (no mutexes needed)
//!
//! Run with: cargo run --example uart_pump --features global-pool

use tinyfifo::global;
use tinyfifo::QueueHandle;

/// Simulates a UART receive interrupt. In a real system this runs at
/// interrupt level and must stay short.
fn uart_rx_interrupt(rx: QueueHandle, byte: u8) {
    println!("  [IRQ ] rx 0x{:02X} ('{}')", byte, byte as char);
    global::enqueue_byte(rx, byte);
}

/// Main-loop consumer: drain `count` pending bytes and act on them.
fn pump(rx: QueueHandle, count: usize) {
    for _ in 0..count {
        let byte = global::dequeue_byte(rx);
        print!("  [MAIN] consumed 0x{:02X} ('{}')", byte, byte as char);
        if byte.is_ascii_graphic() || byte == b' ' {
            println!(" -> printable");
        } else {
            println!(" -> control");
        }
    }
}

fn main() {
    println!("=== UART Pump over the Global Pool ===\n");

    // The global pool auto-installs on first use; a firmware host would
    // call init_global_pool with its own fault handler instead.
    let rx = global::create_queue();

    println!("1. Burst of five interrupts:");
    for &b in b"PING\n" {
        uart_rx_interrupt(rx, b);
    }

    println!("\n2. Main loop drains the backlog:");
    pump(rx, 5);

    println!("\n3. Interleaved produce/consume:");
    uart_rx_interrupt(rx, b'A');
    uart_rx_interrupt(rx, b'B');
    pump(rx, 1);
    uart_rx_interrupt(rx, b'C');
    pump(rx, 2);

    global::destroy_queue(rx);
    println!("\nDone; queue destroyed.");
}
