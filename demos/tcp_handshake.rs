//! TCP Handshake
//!
//! Drives the reference TCP machine through an active open, a little data
//! and an orderly close, then shows an unexpected event being rejected.
//!
//! Run with: cargo run --example tcp_handshake

use std::sync::Arc;
use tablefsm::action::WriterReporter;
use tablefsm::tcp::TcpMachine;

fn main() {
    println!("=== TCP Handshake Example ===\n");

    let reporter = Arc::new(WriterReporter::stdout());
    let mut machine = match TcpMachine::new(reporter) {
        Ok(machine) => machine,
        Err(e) => {
            eprintln!("failed to configure machine: {e}");
            return;
        }
    };

    println!("Initial state: {}\n", machine.current_state_name());

    for token in ["ACTIVE", "SYNACK", "SDATA", "RDATA", "ACK", "CLOSE", "ACK", "FIN", "TIMEOUT"] {
        match machine.process_token(token) {
            Ok(step) if step.is_self_loop() => println!("  (stayed in {})", step.to),
            Ok(step) => println!("  {} -> {}", step.from, step.to),
            Err(e) => println!("  rejected: {e}"),
        }
    }

    println!("\nFinal state: {}", machine.current_state_name());
    println!("Data events: {}", machine.data_count());

    println!("\n=== Example Complete ===");
}
