//! Display utilities for the SIM reader CLI

use std::io::Write;

use colored::Colorize;
use simread::{ScanEvent, ScanObserver, ScanSummary, SmsRecord, SmsStatus};
use tracing::debug;

/// Format a warning message
pub fn warning(message: &str) -> String {
    format!("⚠️  {}", message.yellow().bold())
}

/// Format a success message
pub fn success(message: &str) -> String {
    format!("✅ {}", message.green().bold())
}

/// A horizontal rule of `width` dashes
pub fn rule(width: usize) -> String {
    "-".repeat(width)
}

/// Colored tag for a message slot status
fn status_tag(status: SmsStatus) -> String {
    let tag = status.to_string();
    match status {
        SmsStatus::ReceivedUnread => tag.green().bold().to_string(),
        SmsStatus::Sent | SmsStatus::Unsent => tag.cyan().to_string(),
        _ => tag,
    }
}

fn print_message(record: &SmsRecord) {
    if record.is_decoded() {
        println!(
            "[{:02}] {} | From: {} | {}",
            record.slot,
            status_tag(record.status),
            record.sender.bold(),
            record.timestamp
        );
        println!("     Text: {}", record.body);
    } else {
        println!(
            "[{:02}] {} | {}",
            record.slot,
            status_tag(record.status),
            warning(&record.body)
        );
    }
    println!("{}", rule(40));
}

/// Prints scan events to stdout as they arrive
#[derive(Debug, Default)]
pub struct ConsolePrinter;

impl ScanObserver for ConsolePrinter {
    fn on_event(&mut self, event: ScanEvent<'_>) {
        match event {
            ScanEvent::Geometry {
                file,
                record_length,
                slots,
            } => {
                println!(">>> Reading {file} (record: {record_length} bytes, up to {slots} slots)");
                println!("{}", rule(60));
            }
            ScanEvent::Contact(contact) => {
                println!("[{:03}] {}", contact.index, contact.entry);
            }
            ScanEvent::Message(record) => print_message(record),
            ScanEvent::Progress { attempted, .. } => {
                if let Err(e) = std::io::stdout().flush() {
                    debug!(error = %e, attempted, "Flushing progress output failed");
                }
            }
            ScanEvent::Finished(summary) => {
                println!("{}", rule(60));
                print_stop(summary);
            }
        }
    }
}

fn print_stop(summary: &ScanSummary) {
    if !summary.stop.is_complete() {
        let message = format!("Scan stopped early: {}", summary.stop);
        println!("{}", warning(&message));
    }
}
