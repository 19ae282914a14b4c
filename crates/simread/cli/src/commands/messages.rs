use simread::{ScanConfig, SimCard};
use simread_apdu_transport_pcsc::PcscTransport;
use std::error::Error;

use crate::utils::display::{ConsolePrinter, success, warning};

/// Read and print the message store
pub fn messages_command(
    transport: PcscTransport,
    max_slots: Option<u16>,
) -> Result<(), Box<dyn Error>> {
    let mut config = ScanConfig::messages();
    if let Some(max_slots) = max_slots {
        config = config.with_max_slots(max_slots);
    }

    let mut card = SimCard::with_transport(transport);
    let scan = card.read_messages(&config, &mut ConsolePrinter)?;

    if scan.records.is_empty() {
        println!("{}", warning("No messages found on this card."));
    } else {
        let unread = scan.records.iter().filter(|r| r.is_unread()).count();
        println!(
            "{}",
            success(&format!("Found {} messages ({unread} unread).", scan.records.len()))
        );
    }

    Ok(())
}
