use simread::{LengthStrategy, ScanConfig, SimCard};
use simread_apdu_transport_pcsc::PcscTransport;
use std::error::Error;

use crate::utils::display::{ConsolePrinter, success};

/// Read and print the phonebook
pub fn contacts_command(
    transport: PcscTransport,
    probe: bool,
    record_length: Option<u8>,
    max_slots: Option<u16>,
) -> Result<(), Box<dyn Error>> {
    let mut config = ScanConfig::phonebook();
    if probe {
        config = config.with_length_strategy(LengthStrategy::probe());
    } else if let Some(length) = record_length {
        config = config.with_length_strategy(LengthStrategy::Fixed(length));
    }
    if let Some(max_slots) = max_slots {
        config = config.with_max_slots(max_slots);
    }

    let mut card = SimCard::with_transport(transport);
    let scan = card.read_contacts(&config, &mut ConsolePrinter)?;

    println!(
        "{}",
        success(&format!(
            "Found {} contacts. Scanned {} positions.",
            scan.summary.found, scan.summary.attempted
        ))
    );

    Ok(())
}
