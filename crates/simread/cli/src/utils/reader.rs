use colored::Colorize;
use simread_apdu_transport_pcsc::{CardPresence, PcscDeviceManager, PcscReader};

/// The named reader, or else the first one holding a card
pub fn select_reader(
    manager: &PcscDeviceManager,
    name: Option<&str>,
) -> Result<PcscReader, Box<dyn std::error::Error>> {
    let reader = match name {
        Some(name) => manager.find_reader(name)?,
        None => manager.first_reader_with_card()?,
    };

    match reader.presence() {
        CardPresence::Present(_) => Ok(reader),
        CardPresence::Absent => Err(format!("No card in reader '{}'", reader.name()).into()),
    }
}

/// Print every attached reader with its card state
pub fn list_readers(manager: &PcscDeviceManager) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "Readers".bold());
    for (position, reader) in manager.list_readers()?.iter().enumerate() {
        match reader.presence() {
            CardPresence::Present(atr) => {
                println!(
                    "{:>2}. {} ({})",
                    position + 1,
                    reader.name(),
                    "card present".green()
                );
                println!("    ATR {}", hex::encode_upper(atr));
            }
            CardPresence::Absent => {
                println!(
                    "{:>2}. {} ({})",
                    position + 1,
                    reader.name(),
                    "empty".yellow()
                );
            }
        }
    }
    Ok(())
}
