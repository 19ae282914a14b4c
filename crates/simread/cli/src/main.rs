use clap::{Parser, Subcommand, ValueEnum};
use simread_apdu_transport_pcsc::{PcscConfig, PcscDeviceManager, PcscTransport, ReleaseMode};
use tracing::info;
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

mod commands;
mod utils;

use commands::{contacts_command, messages_command};
use utils::reader;

#[derive(Parser)]
#[command(
    version,
    about = "Read phonebook entries and text messages from a SIM card"
)]
struct Cli {
    /// Reader to use; defaults to the first one holding a card
    #[arg(short, long, global = true)]
    reader: Option<String>,

    /// Keep other applications off the card while reading
    #[arg(long, global = true)]
    exclusive: bool,

    /// What to do with the card when done
    #[arg(long, value_enum, default_value_t = OnExit::Leave, global = true)]
    on_exit: OnExit,

    /// Log every exchange
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OnExit {
    Leave,
    Reset,
    Unpower,
}

impl From<OnExit> for ReleaseMode {
    fn from(value: OnExit) -> Self {
        match value {
            OnExit::Leave => Self::Leave,
            OnExit::Reset => Self::Reset,
            OnExit::Unpower => Self::Unpower,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show attached readers and the cards in them
    List,

    /// Read the phonebook (EF ADN)
    Contacts {
        /// Find the record length by probing instead of reading the file header
        #[arg(long, conflicts_with = "record_length")]
        probe: bool,

        /// Use a known record length
        #[arg(long)]
        record_length: Option<u8>,

        /// Read at most this many records
        #[arg(long)]
        max_slots: Option<u16>,
    },

    /// Read stored text messages (EF SMS)
    Sms {
        /// Read at most this many slots
        #[arg(long)]
        max_slots: Option<u16>,
    },
}

impl Cli {
    fn connect(
        &self,
        manager: &PcscDeviceManager,
    ) -> Result<PcscTransport, Box<dyn std::error::Error>> {
        let reader = reader::select_reader(manager, self.reader.as_deref())?;
        info!(reader = reader.name(), "Connecting");

        let config = PcscConfig::new()
            .with_exclusive(self.exclusive)
            .with_release(self.on_exit.into());
        Ok(manager.open_reader_with_config(reader.name(), config)?)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let manager = PcscDeviceManager::new()?;

    // The transport releases the card when it goes out of scope
    match cli.command {
        Commands::List => reader::list_readers(&manager)?,
        Commands::Contacts {
            probe,
            record_length,
            max_slots,
        } => contacts_command(cli.connect(&manager)?, probe, record_length, max_slots)?,
        Commands::Sms { max_slots } => messages_command(cli.connect(&manager)?, max_slots)?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
