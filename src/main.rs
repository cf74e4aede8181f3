use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, info};

use wmbus_crc16::crc::{Engine, CRC16_TABLE};
use wmbus_crc16::frame::{self, Fcs};
use wmbus_crc16::hex::{self, Mode};

mod samples;

use crate::samples::SAMPLES;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// More log output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the captured sample frames through every engine (default)
    Demo,
    /// Checksum of a frame body (start byte and FCS stripped)
    Checksum {
        /// Body as hex text
        hex: String,

        #[arg(short, long, value_enum, default_value_t = EngineArg::Table)]
        engine: EngineArg,

        /// Decode without validation, like the historical tooling
        #[arg(long)]
        legacy: bool,
    },
    /// Check the FCS of a full received frame (A5 ... FCS)
    Verify {
        /// Frame as hex text
        hex: String,

        #[arg(short, long, value_enum, default_value_t = EngineArg::Table)]
        engine: EngineArg,
    },
    /// Wrap a frame body with start byte and FCS
    Seal {
        /// Body as hex text
        hex: String,
    },
    /// Print the lookup table
    Table,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum EngineArg {
    Table,
    Bitwise,
    Catalog,
}

impl From<EngineArg> for Engine {
    fn from(arg: EngineArg) -> Self {
        match arg {
            EngineArg::Table => Engine::Table,
            EngineArg::Bitwise => Engine::Bitwise,
            EngineArg::Catalog => Engine::Catalog,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match args.command.unwrap_or(Commands::Demo) {
        Commands::Demo => run_demo(),
        Commands::Checksum { hex, engine, legacy } => {
            let mode = if legacy { Mode::Legacy } else { Mode::Strict };
            let body = parse_hex(&hex, mode)?;
            let engine = Engine::from(engine);
            info!("Computing checksum of {} bytes with {}", body.len(), engine.get().name());
            let fcs = Fcs::compute(&body, engine);
            println!("{} (0x{:04x})", fcs, fcs.0);
            Ok(())
        }
        Commands::Verify { hex, engine } => {
            let received = parse_hex(&hex, Mode::Strict)?;
            let fcs = frame::verify(&received, engine.into()).context("Frame rejected")?;
            println!("OK {}", fcs);
            Ok(())
        }
        Commands::Seal { hex } => {
            let body = parse_hex(&hex, Mode::Strict)?;
            let sealed = frame::seal(&body);
            println!("{}", sealed.iter().map(|b| format!("{b:02x}")).collect::<String>());
            Ok(())
        }
        Commands::Table => {
            print_table();
            Ok(())
        }
    }
}

fn parse_hex(text: &str, mode: Mode) -> Result<Vec<u8>> {
    let compact: String = text.split_whitespace().collect();
    debug!("Decoding {} hex characters ({:?})", compact.len(), mode);
    hex::decode(compact.as_bytes(), mode).context("Failed to decode hex input")
}

fn run_demo() -> Result<()> {
    let mut failures = 0;

    for sample in &SAMPLES {
        // historical results were produced without validation
        let body = hex::hex_decode(sample.body.as_bytes(), sample.body.len());

        for engine in Engine::ALL {
            let fcs = Fcs::compute(&body, engine);
            let ok = fcs.to_string() == sample.fcs;
            println!(
                "{:<14} {:<8} {}  {}",
                sample.name,
                engine.get().name(),
                fcs,
                if ok { "ok" } else { "MISMATCH" }
            );
            if !ok {
                error!("{} ({}): expected {}, calculated {}", sample.name, engine.get().name(), sample.fcs, fcs);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} checksum(s) did not match", failures);
    }
    info!("All {} samples match on every engine", SAMPLES.len());
    Ok(())
}

fn print_table() {
    for row in CRC16_TABLE.chunks(8) {
        let line: Vec<String> = row.iter().map(|v| format!("0x{v:04X}")).collect();
        println!("{},", line.join(", "));
    }
}
