use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use enviro_core::subscription::{CODE_INDICATE, CODE_NONE, CODE_NOTIFY};
use enviro_core::{TelemetryConfig, TelemetryService};
use enviro_types::{RawReading, TelemetryFrame, convert};

mod sim;

use sim::{ConsoleTransport, SimulatedSensor};

#[derive(Parser)]
#[command(name = "enviro")]
#[command(author, version, about = "Telemetry engine demo for the enviro node", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the engine against a simulated sensor and a console peer
    Run {
        /// Telemetry period in milliseconds
        #[arg(short, long, default_value = "1000")]
        period_ms: u64,

        /// Delivery mode the simulated peer subscribes with
        #[arg(short, long, value_enum, default_value = "notify")]
        mode: Mode,

        /// Stop after this many seconds (0 = run until Ctrl-C)
        #[arg(short, long, default_value = "0")]
        duration: u64,

        /// Print frames as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Convert one raw reading to its canonical value
    Convert {
        /// Sensor channel (temperature, pressure, humidity)
        #[arg(short, long)]
        channel: Channel,

        /// Whole units part of the raw reading
        #[arg(short, long)]
        units: i32,

        /// Micro-fraction part of the raw reading
        #[arg(short, long, default_value = "0")]
        micros: i32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    None,
    Notify,
    Indicate,
}

impl Mode {
    fn code(self) -> u16 {
        match self {
            Mode::None => CODE_NONE,
            Mode::Notify => CODE_NOTIFY,
            Mode::Indicate => CODE_INDICATE,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Channel {
    Temperature,
    Pressure,
    Humidity,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Run {
            period_ms,
            mode,
            duration,
            json,
        } => run_engine(period_ms, mode, duration, json).await,
        Commands::Convert {
            channel,
            units,
            micros,
        } => {
            convert_reading(channel, units, micros);
            Ok(())
        }
    }
}

async fn run_engine(period_ms: u64, mode: Mode, duration: u64, json: bool) -> Result<()> {
    let period = Duration::from_millis(period_ms);
    let sensor = Arc::new(SimulatedSensor::new());
    // the simulated peer acknowledges halfway through a period, so
    // back-to-back changes exercise the in-flight guard
    let transport = Arc::new(ConsoleTransport::new(period / 2, json));

    let mut service = TelemetryService::new(sensor, transport);
    service.on_subscription_write(mode.code());

    let cancel = CancellationToken::new();
    let stopper = cancel.clone();
    tokio::spawn(async move {
        if duration > 0 {
            tokio::time::sleep(Duration::from_secs(duration)).await;
        } else if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        stopper.cancel();
    });

    service.run(TelemetryConfig { period }, cancel).await?;
    Ok(())
}

fn convert_reading(channel: Channel, units: i32, micros: i32) {
    let raw = RawReading::new(units, micros);
    match channel {
        Channel::Temperature => {
            let v = convert::temperature(raw);
            println!("{raw} degC -> {v} centi-degC");
        }
        Channel::Pressure => {
            let v = convert::pressure(raw);
            let frame = TelemetryFrame::new(0, v, 0);
            println!("{raw} kPa -> {v} Pa (low word on wire: {})", frame.pressure as u16);
        }
        Channel::Humidity => {
            let v = convert::humidity(raw);
            println!("{raw} %RH -> {v} centi-%RH");
        }
    }
}
