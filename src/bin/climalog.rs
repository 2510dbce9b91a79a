//! climalog CLI
//!
//! Command-line interface for working with logger chip images.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand, ValueEnum};
use climalog::export::{self, ExportFormat};
use climalog::medium::FileMedium;
use climalog::recorder::{Measurement, RecordOutcome, Recorder, Sensor};
use climalog::settings::{Interval, SerialSpeed};
use climalog::{CalendarMoment, Config, LogRecord, LogStore, Settings};
use tracing_subscriber::{fmt, EnvFilter};

/// climalog CLI
#[derive(Parser, Debug)]
#[command(name = "climalog")]
#[command(about = "Inspect and manage environmental logger memory images")]
#[command(version)]
struct Args {
    /// Chip image file
    #[arg(short, long, default_value = "./climalog.img")]
    image: PathBuf,

    /// Medium size in bytes
    #[arg(short, long, default_value = "32768")]
    size: u32,

    /// Bytes reserved for the settings block ahead of the log
    #[arg(short, long, default_value_t = Settings::SIZE as u32)]
    reserved: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a blank image with default settings
    Create,

    /// Show record count, capacity and settings
    Status,

    /// Append one record
    Append {
        /// Temperature in °C
        #[arg(short, long, allow_hyphen_values = true)]
        temperature: f32,

        /// Relative humidity in %
        #[arg(short = 'H', long)]
        humidity: f32,

        /// Timestamp `yyyy-MM-dd hh:mm:ss` (defaults to now)
        #[arg(short, long)]
        at: Option<String>,
    },

    /// Print records
    List {
        /// First index to print
        #[arg(short, long, default_value = "0")]
        from: u32,

        /// Maximum number of records to print
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Export all records
    Export {
        #[arg(short, long, value_enum, default_value = "csv")]
        format: FormatArg,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Erase the log
    Format,

    /// Show or change the settings block
    Settings {
        /// Recording interval: 10s, 30s, 1m, 10m, 1h, 8h, 24h
        #[arg(short, long)]
        interval: Option<Interval>,

        /// Serial speed in baud
        #[arg(short, long)]
        baud: Option<u32>,
    },

    /// Run the recorder against a synthetic sensor and a virtual clock
    Simulate {
        /// Number of samples to record
        #[arg(short = 'n', long, default_value = "100")]
        samples: u32,

        /// Virtual start time (defaults to now)
        #[arg(long)]
        start: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Csv,
    Bincode,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Bincode => ExportFormat::Bincode,
        }
    }
}

fn main() {
    // Initialize tracing/logging (to stderr, stdout carries exports)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,climalog=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .image_path(&args.image)
        .medium_size(args.size)
        .reserved_prefix(args.reserved)
        .build();

    if let Err(e) = run(&config, args.command) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(config: &Config, command: Commands) -> climalog::Result<()> {
    config.validate()?;

    match command {
        Commands::Create => {
            let mut medium = FileMedium::create(&config.image_path, config.medium_size)?;
            Settings::default().save(&mut medium)?;
            medium.sync()?;
            let store = LogStore::open(medium, config.reserved_prefix)?;
            println!(
                "Created {} ({} bytes, {} record slots)",
                config.image_path.display(),
                config.medium_size,
                store.capacity()
            );
        }

        Commands::Status => {
            let mut store = open_store(config)?;
            let settings = Settings::load(store.medium_mut())?;
            println!("Records:  {}/{}", store.count(), store.capacity());
            if let Some(scan) = store.last_scan() {
                println!("Scan:     {:?}", scan.stop);
            }
            println!("Interval: {}", settings.interval.label());
            println!("Serial:   {} baud", settings.serial_speed.baud());
            if store.count() > 0 {
                let first = store.get(0)?;
                let last = store.get(store.count() - 1)?;
                println!("First:    {}", first.timestamp);
                println!("Last:     {}", last.timestamp);
            }
        }

        Commands::Append {
            temperature,
            humidity,
            at,
        } => {
            let timestamp = match at {
                Some(text) => text.parse::<CalendarMoment>()?,
                None => now(),
            };
            let mut store = open_store(config)?;
            let record = LogRecord::new(timestamp, temperature, humidity);
            let index = store.append(&record)?;
            store.medium_mut().sync()?;
            println!("#{index}: {record}");
        }

        Commands::List { from, limit } => {
            let mut store = open_store(config)?;
            let end = match limit {
                Some(limit) => from.saturating_add(limit).min(store.count()),
                None => store.count(),
            };
            for index in from..end {
                println!("#{index}: {}", store.get(index)?);
            }
        }

        Commands::Export { format, output } => {
            let mut store = open_store(config)?;
            let out: Box<dyn Write> = match &output {
                Some(path) => Box::new(BufWriter::new(File::create(path)?)),
                None => Box::new(io::stdout().lock()),
            };
            let written = export::export(&mut store, format.into(), out)?;
            if let Some(path) = output {
                eprintln!("Exported {written} records to {}", path.display());
            }
        }

        Commands::Format => {
            let mut store = open_store(config)?;
            store.format()?;
            let count = store.rescan()?;
            store.medium_mut().sync()?;
            println!("Log erased ({count} records)");
        }

        Commands::Settings { interval, baud } => {
            let mut medium = FileMedium::open(&config.image_path, config.medium_size)?;
            let mut settings = Settings::load(&mut medium)?;
            if interval.is_some() || baud.is_some() {
                if let Some(interval) = interval {
                    settings.interval = interval;
                }
                if let Some(baud) = baud {
                    settings.serial_speed = SerialSpeed::try_from(baud)?;
                }
                settings.save(&mut medium)?;
                medium.sync()?;
            }
            println!("Interval: {}", settings.interval.label());
            println!("Serial:   {} baud", settings.serial_speed.baud());
        }

        Commands::Simulate { samples, start } => {
            let mut store = open_store(config)?;
            let settings = Settings::load(store.medium_mut())?;
            let mut clock = match start {
                Some(text) => text.parse::<CalendarMoment>()?,
                None => now(),
            };

            let mut sensor = SyntheticSensor::default();
            let mut recorder = Recorder::start(clock, settings.interval);
            let mut recorded = 0;

            while recorded < samples {
                match recorder.poll(clock, &mut store, &mut sensor)? {
                    RecordOutcome::Recorded { .. } => recorded += 1,
                    RecordOutcome::MemoryFull => {
                        println!("Memory full after {recorded} samples");
                        break;
                    }
                    RecordOutcome::Waiting => {}
                }
                clock = clock.add_seconds(recorder.sleep_seconds(clock) as i64);
            }

            store.medium_mut().sync()?;
            println!(
                "Recorded {recorded} samples, log at {}/{}",
                store.count(),
                store.capacity()
            );
        }
    }

    Ok(())
}

fn open_store(config: &Config) -> climalog::Result<LogStore<FileMedium>> {
    let medium = FileMedium::open(&config.image_path, config.medium_size)?;
    LogStore::open(medium, config.reserved_prefix)
}

/// Host wall-clock time as a calendar moment
fn now() -> CalendarMoment {
    let unix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0);
    CalendarMoment::from_unix_seconds(unix)
}

/// Slowly drifting readings for `simulate`
#[derive(Default)]
struct SyntheticSensor {
    step: u32,
}

impl Sensor for SyntheticSensor {
    fn measure(&mut self) -> climalog::Result<Measurement> {
        let phase = self.step as f32 * 0.1;
        self.step += 1;
        Ok(Measurement {
            temperature: 20.0 + 5.0 * phase.sin(),
            humidity: 50.0 + 10.0 * phase.cos(),
        })
    }
}
