//! Desktop simulator for the temperature monitor.
//!
//! Runs the real control loop against a simulated sensor and draws the LCD
//! in the terminal, so filter and hysteresis tuning can be tried without
//! hardware.
//!
//! # Usage
//!
//! ```sh
//! cargo run --bin desktop_sim --features desktop
//!
//! # Faster drift, a dropout every 20 reads, debug logging
//! RUST_LOG=debug cargo run --bin desktop_sim --features desktop -- --drift 0.05 --dropout 20
//! ```
//!
//! # Options
//!
//! | Flag | Default | Meaning |
//! |------|---------|---------|
//! | `--base <F>` | 70.0 | Starting temperature |
//! | `--drift <F>` | 0.01 | Change per read |
//! | `--noise <F>` | 0.05 | Peak noise |
//! | `--dropout <N>` | off | Fail every Nth read |
//! | `--ticks <N>` | forever | Stop after N ticks |
//! | `--period <MS>` | 250 | Tick period |
//! | `--unit <c\|f>` | f | Display unit |

use anyhow::{bail, Context, Result};
use rs_tempmon::config::{MonitorConfig, SensorSettings};
use rs_tempmon::hal::{SimulatedSensor, StdDelay, TerminalDisplay};
use rs_tempmon::{Monitor, TemperatureUnit, TracingSink};
use tracing_subscriber::EnvFilter;

/// Command-line options.
#[derive(Debug)]
struct Options {
    base: f32,
    drift: f32,
    noise: f32,
    dropout: u64,
    ticks: Option<u64>,
    period_ms: u32,
    unit: TemperatureUnit,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            base: 70.0,
            drift: 0.01,
            noise: 0.05,
            dropout: 0,
            ticks: None,
            period_ms: 250,
            unit: TemperatureUnit::Fahrenheit,
        }
    }
}

fn parse_options(args: impl IntoIterator<Item = String>) -> Result<Options> {
    let mut options = Options::default();
    let mut args = args.into_iter();
    while let Some(flag) = args.next() {
        let mut value = || {
            args.next()
                .with_context(|| format!("missing value for {flag}"))
        };
        match flag.as_str() {
            "--base" => options.base = value()?.parse().context("--base")?,
            "--drift" => options.drift = value()?.parse().context("--drift")?,
            "--noise" => options.noise = value()?.parse().context("--noise")?,
            "--dropout" => options.dropout = value()?.parse().context("--dropout")?,
            "--ticks" => options.ticks = Some(value()?.parse().context("--ticks")?),
            "--period" => options.period_ms = value()?.parse().context("--period")?,
            "--unit" => {
                let text = value()?;
                options.unit = TemperatureUnit::from_text(&text)
                    .with_context(|| format!("unknown unit '{text}'"))?;
            }
            other => bail!("unknown option '{other}'"),
        }
    }
    Ok(options)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let options = parse_options(std::env::args().skip(1))?;
    tracing::info!("desktop_sim v{} starting: {:?}", env!("CARGO_PKG_VERSION"), options);

    let config = MonitorConfig::default()
        .with_sensor(SensorSettings::default().with_unit(options.unit))
        .with_tick_period_ms(options.period_ms);

    let sensor = SimulatedSensor::new(options.base)
        .with_drift(options.drift)
        .with_noise(options.noise)
        .with_dropout_every(options.dropout)
        .with_unit(options.unit);

    let mut monitor: Monitor<_, _, _> =
        Monitor::new(sensor, TerminalDisplay::new(), TracingSink::new(), &config)?;
    if let Err(never) = monitor.start() {
        match never {}
    }

    let mut delay = StdDelay;
    let mut ticks = 0u64;
    loop {
        if let Some(reading) = monitor.step(&mut delay)? {
            if reading.rows_written > 0 {
                println!("{}", monitor.surface().display());
            }
        }
        ticks += 1;
        if options.ticks.is_some_and(|limit| ticks >= limit) {
            break;
        }
    }

    let stats = monitor.stats();
    tracing::info!(
        ticks = stats.ticks,
        skipped = stats.skipped_ticks,
        row_writes = stats.row_writes,
        "simulation finished"
    );
    Ok(())
}
