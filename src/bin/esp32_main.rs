//! ESP32-C3 SuperMini temperature monitor.
//!
//! This is the main entry point for the physical hardware. It runs a 4Hz
//! loop that:
//! - Reads the MCP9808 over I2C
//! - Smooths the reading and computes its rate of change
//! - Renders both onto the 16x2 LCD, rewriting only rows that changed
//! - Prints each frame to the serial console
//!
//! # Hardware Setup
//!
//! MCP9808 and the LCD backpack share one I2C bus on GPIO8 (SDA) and
//! GPIO9 (SCL).
//!
//! # Build
//!
//! ```bash
//! cargo build --release --bin esp32_main --features esp32
//!
//! # Different backpack address or Celsius readout
//! LCD_ADDR=0x27 TEMP_UNIT=c cargo build --release --bin esp32_main --features esp32
//! ```

use std::cell::RefCell;

use esp_idf_hal::peripherals::Peripherals;
use rs_tempmon::config::{DisplaySettings, MonitorConfig, SensorSettings, TransportPolicy};
use rs_tempmon::hal::esp32::{pins, Esp32Delay, Esp32I2c};
use rs_tempmon::hal::{ConsoleSink, SharedBus};
use rs_tempmon::hd44780::Hd44780;
use rs_tempmon::mcp9808::Mcp9808;
use rs_tempmon::{Monitor, TemperatureUnit};

/// Parse an I2C address given as `0x3F` or `63`.
fn parse_address(text: &str) -> Option<u8> {
    let text = text.trim();
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

/// Compile-time address override, falling back to `default` when unset or invalid.
fn address_override(value: Option<&str>, default: u8) -> u8 {
    value.and_then(parse_address).unwrap_or(default)
}

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_hal::sys::link_patches();

    println!();
    println!("================================");
    println!("  rs-tempmon SuperMini Monitor");
    println!("================================");
    println!();

    // =========================================================================
    // Configuration
    // =========================================================================
    let unit = option_env!("TEMP_UNIT")
        .and_then(TemperatureUnit::from_text)
        .unwrap_or_default();
    let policy = match option_env!("FAIL_FAST") {
        Some("1") | Some("true") => TransportPolicy::FailFast,
        _ => TransportPolicy::SkipTick,
    };
    let config = MonitorConfig::default()
        .with_sensor(
            SensorSettings::default()
                .with_address(address_override(option_env!("SENSOR_ADDR"), pins::SENSOR_I2C_ADDR))
                .with_unit(unit),
        )
        .with_display(
            DisplaySettings::default()
                .with_address(address_override(option_env!("LCD_ADDR"), pins::LCD_I2C_ADDR)),
        )
        .with_transport_policy(policy);
    config.validate()?;

    let peripherals = Peripherals::take()?;

    // =========================================================================
    // Initialize I2C bus (GPIO8/9)
    // =========================================================================
    let bus = RefCell::new(Esp32I2c::new(
        peripherals.i2c0,
        peripherals.pins.gpio8, // SDA
        peripherals.pins.gpio9, // SCL
        pins::I2C_BAUD_HZ,
    )?);
    println!("[OK] I2C initialized (GPIO8/9)");

    let sensor = Mcp9808::from_settings(SharedBus::new(&bus), &config.sensor);
    let lcd = Hd44780::with_address(SharedBus::new(&bus), Esp32Delay::new(), config.display.address);
    println!(
        "[OK] MCP9808 @ {:#04x}, LCD @ {:#04x}",
        config.sensor.address, config.display.address
    );

    let mut monitor: Monitor<_, _, _> = Monitor::new(sensor, lcd, ConsoleSink, &config)?;
    monitor
        .start()
        .map_err(|e| anyhow::anyhow!("LCD init failed: {:?}", e))?;
    println!("[OK] LCD initialized");

    println!();
    println!("Monitor running ({}ms tick)", config.tick_period_ms);

    // =========================================================================
    // Main Loop
    // =========================================================================
    let mut delay = Esp32Delay::new();
    match monitor.run(&mut delay) {
        Ok(never) => match never {},
        Err(e) => Err(anyhow::anyhow!("monitor stopped: {}", e)),
    }
}
