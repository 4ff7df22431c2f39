//! ESP32-C3 SuperMini hardware abstraction layer for the temperature monitor.
//!
//! # Hardware Configuration
//!
//! - **MCU**: ESP32-C3 SuperMini (RISC-V 160MHz, 4MB Flash)
//! - **Sensor**: MCP9808 breakout (I2C, 0x18)
//! - **Display**: 16x2 HD44780 LCD with PCF8574 backpack (I2C, 0x3F)
//!
//! Both devices hang off the same I2C bus.
//!
//! # Pin Assignments
//!
//! See the [`pins`] module for GPIO assignments matching the SuperMini layout.

mod delay;
mod i2c;

pub use delay::Esp32Delay;
pub use i2c::Esp32I2c;

/// Pin assignments for SuperMini ESP32-C3.
pub mod pins {
    // =========================================================================
    // I2C Bus (MCP9808 + LCD backpack)
    // =========================================================================

    /// I2C data line (also has onboard blue LED - will flicker during I2C)
    pub const I2C_SDA: i32 = 8;

    /// I2C clock line (also shared with BOOT button - only affects programming)
    pub const I2C_SCL: i32 = 9;

    /// Standard-mode bus clock; the PCF8574 tops out at 100kHz
    pub const I2C_BAUD_HZ: u32 = 100_000;

    /// MCP9808 address with A0-A2 grounded
    pub const SENSOR_I2C_ADDR: u8 = crate::mcp9808::DEFAULT_ADDRESS;

    /// PCF8574A backpack address (PCF8574 boards use 0x27)
    pub const LCD_I2C_ADDR: u8 = crate::hd44780::DEFAULT_ADDRESS;
}
