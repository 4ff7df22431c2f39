//! HD44780 character LCD behind a PCF8574 I2C backpack.
//!
//! The backpack maps its eight output pins onto the LCD's 4-bit interface:
//!
//! ```text
//!  bit  7   6   5   4   3    2   1   0
//!      D7  D6  D5  D4  BL   EN  RW  RS
//! ```
//!
//! Every byte goes out as two nibbles, high first. Each nibble is latched by
//! two bus writes, one with `EN` high and one with it low. `BL` carries the
//! backlight state on every write.

use crate::traits::{CharacterDisplay, DelayMs, I2cBus, Row};

/// Default 7-bit address of the backpack.
pub const DEFAULT_ADDRESS: u8 = 0x3F;

const BACKLIGHT: u8 = 0x08;
const ENABLE: u8 = 0x04;
const REGISTER_SELECT: u8 = 0x01;

/// Settle time after every byte, long enough for clear and home.
const SETTLE_MS: u32 = 2;

/// Controller commands.
pub mod command {
    /// Clear display, cursor home.
    pub const CLEAR: u8 = 0x01;
    /// Entry mode: increment cursor, no shift.
    pub const ENTRY_INCREMENT: u8 = 0x06;
    /// Display on, cursor off, blink off.
    pub const DISPLAY_ON: u8 = 0x0C;
    /// Function set: 4-bit bus, two lines, 5x8 font.
    pub const FUNCTION_4BIT_2LINE: u8 = 0x28;
    /// Set DDRAM address (OR with the address).
    pub const SET_DDRAM_ADDR: u8 = 0x80;
    /// DDRAM offset of the second row.
    pub const ROW_1_OFFSET: u8 = 0x40;
    /// Power-on sequence: force 8-bit twice, switch to 4-bit, then configure.
    pub const INIT_SEQUENCE: [u8; 6] = [
        0x33,
        0x32,
        FUNCTION_4BIT_2LINE,
        DISPLAY_ON,
        ENTRY_INCREMENT,
        CLEAR,
    ];
}

/// Which controller register a byte targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Register {
    Command,
    Data,
}

impl Register {
    const fn bits(self) -> u8 {
        match self {
            Register::Command => 0,
            Register::Data => REGISTER_SELECT,
        }
    }
}

/// Two bus frames that latch one nibble.
///
/// `nibble` is already in the upper four bits.
#[inline]
pub const fn nibble_frames(nibble: u8, data: bool, backlight: bool) -> [u8; 2] {
    let mut base = nibble & 0xF0;
    if data {
        base |= REGISTER_SELECT;
    }
    if backlight {
        base |= BACKLIGHT;
    }
    [base | ENABLE, base]
}

/// DDRAM address command for a cursor position.
///
/// # Examples
///
/// ```
/// use rs_tempmon::hd44780::cursor_command;
/// use rs_tempmon::Row;
///
/// assert_eq!(cursor_command(Row::Top, 0), 0x80);
/// assert_eq!(cursor_command(Row::Bottom, 3), 0xC3);
/// ```
#[inline]
pub const fn cursor_command(row: Row, col: u8) -> u8 {
    let offset = match row {
        Row::Top => 0,
        Row::Bottom => command::ROW_1_OFFSET,
    };
    command::SET_DDRAM_ADDR | (offset + (col & 0x3F))
}

/// HD44780 LCD driven over a PCF8574 backpack.
///
/// # Type Parameters
///
/// - `B`: the I2C bus ([`I2cBus`])
/// - `D`: delay used for controller settle times ([`DelayMs`])
#[derive(Debug)]
pub struct Hd44780<B, D> {
    bus: B,
    delay: D,
    address: u8,
    backlight: bool,
}

impl<B: I2cBus, D: DelayMs> Hd44780<B, D> {
    /// Create a driver at the default address with the backlight on.
    ///
    /// Nothing is sent until [`CharacterDisplay::init`].
    pub fn new(bus: B, delay: D) -> Self {
        Self::with_address(bus, delay, DEFAULT_ADDRESS)
    }

    /// Create a driver at a specific address
    pub fn with_address(bus: B, delay: D, address: u8) -> Self {
        Self {
            bus,
            delay,
            address,
            backlight: true,
        }
    }

    /// Sends one command byte.
    pub fn command(&mut self, value: u8) -> Result<(), B::Error> {
        self.send(value, Register::Command)
    }

    /// Sends one character byte.
    pub fn data(&mut self, value: u8) -> Result<(), B::Error> {
        self.send(value, Register::Data)
    }

    fn send(&mut self, value: u8, register: Register) -> Result<(), B::Error> {
        let data = register.bits() != 0;
        for nibble in [value & 0xF0, value << 4] {
            let frames = nibble_frames(nibble, data, self.backlight);
            self.bus.write(self.address, &frames)?;
        }
        self.delay.delay_ms(SETTLE_MS);
        Ok(())
    }

    /// Current backlight flag
    pub fn backlight_on(&self) -> bool {
        self.backlight
    }

    /// Configured address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the bus and delay
    pub fn release(self) -> (B, D) {
        (self.bus, self.delay)
    }
}

impl<B: I2cBus, D: DelayMs> CharacterDisplay for Hd44780<B, D> {
    type Error = B::Error;

    fn init(&mut self) -> Result<(), Self::Error> {
        for cmd in command::INIT_SEQUENCE {
            self.command(cmd)?;
        }
        self.delay.delay_ms(SETTLE_MS);
        Ok(())
    }

    fn set_cursor(&mut self, row: Row, col: u8) -> Result<(), Self::Error> {
        self.command(cursor_command(row, col))
    }

    fn write_text(&mut self, text: &str) -> Result<(), Self::Error> {
        for ch in text.chars() {
            // The character ROM only matches ASCII
            let byte = if ch.is_ascii() { ch as u8 } else { b'?' };
            self.data(byte)?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.command(command::CLEAR)
    }

    fn backlight(&mut self, on: bool) -> Result<(), Self::Error> {
        let frame = if on { BACKLIGHT } else { 0x00 };
        self.bus.write(self.address, &[frame])?;
        self.backlight = on;
        Ok(())
    }
}
