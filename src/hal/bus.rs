//! Sharing one I2C bus between several drivers.
//!
//! The sensor and the LCD backpack sit on the same two wires. Each driver
//! takes a [`SharedBus`] handle; transfers borrow the underlying bus only for
//! their own duration, so the single-threaded loop never overlaps them.

use core::cell::RefCell;

use crate::traits::I2cBus;

/// Handle to a bus owned by a [`RefCell`].
///
/// # Example
///
/// ```rust
/// use core::cell::RefCell;
/// use rs_tempmon::hal::{MockI2c, SharedBus};
/// use rs_tempmon::traits::I2cBus;
///
/// let bus = RefCell::new(MockI2c::new());
/// let mut lcd_bus = SharedBus::new(&bus);
/// let mut sensor_bus = SharedBus::new(&bus);
///
/// lcd_bus.write(0x3F, &[0x08]).unwrap();
/// sensor_bus.write(0x18, &[0x05]).unwrap();
/// assert_eq!(bus.borrow().writes.len(), 2);
/// ```
#[derive(Debug)]
pub struct SharedBus<'a, B> {
    bus: &'a RefCell<B>,
}

impl<'a, B> SharedBus<'a, B> {
    /// Create a handle onto `bus`
    pub fn new(bus: &'a RefCell<B>) -> Self {
        Self { bus }
    }
}

impl<B> Clone for SharedBus<'_, B> {
    fn clone(&self) -> Self {
        Self { bus: self.bus }
    }
}

impl<B: I2cBus> I2cBus for SharedBus<'_, B> {
    type Error = B::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.borrow_mut().write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.bus.borrow_mut().read(address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        data: &[u8],
        buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.bus.borrow_mut().write_read(address, data, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{MockDelay, MockI2c};
    use crate::hd44780::Hd44780;
    use crate::mcp9808::Mcp9808;
    use crate::traits::{CharacterDisplay, TemperatureSensor};

    #[test]
    fn sensor_and_lcd_interleave_on_one_bus() {
        let bus = RefCell::new(MockI2c::new());
        bus.borrow_mut().queue_read(&[0x01, 0x94]);

        let mut sensor = Mcp9808::new(SharedBus::new(&bus));
        let mut lcd = Hd44780::new(SharedBus::new(&bus), MockDelay::new());

        lcd.backlight(true).unwrap();
        sensor.read().unwrap();
        lcd.backlight(false).unwrap();

        let addresses: Vec<u8> = bus.borrow().writes.iter().map(|(a, _)| *a).collect();
        assert_eq!(addresses, [0x3F, 0x18, 0x3F]);
    }

    #[test]
    fn errors_pass_through() {
        let bus = RefCell::new(MockI2c::new());
        bus.borrow_mut().fail_next(1);
        let mut handle = SharedBus::new(&bus);
        assert!(handle.write(0x3F, &[0]).is_err());
        assert!(handle.clone().write(0x3F, &[0]).is_ok());
    }
}
