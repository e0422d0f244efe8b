/*!
# HD44780 over I2C

Driver for HD44780 compatible character LCDs, wired through a PCF8574 style
I2C backpack (the "LCD1602 I2C adapter board"). Every byte is sent as two
4 bit nibbles, each latched by an enable pulse. The controller can't be read
on this path, so fixed worst case delays stand in for busy flag polling,
and the driver keeps its own copy of the controller registers.

Basic Usage:

1. Initialize a "sender" <br/>
    [`sender::I2cSender`] borrows an [`embedded_hal::i2c::I2c`] bus and takes the 7 bit
    expander address. You can use any other driver implemented [`sender::SendCommand`].
<br/>
<br/>
2. Use [`lcd::Lcd::new()`] with a [`lcd::Config`] (columns, rows, font) to create a
   [`lcd::Lcd`], this runs the whole power-on init sequence
<br/>
<br/>
3. use any methods provide by [`lcd::Lcd`] to control the display

Out of range input is clamped, not rejected: a row past the last row selects
the last row, a CGRAM slot is masked to `0..=7`.

Enable the `defmt` feature to get init and backlight logs over `defmt`.
*/

#![no_std]
#![warn(missing_docs)]

pub mod command;
pub mod lcd;
pub mod sender;
mod state;
pub mod utils;
