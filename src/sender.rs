//! Built-in sender  
//! If you want to create a new sender, you will need to implement [`SendCommand`] trait

use embedded_hal::delay::DelayNs;

use crate::command::{Command, State};

mod i2c_sender;

pub use i2c_sender::I2cSender;

/// [`SendCommand`] is the trait a sender should implement to communicate with the hardware
///
/// The LCD is write only on this path, a sender never reads anything back,
/// fixed delays stand in for busy flag polling.
pub trait SendCommand<Delayer: DelayNs> {
    /// Error raised by the underlying bus
    type Error;

    /// Put a [`Command`] on the wire, including the enable pulse of every nibble
    fn send(&mut self, command: impl Into<Command>, delayer: &mut Delayer) -> Result<(), Self::Error>;

    /// Send command, then wait specific duration for the controller to finish it
    fn send_and_delay(
        &mut self,
        command: impl Into<Command>,
        delayer: &mut Delayer,
        delay_us: u32,
    ) -> Result<(), Self::Error> {
        self.send(command, delayer)?;
        delayer.delay_us(delay_us);
        Ok(())
    }

    /// Get the current backlight
    fn get_backlight(&self) -> State;

    /// Set the backlight
    ///
    /// Note:
    /// the new state must be applied to every later transmission
    fn set_backlight(&mut self, backlight: State) -> Result<(), Self::Error>;
}
