use embedded_hal::{delay::DelayNs, i2c::I2c};

use crate::{
    command::{Bits, Command, RegisterSelection, State},
    utils::BitOps,
};

use super::SendCommand;

// I2C to parallel:
// P7 -> P0
// DB7/DB6/DB5/DB4/BL/EN/RW/RS
const RS_BIT: u8 = 0;
const EN_BIT: u8 = 2;
const BL_BIT: u8 = 3;

/// Minimum width of the enable pulse
pub(crate) const ENABLE_PULSE_US: u32 = 1;
/// Worst case execution time of a nibble latched on the falling edge
pub(crate) const NIBBLE_SETTLE_US: u32 = 50;

/// Sender for a PCF8574 style backpack
///
/// Every byte written to the expander re-asserts the backlight bit,
/// the expander latches whole bytes, so a missing bit turns the backlight off.
pub struct I2cSender<'a, I2cLcd: I2c> {
    i2c: &'a mut I2cLcd,
    addr: u8,
    backlight: State,
}

impl<'a, I2cLcd: I2c> I2cSender<'a, I2cLcd> {
    /// `addr` is the 7 bit address of the expander (0x27 on most boards),
    /// backlight starts on
    pub fn new(i2c: &'a mut I2cLcd, addr: u8) -> Self {
        Self {
            i2c,
            addr,
            backlight: State::On,
        }
    }

    fn backlight_bits(&self) -> u8 {
        let mut bits = 0u8;
        bits.put_bit(BL_BIT, self.backlight);
        bits
    }

    fn expander_write(&mut self, data: u8) -> Result<(), I2cLcd::Error> {
        let byte = data | self.backlight_bits();
        self.i2c.write(self.addr, &[byte])
    }

    // data bits go to P7..P4, RS rides along in the lower bits
    fn write_nibble(&mut self, data: u8, delayer: &mut impl DelayNs) -> Result<(), I2cLcd::Error> {
        let mut disabled = data;
        disabled.clear_bit(EN_BIT);
        let mut enabled = disabled;
        enabled.set_bit(EN_BIT);

        self.expander_write(disabled)?;

        // controller latches on the falling edge
        self.expander_write(enabled)?;
        delayer.delay_us(ENABLE_PULSE_US);
        self.expander_write(disabled)?;
        delayer.delay_us(NIBBLE_SETTLE_US);

        Ok(())
    }
}

impl<'a, I2cLcd: I2c, Delayer: DelayNs> SendCommand<Delayer> for I2cSender<'a, I2cLcd> {
    type Error = I2cLcd::Error;

    fn send(&mut self, command: impl Into<Command>, delayer: &mut Delayer) -> Result<(), Self::Error> {
        let command: Command = command.into();

        let mut mode = 0u8;
        if command.get_register_selection() == RegisterSelection::Data {
            mode.set_bit(RS_BIT);
        }

        match command.get_data() {
            Bits::Bit4(nibble) => self.write_nibble(((nibble & 0x0F) << 4) | mode, delayer),
            Bits::Bit8(byte) => {
                self.write_nibble((byte & 0xF0) | mode, delayer)?;
                self.write_nibble((byte << 4) | mode, delayer)
            }
        }
    }

    fn get_backlight(&self) -> State {
        self.backlight
    }

    fn set_backlight(&mut self, backlight: State) -> Result<(), Self::Error> {
        self.backlight = backlight;
        self.expander_write(0)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::command::CommandSet;
    use embedded_hal_mock::eh1::{
        delay::NoopDelay,
        i2c::{Mock as I2cMock, Transaction as I2cTransaction},
    };

    const ADDR: u8 = 0x27;

    /// Sums every requested delay
    #[derive(Default)]
    struct TotalDelay {
        ns: u64,
        calls: usize,
    }

    impl DelayNs for TotalDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.ns += ns as u64;
            self.calls += 1;
        }
    }

    #[test]
    fn data_byte_is_high_nibble_then_low_nibble() {
        let expectations = std::vec![
            // 'A' 0x41 - high nibble, rs=1, bl=1
            I2cTransaction::write(ADDR, std::vec![0b0100_1001]),
            I2cTransaction::write(ADDR, std::vec![0b0100_1101]),
            I2cTransaction::write(ADDR, std::vec![0b0100_1001]),
            // 'A' 0x41 - low nibble
            I2cTransaction::write(ADDR, std::vec![0b0001_1001]),
            I2cTransaction::write(ADDR, std::vec![0b0001_1101]),
            I2cTransaction::write(ADDR, std::vec![0b0001_1001]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut sender = I2cSender::new(&mut i2c, ADDR);

        sender
            .send(CommandSet::WriteDataToRAM(b'A'), &mut NoopDelay)
            .unwrap();

        i2c.done();
    }

    #[test]
    fn init_nibble_is_a_single_pulse() {
        let expectations = std::vec![
            I2cTransaction::write(ADDR, std::vec![0b0011_1000]),
            I2cTransaction::write(ADDR, std::vec![0b0011_1100]),
            I2cTransaction::write(ADDR, std::vec![0b0011_1000]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut sender = I2cSender::new(&mut i2c, ADDR);

        sender
            .send(CommandSet::ResetNibble, &mut NoopDelay)
            .unwrap();

        i2c.done();
    }

    #[test]
    fn backlight_off_is_kept_for_later_bytes() {
        let expectations = std::vec![
            // backlight off, nothing else on the port
            I2cTransaction::write(ADDR, std::vec![0b0000_0000]),
            // clear display 0x01, bl=0
            I2cTransaction::write(ADDR, std::vec![0b0000_0000]),
            I2cTransaction::write(ADDR, std::vec![0b0000_0100]),
            I2cTransaction::write(ADDR, std::vec![0b0000_0000]),
            I2cTransaction::write(ADDR, std::vec![0b0001_0000]),
            I2cTransaction::write(ADDR, std::vec![0b0001_0100]),
            I2cTransaction::write(ADDR, std::vec![0b0001_0000]),
            // backlight on again
            I2cTransaction::write(ADDR, std::vec![0b0000_1000]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut sender = I2cSender::new(&mut i2c, ADDR);
        let mut delayer = NoopDelay;

        SendCommand::<NoopDelay>::set_backlight(&mut sender, State::Off).unwrap();
        assert_eq!(SendCommand::<NoopDelay>::get_backlight(&sender), State::Off);
        sender.send(CommandSet::Raw(0x01), &mut delayer).unwrap();
        SendCommand::<NoopDelay>::set_backlight(&mut sender, State::On).unwrap();

        i2c.done();
    }

    #[test]
    fn every_nibble_waits_pulse_and_settle_time() {
        let mut expectations = std::vec![I2cTransaction::write(ADDR, std::vec![0b0000_0000])];
        for _ in 0..2 {
            expectations.push(I2cTransaction::write(ADDR, std::vec![0b0000_0000]));
            expectations.push(I2cTransaction::write(ADDR, std::vec![0b0000_0100]));
            expectations.push(I2cTransaction::write(ADDR, std::vec![0b0000_0000]));
        }
        let mut i2c = I2cMock::new(&expectations);
        let mut sender = I2cSender::new(&mut i2c, ADDR);
        SendCommand::<TotalDelay>::set_backlight(&mut sender, State::Off).unwrap();
        let mut delayer = TotalDelay::default();

        sender.send(CommandSet::Raw(0x00), &mut delayer).unwrap();

        // two nibbles, each one pulse plus one settle wait
        assert_eq!(delayer.calls, 4);
        assert_eq!(
            delayer.ns,
            2 * (ENABLE_PULSE_US + NIBBLE_SETTLE_US) as u64 * 1_000
        );

        i2c.done();
    }
}
