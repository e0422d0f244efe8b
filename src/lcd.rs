//! The [`Lcd`] driver
//!
//! Use [`Lcd::new()`] with a [`Config`] to initialize the hardware,
//! then use the methods of [`Lcd`] to control it.

use embedded_hal::delay::DelayNs;

use crate::{
    command::{CommandSet, Font, LineMode, MoveDirection, RAMType, ShiftType, State},
    sender::SendCommand,
    state::LcdState,
};

mod init;


pub use init::Config;

/// Clear display and return home need far more than a nibble's settle time
const CLEAR_HOME_DELAY_US: u32 = 2_000;

/// Character to show in place of anything the CGROM can't display
const FALLBACK_CHAR: u8 = 0xFF;

/// A display attached through a [`SendCommand`] sender
///
/// Every method blocks until all bytes are on the bus and the fixed
/// worst case delays have elapsed. Bus errors are passed through untouched.
pub struct Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    sender: &'a mut Sender,
    delayer: &'b mut Delayer,
    state: LcdState,
}

impl<'a, 'b, Sender, Delayer> Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    /// Note:
    /// the backlight bit is part of every byte sent afterwards
    pub fn set_backlight(&mut self, backlight: State) -> Result<(), Sender::Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!("lcd backlight {}", backlight);

        self.sender.set_backlight(backlight)
    }

    /// Backlight state applied to every byte on the bus
    pub fn get_backlight(&self) -> State {
        self.sender.get_backlight()
    }

    /// Write a raw byte at the current address
    ///
    /// Bytes 0 to 7 show the custom graphs stored in CGRAM.
    pub fn write_u8_to_cur(&mut self, byte: impl Into<u8>) -> Result<(), Sender::Error> {
        self.sender
            .send(CommandSet::WriteDataToRAM(byte.into()), self.delayer)
    }

    /// Write string to current position, one data byte per character
    ///
    /// There is no line wrapping, characters past the last column go to
    /// DDRAM cells outside the display window. Non ASCII characters are
    /// shown as a full rectangle, use [`Lcd::write_u8_to_cur()`] to reach the
    /// CGROM codes 0x80..=0xFF.
    pub fn write_str_to_cur(&mut self, str: &str) -> Result<(), Sender::Error> {
        str.chars().try_for_each(|char| {
            let out_byte = match char.is_ascii() {
                true => char as u8,
                false => FALLBACK_CHAR,
            };
            self.write_u8_to_cur(out_byte)
        })
    }

    /// write string to specific position
    pub fn write_str_to_pos(&mut self, str: &str, pos: (u8, u8)) -> Result<(), Sender::Error> {
        self.set_cursor_pos(pos)?;
        self.write_str_to_cur(str)
    }

    /// Store a custom 5x8 graph in CGRAM slot `index`
    ///
    /// `index` is masked to 0..=7. After this call the address counter
    /// points into CGRAM, call [`Lcd::set_cursor_pos()`] before writing text again.
    pub fn write_graph_to_cgram(
        &mut self,
        index: u8,
        graph_data: &[u8; 8],
    ) -> Result<(), Sender::Error> {
        let index = index & 0b111;

        // if DDRAM is write from right to left, then CGRAM address counter decreases too,
        // change to left to right for the upload, so lines land in order
        let direction_flipped = self.get_direction() == MoveDirection::RightToLeft;
        if direction_flipped {
            self.set_direction(MoveDirection::LeftToRight)?;
        }

        self.set_cgram_addr(index << 3)?;
        graph_data
            .iter()
            .try_for_each(|&line_data| self.write_u8_to_cur(line_data))?;

        if direction_flipped {
            self.set_direction(MoveDirection::RightToLeft)?;
        }

        Ok(())
    }

    /// write custom graph stored at CGRAM slot `index` to current position
    pub fn write_graph_to_cur(&mut self, index: u8) -> Result<(), Sender::Error> {
        self.write_u8_to_cur(index & 0b111)
    }

    /// Blank the whole DDRAM and move the cursor home, waits 2ms
    pub fn clear_display(&mut self) -> Result<(), Sender::Error> {
        self.sender
            .send_and_delay(CommandSet::ClearDisplay, self.delayer, CLEAR_HOME_DELAY_US)?;
        self.state.set_ram_type(RAMType::DDRam);
        Ok(())
    }

    /// Cursor to (0, 0) and undo display shift, waits 2ms
    pub fn return_home(&mut self) -> Result<(), Sender::Error> {
        self.sender
            .send_and_delay(CommandSet::ReturnHome, self.delayer, CLEAR_HOME_DELAY_US)?;
        self.state.set_ram_type(RAMType::DDRam);
        Ok(())
    }

    /// Display on or off, DDRAM content is kept
    pub fn set_display_state(&mut self, display: State) -> Result<(), Sender::Error> {
        self.state.set_display_state(display);
        self.send_display_on_off()
    }

    #[allow(missing_docs)]
    pub fn get_display_state(&self) -> State {
        self.state.get_display_state()
    }

    /// toggle entire display on and off (it doesn't toggle backlight)
    pub fn toggle_display(&mut self) -> Result<(), Sender::Error> {
        match self.get_display_state() {
            State::Off => self.set_display_state(State::On),
            State::On => self.set_display_state(State::Off),
        }
    }

    /// Underline cursor on or off
    pub fn set_cursor_state(&mut self, cursor: State) -> Result<(), Sender::Error> {
        self.state.set_cursor_state(cursor);
        self.send_display_on_off()
    }

    #[allow(missing_docs)]
    pub fn get_cursor_state(&self) -> State {
        self.state.get_cursor_state()
    }

    /// Blinking block cursor on or off
    pub fn set_cursor_blink_state(&mut self, blink: State) -> Result<(), Sender::Error> {
        self.state.set_cursor_blink(blink);
        self.send_display_on_off()
    }

    #[allow(missing_docs)]
    pub fn get_cursor_blink_state(&self) -> State {
        self.state.get_cursor_blink()
    }

    /// Text direction of later writes
    pub fn set_direction(&mut self, dir: MoveDirection) -> Result<(), Sender::Error> {
        self.state.set_direction(dir);
        self.send_entry_mode()
    }

    #[allow(missing_docs)]
    pub fn get_direction(&self) -> MoveDirection {
        self.state.get_direction()
    }

    /// [`ShiftType::CursorAndDisplay`] turns autoscroll on
    pub fn set_shift_type(&mut self, shift: ShiftType) -> Result<(), Sender::Error> {
        self.state.set_shift_type(shift);
        self.send_entry_mode()
    }

    #[allow(missing_docs)]
    pub fn get_shift_type(&self) -> ShiftType {
        self.state.get_shift_type()
    }

    /// Move the address counter to `(col, row)`
    ///
    /// `row` past the last row is clamped to the last row,
    /// `col` is not checked against the display width.
    pub fn set_cursor_pos(&mut self, pos: (u8, u8)) -> Result<(), Sender::Error> {
        let raw_pos = self.state.ddram_addr(pos);

        self.sender.send(CommandSet::SetDDRAM(raw_pos), self.delayer)?;
        self.state.set_ram_type(RAMType::DDRam);
        Ok(())
    }

    /// Point the address counter into CGRAM, later writes go to custom graphs
    pub fn set_cgram_addr(&mut self, addr: u8) -> Result<(), Sender::Error> {
        self.sender.send(CommandSet::SetCGRAM(addr), self.delayer)?;
        self.state.set_ram_type(RAMType::CGRam);
        Ok(())
    }

    /// RAM the address counter points into, as far as the driver knows
    pub fn get_ram_type(&self) -> RAMType {
        self.state.get_ram_type()
    }

    /// One-shot move, no state is kept
    ///
    /// `shift_cursor_or_display(ShiftType::CursorAndDisplay, MoveDirection::RightToLeft)`
    /// scrolls the display window left.
    pub fn shift_cursor_or_display(
        &mut self,
        shift_type: ShiftType,
        dir: MoveDirection,
    ) -> Result<(), Sender::Error> {
        self.sender
            .send(CommandSet::CursorOrDisplayShift(shift_type, dir), self.delayer)
    }

    /// Send any instruction byte as is
    ///
    /// Note:
    /// the cached state is not updated, later toggles resend the cached flags
    pub fn send_raw_command(&mut self, command: u8) -> Result<(), Sender::Error> {
        self.sender.send(CommandSet::Raw(command), self.delayer)
    }

    #[allow(missing_docs)]
    pub fn get_columns(&self) -> u8 {
        self.state.get_columns()
    }

    /// Row count after clamping to 1..=4
    pub fn get_rows(&self) -> u8 {
        self.state.get_rows()
    }

    /// Line mode sent in function set, derived from the row count
    pub fn get_line_mode(&self) -> LineMode {
        self.state.get_line_mode()
    }

    /// Font sent in function set
    pub fn get_font(&self) -> Font {
        self.state.get_font()
    }

    /// Wait for specified milliseconds
    pub fn delay_ms(&mut self, ms: u32) {
        self.delayer.delay_ms(ms);
    }

    /// Wait for specified microseconds
    pub fn delay_us(&mut self, us: u32) {
        self.delayer.delay_us(us);
    }

    fn send_display_on_off(&mut self) -> Result<(), Sender::Error> {
        let command = CommandSet::DisplayOnOff {
            display: self.get_display_state(),
            cursor: self.get_cursor_state(),
            cursor_blink: self.get_cursor_blink_state(),
        };
        self.sender.send(command, self.delayer)
    }

    fn send_entry_mode(&mut self) -> Result<(), Sender::Error> {
        let command = CommandSet::EntryModeSet(self.get_direction(), self.get_shift_type());
        self.sender.send(command, self.delayer)
    }
}

impl<'a, 'b, Sender, Delayer> core::fmt::Write for Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.write_str_to_cur(s).map_err(|_| core::fmt::Error)
    }
}
