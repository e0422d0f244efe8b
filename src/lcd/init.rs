use embedded_hal::delay::DelayNs;

use crate::{
    command::{CommandSet, Font, MoveDirection, ShiftType, State},
    lcd::Lcd,
    sender::SendCommand,
    state::LcdState,
};

// all init timings are worst case values, the busy flag can't be polled on this path
/// Controller needs >40ms after Vcc rises
const POWER_ON_DELAY_US: u32 = 50_000;
/// Settle margin for the display hardware after the first expander write
const BACKLIGHT_SETTLE_MS: u32 = 1_000;
/// After the first and second 0x3 nibble, datasheet asks for >4.1ms
const RESET_LONG_DELAY_US: u32 = 4_500;
/// After the third 0x3 nibble, datasheet asks for >100us
const RESET_SHORT_DELAY_US: u32 = 150;

/// [`Config`] is the init config of a [`Lcd`]
pub struct Config {
    state: LcdState,
    backlight: State,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state: LcdState::default(),
            backlight: State::On,
        }
    }
}

#[allow(missing_docs)]
impl Config {
    /// Geometry of the display, `rows` is clamped to 1..=4
    pub fn new(columns: u8, rows: u8) -> Self {
        Self::default().set_columns(columns).set_rows(rows)
    }

    pub fn get_columns(&self) -> u8 {
        self.state.get_columns()
    }

    pub fn set_columns(mut self, columns: u8) -> Self {
        self.state.set_columns(columns);
        self
    }

    pub fn get_rows(&self) -> u8 {
        self.state.get_rows()
    }

    pub fn set_rows(mut self, rows: u8) -> Self {
        self.state.set_rows(rows);
        self
    }

    /// Font actually used: [`Font::Font5x10`] only holds on a single row display
    pub fn get_font(&self) -> Font {
        self.state.get_font()
    }

    pub fn set_font(mut self, font: Font) -> Self {
        self.state.set_font(font);
        self
    }

    pub fn get_backlight(&self) -> State {
        self.backlight
    }

    pub fn set_backlight(mut self, backlight: State) -> Self {
        self.backlight = backlight;
        self
    }
}

impl<'a, 'b, Sender, Delayer> Lcd<'a, 'b, Sender, Delayer>
where
    Sender: SendCommand<Delayer>,
    Delayer: DelayNs,
{
    /// Create a [`Lcd`] driver, and init LCD hardware
    ///
    /// The controller is brought from an unknown state into 4 bit mode,
    /// display on, cursor and blink off, left to right without autoscroll,
    /// then cleared with the cursor at home.
    pub fn new(
        sender: &'a mut Sender,
        delayer: &'b mut Delayer,
        config: Config,
    ) -> Result<Self, Sender::Error> {
        let mut state = config.state;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "lcd init: {}x{}, {}, {}",
            state.get_columns(),
            state.get_rows(),
            state.get_line_mode(),
            state.get_font()
        );

        delayer.delay_us(POWER_ON_DELAY_US);

        // first byte on the port, only the backlight bit
        sender.set_backlight(config.backlight)?;
        delayer.delay_ms(BACKLIGHT_SETTLE_MS);

        // in initialization process, we'd better use "raw command", to strictly follow datasheet
        // 0x3 three times works whatever mode the controller was left in
        sender.send_and_delay(CommandSet::ResetNibble, delayer, RESET_LONG_DELAY_US)?;
        sender.send_and_delay(CommandSet::ResetNibble, delayer, RESET_LONG_DELAY_US)?;
        sender.send_and_delay(CommandSet::ResetNibble, delayer, RESET_SHORT_DELAY_US)?;
        sender.send(CommandSet::HalfFunctionSet, delayer)?;

        // from here on every command is two nibbles
        sender.send(
            CommandSet::FunctionSet(state.get_line_mode(), state.get_font()),
            delayer,
        )?;

        state.set_display_state(State::On);
        state.set_cursor_state(State::Off);
        state.set_cursor_blink(State::Off);
        state.set_direction(MoveDirection::LeftToRight);
        state.set_shift_type(ShiftType::CursorOnly);

        let mut lcd = Lcd {
            sender,
            delayer,
            state,
        };

        lcd.send_display_on_off()?;
        lcd.clear_display()?;
        lcd.send_entry_mode()?;
        lcd.return_home()?;

        #[cfg(feature = "defmt")]
        defmt::trace!("lcd init done");

        Ok(lcd)
    }
}
