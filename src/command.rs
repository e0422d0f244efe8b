//! HD44780 instruction set
//!
//! [`CommandSet`] names every instruction this driver sends, [`Command`] is the
//! form a sender puts on the wire: a register selection plus a payload.

use crate::utils::BitOps;

/// Instructions understood by an HD44780 compatible controller
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandSet {
    /// Clear DDRAM and set address counter to 0
    ClearDisplay,
    /// Set address counter to 0 and undo any display shift
    ReturnHome,
    /// Where the address counter moves after a write, and whether the display follows it
    EntryModeSet(MoveDirection, ShiftType),
    #[allow(missing_docs)]
    DisplayOnOff {
        display: State,
        cursor: State,
        cursor_blink: State,
    },
    /// One-shot move of the cursor, or of the whole display window
    CursorOrDisplayShift(ShiftType, MoveDirection),
    // the next two are not commands from datasheet,
    // they are the bare nibbles of the 4 bit init sequence,
    // we name them, to make things tidy
    /// `0x3` nibble, forces 8 bit mode from any prior state
    ResetNibble,
    /// `0x2` nibble, switches into 4 bit mode
    HalfFunctionSet,
    /// Always 4 bit interface on the I2C path
    FunctionSet(LineMode, Font),
    /// Select CGRAM, lower 6 bits are the address
    SetCGRAM(u8),
    /// Select DDRAM, lower 7 bits are the address
    SetDDRAM(u8),
    /// Write a byte to the currently selected RAM
    WriteDataToRAM(u8),
    /// Any instruction byte, sent as is
    Raw(u8),
}

/// Direction of the address counter, or of a shift
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveDirection {
    /// Move to the left
    RightToLeft,
    /// Move to the right
    #[default]
    LeftToRight,
}

/// Whether the display window follows the cursor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShiftType {
    /// Only the cursor moves
    #[default]
    CursorOnly,
    /// Cursor and display window move together (autoscroll in entry mode)
    CursorAndDisplay,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum State {
    Off,
    #[default]
    On,
}

/// Number of display lines the controller is configured for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum LineMode {
    OneLine,
    #[default]
    TwoLine,
}

/// Character cell height
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum Font {
    #[default]
    Font5x8,
    /// Only available in [`LineMode::OneLine`]
    Font5x10,
}

/// The type of memory to access
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RAMType {
    /// Display Data RAM
    #[default]
    DDRam,
    /// Character Generator RAM
    CGRam,
}

/// A command ready to be put on the wire
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Command {
    rs: RegisterSelection,
    data: Bits,
}

/// Level of the RS line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegisterSelection {
    /// RS low, instruction register
    Command,
    /// RS high, data register
    Data,
}

/// Payload of a [`Command`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bits {
    /// A single nibble, only used before 4 bit mode is committed
    Bit4(u8),
    /// A full byte, sent as high nibble then low nibble
    Bit8(u8),
}

impl Command {
    pub(crate) fn new(rs: RegisterSelection, data: Bits) -> Self {
        Self { rs, data }
    }

    /// Level the RS line should take while this command is sent
    pub fn get_register_selection(&self) -> RegisterSelection {
        self.rs
    }

    /// Payload of this command
    pub fn get_data(&self) -> Bits {
        self.data
    }
}

impl From<CommandSet> for Command {
    fn from(command: CommandSet) -> Self {
        use RegisterSelection::{Command as Cmd, Data};

        match command {
            CommandSet::ClearDisplay => Self::new(Cmd, Bits::Bit8(0b0000_0001)),

            CommandSet::ReturnHome => Self::new(Cmd, Bits::Bit8(0b0000_0010)),

            CommandSet::EntryModeSet(dir, st) => {
                let mut raw_bits: u8 = 0b0000_0100;

                match dir {
                    MoveDirection::RightToLeft => raw_bits.clear_bit(1),
                    MoveDirection::LeftToRight => raw_bits.set_bit(1),
                };

                match st {
                    ShiftType::CursorOnly => raw_bits.clear_bit(0),
                    ShiftType::CursorAndDisplay => raw_bits.set_bit(0),
                };

                Self::new(Cmd, Bits::Bit8(raw_bits))
            }

            CommandSet::DisplayOnOff {
                display,
                cursor,
                cursor_blink,
            } => {
                let mut raw_bits: u8 = 0b0000_1000;

                raw_bits.put_bit(2, display);
                raw_bits.put_bit(1, cursor);
                raw_bits.put_bit(0, cursor_blink);

                Self::new(Cmd, Bits::Bit8(raw_bits))
            }

            CommandSet::CursorOrDisplayShift(st, dir) => {
                let mut raw_bits: u8 = 0b0001_0000;

                match st {
                    ShiftType::CursorOnly => raw_bits.clear_bit(3),
                    ShiftType::CursorAndDisplay => raw_bits.set_bit(3),
                };

                match dir {
                    MoveDirection::RightToLeft => raw_bits.clear_bit(2),
                    MoveDirection::LeftToRight => raw_bits.set_bit(2),
                };

                Self::new(Cmd, Bits::Bit8(raw_bits))
            }

            CommandSet::ResetNibble => Self::new(Cmd, Bits::Bit4(0b0011)),

            CommandSet::HalfFunctionSet => Self::new(Cmd, Bits::Bit4(0b0010)),

            CommandSet::FunctionSet(line, font) => {
                // bit 4 stays clear: 4 bit interface
                let mut raw_bits: u8 = 0b0010_0000;

                match line {
                    LineMode::OneLine => raw_bits.clear_bit(3),
                    LineMode::TwoLine => raw_bits.set_bit(3),
                };

                match font {
                    Font::Font5x8 => raw_bits.clear_bit(2),
                    Font::Font5x10 => raw_bits.set_bit(2),
                };

                Self::new(Cmd, Bits::Bit8(raw_bits))
            }

            CommandSet::SetCGRAM(addr) => Self::new(Cmd, Bits::Bit8(0b0100_0000 | (addr & 0x3F))),

            CommandSet::SetDDRAM(addr) => Self::new(Cmd, Bits::Bit8(0b1000_0000 | (addr & 0x7F))),

            CommandSet::WriteDataToRAM(data) => Self::new(Data, Bits::Bit8(data)),

            CommandSet::Raw(raw_bits) => Self::new(Cmd, Bits::Bit8(raw_bits)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(command: CommandSet) -> u8 {
        match Command::from(command).get_data() {
            Bits::Bit8(raw) => raw,
            Bits::Bit4(_) => panic!("expect a full byte"),
        }
    }

    #[test]
    fn display_control_combines_all_flags() {
        let command = CommandSet::DisplayOnOff {
            display: State::On,
            cursor: State::On,
            cursor_blink: State::On,
        };
        assert_eq!(raw(command), 0x0F);

        let command = CommandSet::DisplayOnOff {
            display: State::On,
            cursor: State::Off,
            cursor_blink: State::Off,
        };
        assert_eq!(raw(command), 0x0C);
    }

    #[test]
    fn entry_mode_and_shift_encoding() {
        assert_eq!(
            raw(CommandSet::EntryModeSet(
                MoveDirection::LeftToRight,
                ShiftType::CursorOnly
            )),
            0x06
        );
        assert_eq!(
            raw(CommandSet::EntryModeSet(
                MoveDirection::RightToLeft,
                ShiftType::CursorAndDisplay
            )),
            0x05
        );
        // scroll left / scroll right
        assert_eq!(
            raw(CommandSet::CursorOrDisplayShift(
                ShiftType::CursorAndDisplay,
                MoveDirection::RightToLeft
            )),
            0x18
        );
        assert_eq!(
            raw(CommandSet::CursorOrDisplayShift(
                ShiftType::CursorAndDisplay,
                MoveDirection::LeftToRight
            )),
            0x1C
        );
    }

    #[test]
    fn function_set_is_always_4_bit() {
        assert_eq!(
            raw(CommandSet::FunctionSet(LineMode::TwoLine, Font::Font5x8)),
            0x28
        );
        assert_eq!(
            raw(CommandSet::FunctionSet(LineMode::OneLine, Font::Font5x10)),
            0x24
        );
    }

    #[test]
    fn ram_address_keeps_command_bit() {
        assert_eq!(raw(CommandSet::SetCGRAM(7 << 3)), 0x78);
        assert_eq!(raw(CommandSet::SetDDRAM(0x54 + 19)), 0xE7);
        // address overflow never leaks into the command bits
        assert_eq!(raw(CommandSet::SetDDRAM(0xFF)), 0xFF);
        assert_eq!(raw(CommandSet::SetCGRAM(0xFF)), 0x7F);
    }

    #[test]
    fn data_write_selects_data_register() {
        let command = Command::from(CommandSet::WriteDataToRAM(b'A'));
        assert_eq!(command.get_register_selection(), RegisterSelection::Data);
        assert_eq!(command.get_data(), Bits::Bit8(0x41));

        let command = Command::from(CommandSet::Raw(0x01));
        assert_eq!(command.get_register_selection(), RegisterSelection::Command);
    }

    #[test]
    fn init_nibbles_are_half_commands() {
        assert_eq!(
            Command::from(CommandSet::ResetNibble).get_data(),
            Bits::Bit4(0x3)
        );
        assert_eq!(
            Command::from(CommandSet::HalfFunctionSet).get_data(),
            Bits::Bit4(0x2)
        );
    }
}
