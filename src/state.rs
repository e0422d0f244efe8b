use crate::command::{Font, LineMode, MoveDirection, RAMType, ShiftType, State};

/// DDRAM address of the first cell of each row
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// Mirror of the controller registers
///
/// The controller cannot be read back on this path, every toggle is a
/// read-modify-write of these fields followed by a full command.
pub(crate) struct LcdState {
    columns: u8,
    rows: u8,
    font: Font,
    display_on: State,
    cursor_on: State,
    cursor_blink: State,
    direction: MoveDirection,
    shift_type: ShiftType,
    ram_type: RAMType,
}

impl Default for LcdState {
    fn default() -> Self {
        Self {
            columns: 16,
            rows: 2,
            font: Font::Font5x8,
            display_on: State::On,
            cursor_on: State::Off,
            cursor_blink: State::Off,
            direction: MoveDirection::LeftToRight,
            shift_type: ShiftType::CursorOnly,
            ram_type: RAMType::DDRam,
        }
    }
}

impl LcdState {
    pub(crate) fn get_columns(&self) -> u8 {
        self.columns
    }

    pub(crate) fn set_columns(&mut self, columns: u8) {
        self.columns = columns;
    }

    pub(crate) fn get_rows(&self) -> u8 {
        self.rows
    }

    /// rows outside 1..=4 are clamped, the row table has 4 entries
    pub(crate) fn set_rows(&mut self, rows: u8) {
        self.rows = rows.clamp(1, ROW_OFFSETS.len() as u8);
    }

    pub(crate) fn get_line_mode(&self) -> LineMode {
        match self.rows {
            1 => LineMode::OneLine,
            _ => LineMode::TwoLine,
        }
    }

    /// 5x10 is only kept on a single row display
    pub(crate) fn get_font(&self) -> Font {
        match self.get_line_mode() {
            LineMode::OneLine => self.font,
            LineMode::TwoLine => Font::Font5x8,
        }
    }

    pub(crate) fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    pub(crate) fn get_display_state(&self) -> State {
        self.display_on
    }

    pub(crate) fn set_display_state(&mut self, display: State) {
        self.display_on = display;
    }

    pub(crate) fn get_cursor_state(&self) -> State {
        self.cursor_on
    }

    pub(crate) fn set_cursor_state(&mut self, cursor: State) {
        self.cursor_on = cursor;
    }

    pub(crate) fn get_cursor_blink(&self) -> State {
        self.cursor_blink
    }

    pub(crate) fn set_cursor_blink(&mut self, blink: State) {
        self.cursor_blink = blink;
    }

    pub(crate) fn get_direction(&self) -> MoveDirection {
        self.direction
    }

    pub(crate) fn set_direction(&mut self, dir: MoveDirection) {
        self.direction = dir;
    }

    pub(crate) fn get_shift_type(&self) -> ShiftType {
        self.shift_type
    }

    pub(crate) fn set_shift_type(&mut self, shift: ShiftType) {
        self.shift_type = shift;
    }

    pub(crate) fn get_ram_type(&self) -> RAMType {
        self.ram_type
    }

    pub(crate) fn set_ram_type(&mut self, ram_type: RAMType) {
        self.ram_type = ram_type;
    }

    /// DDRAM address of `(col, row)`
    ///
    /// A row past the last one is clamped to the last row, `col` is not checked,
    /// overflow wraps the same way the controller's address counter does.
    pub(crate) fn ddram_addr(&self, pos: (u8, u8)) -> u8 {
        let row = pos.1.min(self.rows - 1) as usize;
        pos.0.wrapping_add(ROW_OFFSETS[row])
    }
}
