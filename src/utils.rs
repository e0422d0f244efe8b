//! Common tools

use crate::command::State;

/// Simple bit ops on a register-sized value
pub trait BitOps {
    /// Set bit at `pos` to 1
    fn set_bit(&mut self, pos: u8) -> Self;
    /// Clear bit at `pos` to 0
    fn clear_bit(&mut self, pos: u8) -> Self;
    /// Set or clear bit at `pos`, following `state`
    fn put_bit(&mut self, pos: u8, state: State) -> Self;
    /// Whether bit at `pos` is 1
    fn check_bit(&self, pos: u8) -> bool;
}

impl BitOps for u8 {
    fn set_bit(&mut self, pos: u8) -> Self {
        *self |= 1u8 << (pos & 0b111);
        *self
    }

    fn clear_bit(&mut self, pos: u8) -> Self {
        *self &= !(1u8 << (pos & 0b111));
        *self
    }

    fn put_bit(&mut self, pos: u8, state: State) -> Self {
        match state {
            State::On => self.set_bit(pos),
            State::Off => self.clear_bit(pos),
        }
    }

    fn check_bit(&self, pos: u8) -> bool {
        (*self >> (pos & 0b111)) & 1 == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_bit_follows_state() {
        let mut raw = 0b0000_1000u8;
        raw.put_bit(2, State::On);
        assert_eq!(raw, 0b0000_1100);
        raw.put_bit(3, State::Off);
        assert_eq!(raw, 0b0000_0100);
        assert!(raw.check_bit(2));
        assert!(!raw.check_bit(3));
    }
}
