use crate::error::Chip8Error;

/// The number of keys on the CHIP-8 hex keypad.
const NUMBER_OF_KEYS: u8 = 16;

/// An abstraction of the state of each key on the CHIP-8 keypad (pressed / not pressed).
#[derive(Clone)]
pub(crate) struct KeyState {
    keys_pressed: [bool; NUMBER_OF_KEYS as usize],
}

impl KeyState {
    /// Constructor that returns a [KeyState] instance with no keys pressed.
    pub(crate) fn new() -> Self {
        KeyState {
            keys_pressed: [false; NUMBER_OF_KEYS as usize],
        }
    }

    /// Returns whether the specified key is pressed. Returns
    /// [Chip8Error::IndexOutOfRange] if `key` is outside `[0, 15]`.
    pub(crate) fn is_key_pressed(&self, key: u8) -> Result<bool, Chip8Error> {
        self.keys_pressed
            .get(key as usize)
            .copied()
            .ok_or(Chip8Error::IndexOutOfRange { index: key })
    }

    /// Sets the pressed/not-pressed state of the specified key. Returns
    /// [Chip8Error::IndexOutOfRange] if `key` is outside `[0, 15]`.
    pub(crate) fn set_key_status(&mut self, key: u8, down: bool) -> Result<(), Chip8Error> {
        let slot = self
            .keys_pressed
            .get_mut(key as usize)
            .ok_or(Chip8Error::IndexOutOfRange { index: key })?;
        *slot = down;
        Ok(())
    }

    /// Returns the lowest-indexed currently-held key, or `None` if no key is held.
    /// Used by `FX0A` to pick a key once any key is pressed.
    pub(crate) fn lowest_held_key(&self) -> Option<u8> {
        self.keys_pressed
            .iter()
            .position(|&pressed| pressed)
            .map(|index| index as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_key_pressed_yes() {
        let mut keys = KeyState::new();
        keys.set_key_status(0x2, true).unwrap();
        assert!(keys.is_key_pressed(0x2).unwrap());
    }

    #[test]
    fn test_is_key_pressed_no() {
        let keys = KeyState::new();
        assert!(!keys.is_key_pressed(0x2).unwrap());
    }

    #[test]
    fn test_is_key_pressed_out_of_range_error() {
        let keys = KeyState::new();
        assert_eq!(
            keys.is_key_pressed(NUMBER_OF_KEYS).unwrap_err(),
            Chip8Error::IndexOutOfRange { index: NUMBER_OF_KEYS }
        );
    }

    #[test]
    fn test_set_key_status_out_of_range_error() {
        let mut keys = KeyState::new();
        assert_eq!(
            keys.set_key_status(NUMBER_OF_KEYS, true).unwrap_err(),
            Chip8Error::IndexOutOfRange { index: NUMBER_OF_KEYS }
        );
    }

    #[test]
    fn test_lowest_held_key_picks_smallest_index() {
        let mut keys = KeyState::new();
        keys.set_key_status(0x7, true).unwrap();
        keys.set_key_status(0x2, true).unwrap();
        keys.set_key_status(0xF, true).unwrap();
        assert_eq!(keys.lowest_held_key(), Some(0x2));
    }

    #[test]
    fn test_lowest_held_key_none_when_nothing_pressed() {
        let keys = KeyState::new();
        assert_eq!(keys.lowest_held_key(), None);
    }
}
