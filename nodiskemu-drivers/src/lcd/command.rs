//! HD44780 instruction set (the subset this driver issues)

/// Clear display and return the cursor home
pub const CLEAR: u8 = 0x01;

/// Return the cursor home without clearing
pub const HOME: u8 = 0x02;

/// Entry mode: increment address, no display shift
pub const ENTRY_MODE_INCREMENT: u8 = 0x06;

/// Display on, cursor off, blink off
pub const DISPLAY_ON_CURSOR_OFF: u8 = 0x0C;

/// Function set: 4-bit bus, 2 lines, 5x7 dots
pub const FUNCTION_SET_4BIT_2LINE: u8 = 0x28;

/// Set display data RAM address (OR in the address)
pub const SET_DDRAM_ADDR: u8 = 0x80;

/// High nibble of the 8-bit function set, sent three times to resync
/// the controller regardless of its current bus width
pub const WAKE_NIBBLE: u8 = 0x03;

/// High nibble of a 4-bit function set, switches the bus width
pub const FOUR_BIT_NIBBLE: u8 = 0x02;
