//! Display geometry and line address tables

/// Character layout of a display module
///
/// `line_addresses` maps each visible line to its display RAM start
/// address. Only the first `lines` entries are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LcdGeometry {
    /// Characters per line
    pub columns: u8,
    /// Visible lines (1-4)
    pub lines: u8,
    /// Display RAM address of the first character of each line
    pub line_addresses: [u8; 4],
}

impl LcdGeometry {
    /// 16 columns, 2 lines
    pub const CHARS_16X2: Self = Self::new(16, 2, [0x00, 0x40, 0x10, 0x50]);

    /// 20 columns, 2 lines
    pub const CHARS_20X2: Self = Self::new(20, 2, [0x00, 0x40, 0x14, 0x54]);

    /// 20 columns, 4 lines
    pub const CHARS_20X4: Self = Self::new(20, 4, [0x00, 0x40, 0x14, 0x54]);

    /// Create a geometry
    pub const fn new(columns: u8, lines: u8, line_addresses: [u8; 4]) -> Self {
        Self {
            columns,
            lines,
            line_addresses,
        }
    }

    /// Display RAM address of `line`, 0 for lines outside the table
    pub fn line_address(&self, line: u8) -> u8 {
        self.line_addresses
            .get(line as usize)
            .copied()
            .unwrap_or(0)
    }
}

impl Default for LcdGeometry {
    fn default() -> Self {
        Self::CHARS_20X4
    }
}
