//! Hex dump formatting
//!
//! One dump line covers 16 bytes:
//!
//! ```text
//! 0010| 48 65 6C 6C 6F 0D 0A                         |Hello..         |
//! ```
//!
//! - offset as four uppercase hex digits, then `|` and a space
//! - 16 hex columns, each followed by a space (blank past the data)
//! - `|`, 16 ASCII columns (`.` for non-printable, blank past the data), `|`
//! - CRLF

use heapless::Vec;

/// Bytes shown per dump line
pub const BYTES_PER_LINE: usize = 16;

/// Length of one formatted line including CRLF
pub const TRACE_LINE_LEN: usize = 4 + 2 + BYTES_PER_LINE * 3 + 1 + BYTES_PER_LINE + 1 + 2;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Two uppercase hex digits for `value`, high nibble first
pub const fn hex_digits(value: u8) -> [u8; 2] {
    [
        HEX_DIGITS[(value >> 4) as usize],
        HEX_DIGITS[(value & 0x0F) as usize],
    ]
}

/// `byte` if it is printable ASCII, `.` otherwise
pub const fn printable(byte: u8) -> u8 {
    if byte < 0x20 || byte > 0x7E {
        b'.'
    } else {
        byte
    }
}

/// Format one dump line for up to 16 bytes starting at `offset`
///
/// Bytes beyond the first 16 of `chunk` are ignored.
pub fn format_trace_line(offset: u16, chunk: &[u8]) -> Vec<u8, TRACE_LINE_LEN> {
    let chunk = &chunk[..chunk.len().min(BYTES_PER_LINE)];
    let mut line = Vec::new();

    // Capacity is exact, so none of these pushes can fail
    let mut put = |byte: u8| {
        let _ = line.push(byte);
    };

    let [hi, lo] = offset.to_be_bytes();
    for digit in hex_digits(hi).into_iter().chain(hex_digits(lo)) {
        put(digit);
    }
    put(b'|');
    put(b' ');

    for column in 0..BYTES_PER_LINE {
        match chunk.get(column) {
            Some(&byte) => {
                let [h, l] = hex_digits(byte);
                put(h);
                put(l);
            }
            None => {
                put(b' ');
                put(b' ');
            }
        }
        put(b' ');
    }

    put(b'|');
    for column in 0..BYTES_PER_LINE {
        put(chunk.get(column).map_or(b' ', |&byte| printable(byte)));
    }
    put(b'|');
    put(b'\r');
    put(b'\n');

    line
}

/// Iterate over the dump lines for `buffer[start..start + len]`
///
/// `len` is clamped to the bytes available after `start`. Offsets are
/// labelled from `start` and wrap at 16 bits.
pub fn trace_lines(
    buffer: &[u8],
    start: u16,
    len: u16,
) -> impl Iterator<Item = Vec<u8, TRACE_LINE_LEN>> + '_ {
    let begin = (start as usize).min(buffer.len());
    let end = begin.saturating_add(len as usize).min(buffer.len());
    buffer[begin..end]
        .chunks(BYTES_PER_LINE)
        .enumerate()
        .map(move |(index, chunk)| {
            let offset = start.wrapping_add((index * BYTES_PER_LINE) as u16);
            format_trace_line(offset, chunk)
        })
}
