//! IBUS frame checksum.
//!
//! IBUS uses an additive complement rather than a CRC: the checksum is
//! `0xFFFF` minus the 16-bit wrapping sum of every byte that precedes the
//! checksum field in the frame.

/// Calculate the checksum of a byte slice.
#[inline]
#[must_use]
pub fn calculate_checksum(data: &[u8]) -> u16 {
    let mut checksum = Checksum::new();
    checksum.update_slice(data);
    checksum.value()
}

/// Running checksum for incremental calculation.
///
/// Use this when building a frame byte-by-byte.
pub struct Checksum {
    value: u16,
}

impl Checksum {
    /// Start a new checksum at the `0xFFFF` seed.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { value: 0xFFFF }
    }

    /// Fold a single byte into the checksum.
    #[inline]
    pub fn update(&mut self, byte: u8) {
        self.value = self.value.wrapping_sub(u16::from(byte));
    }

    /// Fold a byte slice into the checksum.
    #[inline]
    pub fn update_slice(&mut self, data: &[u8]) {
        for &b in data {
            self.update(b);
        }
    }

    /// The current checksum value.
    #[inline]
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.value
    }
}

impl Default for Checksum {
    fn default() -> Self {
        Self::new()
    }
}
