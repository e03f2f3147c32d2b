//! RGB888 to RGB565 packing

/// Packs 8-bit channels into 5/6/5 bits by truncation.
#[inline]
pub fn pack(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3)
}

/// Splits a packed value back into its 5-bit red, 6-bit green and 5-bit blue fields.
#[inline]
pub fn unpack(packed: u16) -> (u8, u8, u8) {
    (
        ((packed >> 11) & 0x1F) as u8,
        ((packed >> 5) & 0x3F) as u8,
        (packed & 0x1F) as u8,
    )
}
