/// Field extraction for 16-bit instruction words.
///
/// The top nibble selects one of 16 instruction families; families 0x0, 0x8,
/// and 0xE refine on the bottom nibble and family 0xF on the bottom byte.
/// The bits that don't participate in selection carry operands:
/// - `nnn` a 12-bit memory address
/// - `kk` an 8-bit immediate
/// - `x` and `y` 4-bit register selectors
/// - `n` a 4-bit immediate (the sprite height for draws)
pub trait Opcode {
    /// All four nibbles, most significant first.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// The register selector in the second nibble.
    /// `[_x__]`
    fn x(&self) -> u8;

    /// The register selector in the third nibble.
    /// `[__y_]`
    fn y(&self) -> u8;

    /// The 4-bit immediate in the last nibble.
    /// `[___n]`
    fn n(&self) -> u8;

    /// The 8-bit immediate in the low byte.
    /// `[__kk]`
    fn kk(&self) -> u8;

    /// The 12-bit address in the low three nibbles.
    /// `[_nnn]`
    fn nnn(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        ((self >> 12) as u8, self.x(), self.y(), self.n())
    }

    fn x(&self) -> u8 {
        ((self & 0x0F00) >> 8) as u8
    }

    fn y(&self) -> u8 {
        ((self & 0x00F0) >> 4) as u8
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn nnn(&self) -> u16 {
        self & 0x0FFF
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nibbles() {
        assert_eq!(0xD123u16.nibbles(), (0xD, 0x1, 0x2, 0x3));
    }

    #[test]
    fn test_register_selectors() {
        assert_eq!(0x8AB4u16.x(), 0xA);
        assert_eq!(0x8AB4u16.y(), 0xB);
    }

    #[test]
    fn test_immediates() {
        assert_eq!(0xDAB7u16.n(), 0x7);
        assert_eq!(0x6ABCu16.kk(), 0xBC);
        assert_eq!(0x2ABCu16.nnn(), 0xABC);
    }
}
