#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };

    /// Packs the colour as an opaque RGBA quadruple.
    #[must_use]
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_rgba_is_opaque() {
        let colour = Colour { r: 10, g: 20, b: 30 };

        assert_eq!(colour.to_rgba(), [10, 20, 30, 255]);
    }

    #[test]
    fn test_black_constant() {
        assert_eq!(Colour::BLACK.to_rgba(), [0, 0, 0, 255]);
    }
}
