#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColourMapKind {
    #[default]
    BitPlane,
    FireGradient,
}

impl ColourMapKind {
    pub const ALL: &'static [Self] = &[Self::BitPlane, Self::FireGradient];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::BitPlane => "Bit-plane palette",
            Self::FireGradient => "Fire gradient",
        }
    }
}

impl std::fmt::Display for ColourMapKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).display_name())
    }
}

impl std::str::FromStr for ColourMapKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bit-plane" | "bitplane" => Ok(Self::BitPlane),
            "fire" | "fire-gradient" => Ok(Self::FireGradient),
            other => Err(format!("unknown colour map `{other}` (expected bit-plane or fire)")),
        }
    }
}
