//! Boss HP bands.
//!
//! A tier is a display choice derived from HP on demand. It is never stored
//! in game state.

/// RGB triple as sent to the device.
pub type Rgb = [u8; 3];

/// Boss HP as a coarse band of max HP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HpTier {
    /// More than two thirds of max HP.
    Full,
    /// More than one third of max HP.
    Wounded,
    /// Above zero.
    Critical,
    /// Zero HP.
    Defeated,
}

impl HpTier {
    /// Band for `hp` out of `max_hp`.
    pub fn from_hp(hp: u32, max_hp: u32) -> Self {
        if hp == 0 || max_hp == 0 {
            return Self::Defeated;
        }
        let percent = u64::from(hp)
            .saturating_mul(100)
            .checked_div(u64::from(max_hp))
            .unwrap_or(0);
        match percent {
            67.. => Self::Full,
            34..=66 => Self::Wounded,
            _ => Self::Critical,
        }
    }

    /// Colour of occupied holders in this band.
    pub const fn filled_color(self) -> Rgb {
        match self {
            Self::Full => [0, 160, 255],
            Self::Wounded => [255, 160, 0],
            Self::Critical => [255, 32, 0],
            Self::Defeated => [255, 255, 255],
        }
    }

    /// Master brightness for the ambient command.
    pub const fn brightness(self) -> u8 {
        match self {
            Self::Full => 128,
            Self::Wounded => 160,
            Self::Critical => 220,
            Self::Defeated => 255,
        }
    }
}
