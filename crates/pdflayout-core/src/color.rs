/// RGBA color packed into a single integer as `R<<24 | G<<16 | B<<8 | A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba(pub u32);

impl Rgba {
    /// Fully transparent black, used by shapes without a real fill or stroke.
    pub const NONE: Rgba = Rgba(0);

    /// Pack 8-bit channels. Channel values above 255 are truncated to their low byte.
    pub fn from_channels(r: u32, g: u32, b: u32, a: u32) -> Self {
        Rgba((r & 0xff) << 24 | (g & 0xff) << 16 | (b & 0xff) << 8 | (a & 0xff))
    }

    pub fn r(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn g(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn b(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn a(&self) -> u8 {
        self.0 as u8
    }

    pub fn packed(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:08x}", self.0)
    }
}
