/// Clock configuration: output format, size tier, text color and the
/// interval between frames. All string parsing from the CLI lands here so
/// invalid input fails with a ConfigError before any font or canvas work.
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// Base canvas resolution, scaled by the tier multiplier.
pub const BASE_WIDTH: u32 = 2560;
pub const BASE_HEIGHT: u32 = 1440;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    /// File extension for generated frames, dot included.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => ".jpg",
            ImageFormat::Png => ".png",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Png => "png",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(ImageFormat::Jpeg),
            "png" => Ok(ImageFormat::Png),
            _ => Err(ConfigError::UnsupportedFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    Small,
    Big,
}

impl SizeTier {
    pub fn as_str(self) -> &'static str {
        match self {
            SizeTier::Small => "small",
            SizeTier::Big => "big",
        }
    }
}

impl FromStr for SizeTier {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "small" => Ok(SizeTier::Small),
            "big" => Ok(SizeTier::Big),
            _ => Err(ConfigError::UnsupportedSize(s.to_string())),
        }
    }
}

/// Resolution multiplier for a (format, tier) pair. Big JPEG frames use 3x
/// and big PNG frames 8x, keeping JPEG output sizes manageable while PNG
/// stresses the ingest path with very large frames.
pub fn multiplier(format: ImageFormat, size: SizeTier) -> u32 {
    match (format, size) {
        (_, SizeTier::Small) => 1,
        (ImageFormat::Jpeg, SizeTier::Big) => 3,
        (ImageFormat::Png, SizeTier::Big) => 8,
    }
}

/// Canvas dimensions for a (format, tier) pair.
pub fn canvas_size(format: ImageFormat, size: SizeTier) -> (u32, u32) {
    let m = multiplier(format, size);
    (BASE_WIDTH * m, BASE_HEIGHT * m)
}

/// Straight (non-premultiplied) RGBA text color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Parse a color name or "#rrggbb[aa]" hex string.
pub fn parse_color(color: &str) -> Result<Rgba, ConfigError> {
    match color.to_lowercase().as_str() {
        "white" => return Ok(Rgba::new(255, 255, 255, 255)),
        "red" => return Ok(Rgba::new(255, 0, 0, 255)),
        "green" => return Ok(Rgba::new(0, 255, 0, 255)),
        "blue" => return Ok(Rgba::new(0, 0, 255, 255)),
        _ => {}
    }

    let s = color.trim_start_matches('#');
    if color.starts_with('#') && s.is_ascii() && (s.len() == 6 || s.len() == 8) {
        let err = || ConfigError::UnsupportedColor(color.to_string());
        let r = u8::from_str_radix(&s[0..2], 16).map_err(|_| err())?;
        let g = u8::from_str_radix(&s[2..4], 16).map_err(|_| err())?;
        let b = u8::from_str_radix(&s[4..6], 16).map_err(|_| err())?;
        let a = if s.len() == 8 {
            u8::from_str_radix(&s[6..8], 16).map_err(|_| err())?
        } else {
            255
        };
        return Ok(Rgba::new(r, g, b, a));
    }

    Err(ConfigError::UnsupportedColor(color.to_string()))
}

/// Parse a duration like "500ms", "2s" or "1m".
pub fn parse_interval(s: &str) -> Result<Duration, ConfigError> {
    let err = || ConfigError::InvalidInterval(s.to_string());
    let trimmed = s.trim();

    let (value, unit) = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .map(|i| trimmed.split_at(i))
        .ok_or_else(err)?;

    let n: u64 = value.parse().map_err(|_| err())?;
    let dur = match unit {
        "ms" => Duration::from_millis(n),
        "s" => Duration::from_secs(n),
        "m" => Duration::from_secs(n.checked_mul(60).ok_or_else(err)?),
        "h" => Duration::from_secs(n.checked_mul(3600).ok_or_else(err)?),
        _ => return Err(err()),
    };

    if dur.is_zero() {
        return Err(err());
    }
    Ok(dur)
}
