/// Error taxonomy for the clock core.
/// Config errors surface before any canvas or font work happens; render
/// errors are fatal since the font is a static embedded resource.
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported format {0}. supported formats: jpeg png")]
    UnsupportedFormat(String),

    #[error("unsupported size {0}. supported sizes: big small")]
    UnsupportedSize(String),

    #[error("unsupported color {0}. supported colors: white red green blue or #rrggbb[aa]")]
    UnsupportedColor(String),

    #[error("invalid interval {0}. expected a duration like 500ms, 2s or 1m")]
    InvalidInterval(String),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to parse embedded font")]
    FontParse,

    #[error("invalid canvas dimensions {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },
}
