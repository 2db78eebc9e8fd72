pub mod text;

pub use text::TextRenderer;
