pub mod drawer;
pub mod output;
