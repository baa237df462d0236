//! Shared building blocks for the TUI slices.

pub mod task;
pub mod text;
pub mod text_field;

pub use task::{Generation, GenerationSeq};
pub use text_field::TextField;
