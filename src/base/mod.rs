//! Foundation types shared by every layer of the analyzer:
//! - [`FileId`] - interned source-file identifiers
//! - [`TextRange`], [`TextSize`] - byte offsets into source text
//! - [`LineCol`], [`LineIndex`] - offset to line/column conversion
//!
//! This module has NO dependencies on other analyzer modules.

mod file_id;
mod span;

pub use file_id::FileId;
pub use span::{LineCol, LineIndex, TextRange, TextSize};

// Re-export text-size for downstream crates
pub use text_size;
