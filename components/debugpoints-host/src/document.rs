use std::path::PathBuf;

use crate::LineColumn;

/// An opened text document: path plus full text, with offset↔position
/// conversion.
#[derive(Clone, Debug)]
pub struct Document {
    pub path: PathBuf,
    pub text: String,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Converts a byte offset into a zero-based line/character position.
    /// Offsets past the end of the text clamp to the final position.
    pub fn position_at(&self, offset: usize) -> LineColumn {
        let mut line = 0;
        let mut character = 0;
        for (byte, c) in self.text.char_indices() {
            if byte >= offset {
                break;
            }
            if c == '\n' {
                line += 1;
                character = 0;
            } else {
                character += 1;
            }
        }
        LineColumn::new(line, character)
    }

    /// Converts a position back into a byte offset. Positions past the end
    /// of a line clamp to the line end; lines past the end clamp to the
    /// text end.
    pub fn offset_at(&self, position: LineColumn) -> usize {
        let mut line = 0;
        let mut character = 0;
        for (byte, c) in self.text.char_indices() {
            if line == position.line && character == position.character {
                return byte;
            }
            if c == '\n' {
                if line == position.line {
                    return byte;
                }
                line += 1;
                character = 0;
            } else {
                character += 1;
            }
        }
        self.text.len()
    }
}
