use serde::{Deserialize, Serialize};

use crate::FontStyle;

/// A contiguous text segment with one uniform style.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TextChunk {
    pub style: FontStyle,
    pub text: String,
}

/// Styled (multi-run) text as produced by the styled text assembler.
///
/// Chunks are non-overlapping, cover the full decoded string, and are ordered
/// by reading position (which is not necessarily the order the style runs
/// appeared in the source payload).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StyledText {
    pub chunks: Vec<TextChunk>,
}

impl StyledText {
    pub fn from_chunks(chunks: Vec<TextChunk>) -> Self {
        Self { chunks }
    }

    /// The text content with all styling dropped.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for chunk in &self.chunks {
            out.push_str(&chunk.text);
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.iter().all(|c| c.text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_concatenates_chunks_in_order() {
        let text = StyledText::from_chunks(vec![
            TextChunk {
                style: FontStyle::default(),
                text: "Hi ".to_string(),
            },
            TextChunk {
                style: FontStyle {
                    face: crate::FACE_BOLD,
                    ..Default::default()
                },
                text: "there".to_string(),
            },
        ]);
        assert_eq!(text.plain_text(), "Hi there");
        assert!(!text.is_empty());
    }
}
