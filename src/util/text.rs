//! Offset conversions between regex byte offsets and buffer character offsets

/// Maps byte offsets within one string to character offsets.
///
/// ASCII text maps 1:1 and allocates nothing.
#[derive(Debug, Clone)]
pub struct CharIndex {
    /// Byte offset of every char boundary; None for pure ASCII
    boundaries: Option<Vec<usize>>,
    byte_len: usize,
}

impl CharIndex {
    pub fn new(text: &str) -> Self {
        let boundaries = if text.is_ascii() {
            None
        } else {
            Some(text.char_indices().map(|(b, _)| b).collect())
        };
        Self {
            boundaries,
            byte_len: text.len(),
        }
    }

    /// Character offset of a byte offset that lies on a char boundary.
    /// Offsets past the end map to the total char count.
    pub fn char_offset(&self, byte: usize) -> usize {
        match &self.boundaries {
            None => byte.min(self.byte_len),
            Some(boundaries) => {
                if byte >= self.byte_len {
                    return boundaries.len();
                }
                match boundaries.binary_search(&byte) {
                    Ok(i) => i,
                    // Inside a multi-byte char: round down to its start
                    Err(i) => i.saturating_sub(1),
                }
            }
        }
    }

    /// Total number of characters
    pub fn char_len(&self) -> usize {
        match &self.boundaries {
            None => self.byte_len,
            Some(boundaries) => boundaries.len(),
        }
    }
}

/// Substring by character range; out-of-range bounds are clamped and an
/// inverted or empty range yields `""`.
pub fn char_slice(text: &str, start: usize, end: usize) -> &str {
    if start >= end {
        return "";
    }
    let mut indices = text.char_indices().map(|(b, _)| b).chain(std::iter::once(text.len()));
    let Some(start_byte) = indices.nth(start) else {
        return "";
    };
    let end_byte = indices.nth(end - start - 1).unwrap_or(text.len());
    &text[start_byte..end_byte]
}
