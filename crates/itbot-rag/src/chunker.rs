//! Fixed-size overlapping text chunker

use itbot_core::{Error, Result};

/// Splits text into windows of `chunk_size` characters, each sharing its
/// first `chunk_overlap` characters with the end of the previous window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Chunker {
    /// Create a chunker; the overlap must be smaller than the chunk size.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::Configuration("chunk size must be positive".to_string()));
        }
        if chunk_overlap >= chunk_size {
            return Err(Error::Configuration(format!(
                "chunk overlap ({}) must be smaller than chunk size ({})",
                chunk_overlap, chunk_size
            )));
        }

        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Split `content` into chunks. Lengths are counted in characters, so a
    /// multi-byte character is never cut in half.
    pub fn split(&self, content: &str) -> Vec<String> {
        let chars: Vec<char> = content.chars().collect();
        let mut chunks = Vec::new();
        let mut start = 0;

        while start < chars.len() {
            let end = (start + self.chunk_size).min(chars.len());
            chunks.push(chars[start..end].iter().collect());

            if end >= chars.len() {
                break;
            }

            start = end - self.chunk_overlap;
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(len: usize) -> String {
        "abcdefghijklmnopqrstuvwxyz0123456789 "
            .chars()
            .cycle()
            .take(len)
            .collect()
    }

    fn reconstruct(chunks: &[String], overlap: usize) -> String {
        let mut text = String::new();
        for (i, chunk) in chunks.iter().enumerate() {
            let skip = if i == 0 { 0 } else { overlap };
            text.extend(chunk.chars().skip(skip));
        }
        text
    }

    #[test]
    fn test_rejects_invalid_sizes() {
        assert!(Chunker::new(0, 0).is_err());
        assert!(Chunker::new(10, 10).is_err());
        assert!(Chunker::new(10, 12).is_err());
        assert!(Chunker::new(10, 9).is_ok());
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let chunker = Chunker::new(100, 4).unwrap();
        let text = "Routers forward packets.";
        assert_eq!(chunker.split(text), vec![text.to_string()]);
    }

    #[test]
    fn test_exact_chunk_size_is_single_chunk() {
        let chunker = Chunker::new(100, 4).unwrap();
        let text = corpus(100);
        assert_eq!(chunker.split(&text), vec![text]);
    }

    #[test]
    fn test_empty_text_has_no_chunks() {
        let chunker = Chunker::new(100, 4).unwrap();
        assert!(chunker.split("").is_empty());
    }

    #[test]
    fn test_chunk_count_and_reconstruction() {
        let chunker = Chunker::new(100, 4).unwrap();

        for len in [100, 101, 196, 197, 250, 1000, 4321] {
            let text = corpus(len);
            let chunks = chunker.split(&text);

            let expected = (len - 4).div_ceil(100 - 4);
            assert_eq!(chunks.len(), expected, "length {}", len);
            assert!(chunks.iter().all(|c| c.chars().count() <= 100));
            assert_eq!(reconstruct(&chunks, 4), text, "length {}", len);
        }
    }

    #[test]
    fn test_consecutive_chunks_share_overlap() {
        let chunker = Chunker::new(10, 3).unwrap();
        let chunks = chunker.split("0123456789abcdefghij");

        assert_eq!(chunks, vec!["0123456789", "789abcdefg", "efghij"]);
        for pair in chunks.windows(2) {
            let tail: String = pair[0].chars().skip(pair[0].chars().count() - 3).collect();
            assert!(pair[1].starts_with(&tail));
        }
    }

    #[test]
    fn test_multibyte_characters_are_not_split() {
        let chunker = Chunker::new(4, 1).unwrap();
        let chunks = chunker.split("héllo wörld");
        assert_eq!(chunks, vec!["héll", "lo w", "wörl", "ld"]);
    }
}
