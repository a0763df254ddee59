use std::pin::Pin;
use std::time::SystemTime;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures_core::Stream;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::ident::{self, DocumentId};

/// Stream of bytes for document content
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// One stored document plus its derived metadata.
///
/// Nothing here is cached: every field comes from the filename and a
/// live stat of the file, so a Document is a snapshot of directory
/// state at the moment of the call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: DocumentId,
    pub filename: String,
    pub title: String,
    pub size_bytes: u64,
    pub modified_at: DateTime<Utc>,
}

impl Document {
    /// Build a Document from a directory entry's name and stat data.
    pub(crate) fn from_stat(filename: String, meta: &std::fs::Metadata) -> Self {
        let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        Self {
            id: DocumentId::from_filename(&filename),
            title: ident::title_of(&filename),
            size_bytes: meta.len(),
            modified_at: DateTime::<Utc>::from(modified),
            filename,
        }
    }
}

/// Requested byte range, per the HTTP convention: inclusive start and
/// end, end omitted means "through the last byte".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: Option<u64>,
}

impl ByteRange {
    pub fn new(start: u64, end: Option<u64>) -> Self {
        Self { start, end }
    }

    pub fn from_start(start: u64) -> Self {
        Self { start, end: None }
    }

    /// Check the range against a document size and pin down the end.
    ///
    /// The rule is strict: `0 <= start <= end < total_size`. An end past
    /// the last byte is not clamped, it is unsatisfiable.
    pub fn resolve(&self, total_size: u64) -> Result<ResolvedRange, StoreError> {
        let end = match self.end {
            Some(end) => end,
            None => total_size.saturating_sub(1),
        };
        if total_size == 0 || self.start >= total_size || end < self.start || end >= total_size {
            return Err(StoreError::range_not_satisfiable(self.start, end, total_size));
        }
        Ok(ResolvedRange {
            start: self.start,
            end,
            total_size,
        })
    }
}

/// A validated range: both ends pinned, total size recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRange {
    pub start: u64,
    pub end: u64,
    pub total_size: u64,
}

impl ResolvedRange {
    /// Byte count of the slice, inclusive of both ends.
    pub fn content_length(&self) -> u64 {
        self.end - self.start + 1
    }

    /// True when the slice covers the whole document.
    pub fn is_full_content(&self) -> bool {
        self.start == 0 && self.end == self.total_size.saturating_sub(1)
    }
}

/// What Ingest does when the target filename already holds a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnConflict {
    /// Replace the existing document, last write wins.
    #[default]
    Overwrite,
    /// Fail with `Conflict` and leave the existing document untouched.
    Reject,
    /// Store under the first free `"name (n).ext"` variant.
    Rename,
}

/// An open read on a document: metadata plus the content stream.
pub struct OpenedDocument {
    pub document: Document,
    /// `Some` when a range was requested and validated; the stream then
    /// yields exactly that slice.
    pub range: Option<ResolvedRange>,
    pub stream: ByteStream,
}

impl std::fmt::Debug for OpenedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenedDocument")
            .field("document", &self.document)
            .field("range", &self.range)
            .finish()
    }
}

impl OpenedDocument {
    /// Bytes the stream will yield: the slice length or the whole file.
    pub fn content_length(&self) -> u64 {
        match &self.range {
            Some(range) => range.content_length(),
            None => self.document.size_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_end_defaults_to_the_last_byte() {
        let range = ByteRange::from_start(100).resolve(1000).unwrap();
        assert_eq!((range.start, range.end, range.total_size), (100, 999, 1000));
        assert_eq!(range.content_length(), 900);
    }

    #[test]
    fn full_range_covers_the_whole_document() {
        let range = ByteRange::new(0, Some(999)).resolve(1000).unwrap();
        assert!(range.is_full_content());
        assert_eq!(range.content_length(), 1000);
    }

    #[test]
    fn start_at_size_is_unsatisfiable() {
        assert!(ByteRange::new(1000, Some(1000)).resolve(1000).is_err());
        assert!(ByteRange::from_start(1000).resolve(1000).is_err());
    }

    #[test]
    fn inverted_range_is_unsatisfiable() {
        assert!(ByteRange::new(200, Some(100)).resolve(1000).is_err());
    }

    #[test]
    fn end_past_the_last_byte_is_not_clamped() {
        assert!(ByteRange::new(0, Some(1000)).resolve(1000).is_err());
    }

    #[test]
    fn any_range_on_an_empty_document_is_unsatisfiable() {
        assert!(ByteRange::from_start(0).resolve(0).is_err());
    }

    #[test]
    fn single_byte_range() {
        let range = ByteRange::new(999, Some(999)).resolve(1000).unwrap();
        assert_eq!(range.content_length(), 1);
    }

    #[test]
    fn document_json_is_camel_case() {
        // the serialized shape is part of the HTTP contract
        let doc = Document {
            id: DocumentId::from_filename("a.pdf"),
            filename: "a.pdf".to_string(),
            title: "a".to_string(),
            size_bytes: 42,
            modified_at: Utc::now(),
        };
        let value = serde_json::to_value(&doc).unwrap();
        assert!(value.get("sizeBytes").is_some());
        assert!(value.get("modifiedAt").is_some());
        assert_eq!(value["filename"], "a.pdf");
        assert_eq!(value["id"], crate::ident::encode("a.pdf"));
    }

    #[test]
    fn on_conflict_deserializes_from_lowercase() {
        let mode: OnConflict = serde_json::from_str("\"rename\"").unwrap();
        assert_eq!(mode, OnConflict::Rename);
        assert_eq!(OnConflict::default(), OnConflict::Overwrite);
    }

    #[test]
    fn opened_document_debug_elides_the_stream() {
        let opened = OpenedDocument {
            document: Document {
                id: DocumentId::from_filename("a.pdf"),
                filename: "a.pdf".to_string(),
                title: "a".to_string(),
                size_bytes: 42,
                modified_at: Utc::now(),
            },
            range: None,
            stream: Box::pin(futures_util::stream::iter(
                Vec::<Result<Bytes, std::io::Error>>::new(),
            )),
        };
        let rendered = format!("{opened:?}");
        assert!(rendered.starts_with("OpenedDocument"));
        assert!(rendered.contains("\"a.pdf\""));
        assert!(!rendered.contains("stream"));
    }
}
