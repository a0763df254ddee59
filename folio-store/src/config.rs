use std::path::PathBuf;

/// Media type every stored document is served as.
pub const MEDIA_TYPE_PDF: &str = "application/pdf";

/// Default cap on a single document's size: 800 MiB.
pub const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 800 * 1024 * 1024;

/// Default granularity for streaming reads off disk.
pub const DEFAULT_READ_CHUNK_BYTES: usize = 64 * 1024;

/// Configuration for a document store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding every document as one flat file.
    pub root: PathBuf,

    /// Hard cap on a single document's size; ingest aborts past it.
    pub max_document_bytes: u64,

    /// Read size per step when streaming content off disk.
    pub read_chunk_bytes: usize,
}

impl StoreConfig {
    /// Config for a root directory, with defaults for everything else.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
            read_chunk_bytes: DEFAULT_READ_CHUNK_BYTES,
        }
    }

    /// Set the document size cap
    pub fn with_max_document_bytes(mut self, bytes: u64) -> Self {
        self.max_document_bytes = bytes;
        self
    }

    /// Set the streaming read granularity
    pub fn with_read_chunk_bytes(mut self, bytes: usize) -> Self {
        self.read_chunk_bytes = bytes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cap_is_800_mib() {
        assert_eq!(DEFAULT_MAX_DOCUMENT_BYTES, 838_860_800);
        assert_eq!(
            StoreConfig::new("x").max_document_bytes,
            DEFAULT_MAX_DOCUMENT_BYTES
        );
    }
}
