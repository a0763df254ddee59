use std::collections::HashMap;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::Mutex as StdMutex;

use bytes::Bytes;
use futures_core::Stream;
use futures_util::StreamExt;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tokio::sync::Mutex as AsyncMutex;
use tokio_util::io::ReaderStream;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::ident::{self, DocumentId};
use crate::types::{ByteRange, ByteStream, Document, OnConflict, OpenedDocument};

/// CRUD plus byte-range reads over a single flat directory of PDF files.
///
/// The directory is the index: existence, identity, and metadata derive
/// live from the filesystem on every call, so there is no cache to
/// invalidate and nothing to rebuild after a restart. Listing costs one
/// stat per file, which is fine for a personal-scale library and not
/// meant to scale past a few thousand documents.
#[derive(Debug)]
pub struct DocumentStore {
    config: StoreConfig,
    /// Canonical form of `config.root`; the containment boundary for
    /// every resolved path.
    root: PathBuf,
    /// Ingest and delete serialize per filename on these. Entries are
    /// never removed; the registry is bounded by the number of distinct
    /// names ever written.
    write_locks: StdMutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl DocumentStore {
    /// Open a store over an existing root directory.
    ///
    /// The root must already exist. It is canonicalized once here and
    /// every later path check happens against that canonical form.
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        let root = config.root.canonicalize().map_err(StoreError::unavailable)?;
        Ok(Self {
            config,
            root,
            write_locks: StdMutex::new(HashMap::new()),
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Every `*.pdf` file in the root, one Document each, in the order
    /// the filesystem enumerates them. Dotfiles (ingest staging files
    /// among them), subdirectories, and non-UTF-8 names are skipped. An
    /// entry that vanishes between enumeration and stat is skipped too:
    /// the listing reflects files that existed at some instant during
    /// the call.
    pub async fn list(&self) -> StoreResult<Vec<Document>> {
        let mut entries = fs::read_dir(&self.root)
            .await
            .map_err(StoreError::unavailable)?;
        let mut documents = Vec::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(err) => return Err(StoreError::unavailable(err)),
            };
            let filename = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(_) => continue,
            };
            if filename.starts_with('.') || !ident::has_pdf_extension(&filename) {
                continue;
            }
            let meta = match entry.metadata().await {
                Ok(meta) => meta,
                Err(err) => {
                    debug!("Skipping {} during list: {}", filename, err);
                    continue;
                }
            };
            if !meta.is_file() {
                continue;
            }
            documents.push(Document::from_stat(filename, &meta));
        }
        Ok(documents)
    }

    /// Stream a document body into the store.
    ///
    /// The body goes into a staging file next to the target and is
    /// renamed over it only once it has arrived whole and under the size
    /// cap, so readers never observe a partial document and a failed
    /// ingest leaves nothing behind. The returned Document describes the
    /// final name, which under [`OnConflict::Rename`] can differ from
    /// the supplied one.
    pub async fn ingest<S>(
        &self,
        filename: &str,
        body: S,
        on_conflict: OnConflict,
    ) -> StoreResult<Document>
    where
        S: Stream<Item = Result<Bytes, std::io::Error>> + Send,
    {
        let filename = ident::repair_legacy_encoding(filename);
        if !ident::is_clean_entry_name(&filename) {
            return Err(StoreError::invalid_filename(filename));
        }
        if !ident::has_pdf_extension(&filename) {
            return Err(StoreError::unsupported_media_type(filename));
        }

        let lock = self.write_lock_for(&filename);
        let _guard = lock.lock().await;

        let target_name = match on_conflict {
            OnConflict::Overwrite => filename.clone(),
            OnConflict::Reject => {
                if fs::try_exists(self.root.join(&filename)).await? {
                    return Err(StoreError::conflict(filename));
                }
                filename.clone()
            }
            OnConflict::Rename => self.first_free_variant(&filename).await?,
        };

        let staging = self.root.join(format!(".{}.part", Uuid::new_v4().simple()));
        let size = match self.spool(&staging, body).await {
            Ok(size) => size,
            Err(err) => {
                self.discard_staging(&staging).await;
                return Err(err);
            }
        };

        let target = self.root.join(&target_name);
        if let Err(err) = fs::rename(&staging, &target).await {
            self.discard_staging(&staging).await;
            return Err(err.into());
        }

        let meta = fs::metadata(&target).await?;
        info!("Ingested {} ({} bytes)", target_name, size);
        Ok(Document::from_stat(target_name, &meta))
    }

    /// Metadata for one document, straight from a stat call.
    ///
    /// The existence check and the stat are not atomic with concurrent
    /// deletes; a success means the file existed at some instant during
    /// the call.
    pub async fn metadata(&self, id: &DocumentId) -> StoreResult<Document> {
        let (filename, path) = self.resolve_existing(id).await?;
        let meta = match fs::metadata(&path).await {
            Ok(meta) => meta,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::not_found(id.as_str()));
            }
            Err(err) => return Err(err.into()),
        };
        Ok(Document::from_stat(filename, &meta))
    }

    /// Open a document's content for reading, optionally a byte range.
    ///
    /// Content is produced incrementally off disk in `read_chunk_bytes`
    /// steps; the file is never buffered whole. Dropping the stream
    /// closes the file. An I/O failure after the first chunk surfaces as
    /// an error item on the stream, since by then response framing is
    /// usually already on the wire.
    pub async fn open(
        &self,
        id: &DocumentId,
        range: Option<ByteRange>,
    ) -> StoreResult<OpenedDocument> {
        let (filename, path) = self.resolve_existing(id).await?;
        let meta = match fs::metadata(&path).await {
            Ok(meta) => meta,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::not_found(id.as_str()));
            }
            Err(err) => return Err(err.into()),
        };
        let document = Document::from_stat(filename, &meta);

        let resolved = match range {
            Some(range) => Some(range.resolve(document.size_bytes)?),
            None => None,
        };

        let mut file = match fs::File::open(&path).await {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::not_found(id.as_str()));
            }
            Err(err) => return Err(err.into()),
        };

        let chunk = self.config.read_chunk_bytes;
        let stream = match resolved {
            Some(range) => {
                file.seek(SeekFrom::Start(range.start)).await?;
                let slice = file.take(range.content_length());
                watched(ReaderStream::with_capacity(slice, chunk), document.id.clone())
            }
            None => watched(ReaderStream::with_capacity(file, chunk), document.id.clone()),
        };

        Ok(OpenedDocument {
            document,
            range: resolved,
            stream,
        })
    }

    /// Remove a document. A second delete of the same identifier reports
    /// `NotFound`, never a silent success: callers can tell "deleted"
    /// apart from "was never there".
    pub async fn delete(&self, id: &DocumentId) -> StoreResult<()> {
        let (filename, path) = self.resolve_existing(id).await?;
        let lock = self.write_lock_for(&filename);
        let _guard = lock.lock().await;
        match fs::remove_file(&path).await {
            Ok(()) => {
                info!("Deleted {}", filename);
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::not_found(id.as_str()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Decode an identifier and resolve it to an existing file inside
    /// the root. Everything else reports the document as absent: foreign
    /// identifiers, names with path separators, canonicalization
    /// failures, escapes from the root, plain missing files.
    async fn resolve_existing(&self, id: &DocumentId) -> StoreResult<(String, PathBuf)> {
        let filename = match id.filename() {
            Ok(name) => name,
            Err(err) => {
                debug!("Identifier {} does not decode: {}", id, err);
                return Err(StoreError::not_found(id.as_str()));
            }
        };
        if !ident::is_clean_entry_name(&filename) {
            debug!("Identifier {} decodes to unsafe name {:?}", id, filename);
            return Err(StoreError::not_found(id.as_str()));
        }
        let path = match fs::canonicalize(self.root.join(&filename)).await {
            Ok(path) => path,
            Err(_) => return Err(StoreError::not_found(id.as_str())),
        };
        if !path.starts_with(&self.root) {
            debug!("Identifier {} resolves outside the root", id);
            return Err(StoreError::not_found(id.as_str()));
        }
        Ok((filename, path))
    }

    fn write_lock_for(&self, filename: &str) -> Arc<AsyncMutex<()>> {
        let mut locks = self.write_locks.lock().unwrap_or_else(|e| e.into_inner());
        Arc::clone(locks.entry(filename.to_string()).or_default())
    }

    /// Write the body to `path`, enforcing the size cap as bytes arrive.
    async fn spool<S>(&self, path: &Path, body: S) -> StoreResult<u64>
    where
        S: Stream<Item = Result<Bytes, std::io::Error>> + Send,
    {
        let limit = self.config.max_document_bytes;
        let mut file = fs::File::create(path).await?;
        let mut written: u64 = 0;
        tokio::pin!(body);
        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            written += chunk.len() as u64;
            if written > limit {
                return Err(StoreError::payload_too_large(limit));
            }
            file.write_all(&chunk).await?;
        }
        file.flush().await?;
        file.sync_all().await?;
        Ok(written)
    }

    async fn discard_staging(&self, staging: &Path) {
        if let Err(err) = fs::remove_file(staging).await {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to remove staging file {}: {}", staging.display(), err);
            }
        }
    }

    /// First free `"stem (n).ext"` name for a taken filename.
    async fn first_free_variant(&self, filename: &str) -> StoreResult<String> {
        if !fs::try_exists(self.root.join(filename)).await? {
            return Ok(filename.to_string());
        }
        // the extension is always 4 ASCII bytes here
        let (stem, ext) = filename.split_at(filename.len() - 4);
        for n in 1..10_000u32 {
            let candidate = format!("{stem} ({n}){ext}");
            if !fs::try_exists(self.root.join(&candidate)).await? {
                return Ok(candidate);
            }
        }
        Err(StoreError::conflict(filename.to_string()))
    }
}

/// Wrap a content stream so mid-transfer failures are logged before they
/// reach the consumer. Framing already sent cannot be retracted, so the
/// log line is often the only server-side record of the failure.
fn watched<S>(inner: S, id: DocumentId) -> ByteStream
where
    S: Stream<Item = Result<Bytes, std::io::Error>> + Send + 'static,
{
    Box::pin(async_stream::stream! {
        tokio::pin!(inner);
        while let Some(item) = inner.next().await {
            if let Err(err) = &item {
                warn!("Content stream for {} failed: {}", id, err);
            }
            yield item;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;

    fn store_at(dir: &tempfile::TempDir) -> DocumentStore {
        DocumentStore::new(StoreConfig::new(dir.path())).unwrap()
    }

    fn body(bytes: &'static [u8]) -> impl Stream<Item = Result<Bytes, std::io::Error>> + Send {
        let chunks: Vec<Result<Bytes, std::io::Error>> = vec![Ok(Bytes::from_static(bytes))];
        stream::iter(chunks)
    }

    fn chunked(parts: Vec<Vec<u8>>) -> impl Stream<Item = Result<Bytes, std::io::Error>> + Send {
        let chunks: Vec<Result<Bytes, std::io::Error>> =
            parts.into_iter().map(|part| Ok(Bytes::from(part))).collect();
        stream::iter(chunks)
    }

    async fn collect(mut stream: ByteStream) -> Vec<u8> {
        let mut out = Vec::new();
        while let Some(chunk) = stream.next().await {
            out.extend_from_slice(&chunk.unwrap());
        }
        out
    }

    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    #[tokio::test]
    async fn ingest_then_metadata_reports_the_exact_size() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&dir);

        let doc = store
            .ingest("report.pdf", body(b"0123456789"), OnConflict::Overwrite)
            .await
            .unwrap();
        assert_eq!(doc.size_bytes, 10);
        assert_eq!(doc.filename, "report.pdf");
        assert_eq!(doc.title, "report");

        let again = store.metadata(&doc.id).await.unwrap();
        assert_eq!(again.size_bytes, 10);
        assert_eq!(again.filename, "report.pdf");
    }

    #[tokio::test]
    async fn ingest_delete_metadata_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&dir);

        let doc = store
            .ingest("gone.pdf", body(b"x"), OnConflict::Overwrite)
            .await
            .unwrap();
        store.delete(&doc.id).await.unwrap();

        let err = store.metadata(&doc.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn second_delete_is_not_found_not_silent_success() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&dir);

        let doc = store
            .ingest("twice.pdf", body(b"x"), OnConflict::Overwrite)
            .await
            .unwrap();
        store.delete(&doc.id).await.unwrap();

        let err = store.delete(&doc.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn non_pdf_filename_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&dir);

        let err = store
            .ingest("notes.txt", body(b"hello"), OnConflict::Overwrite)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedMediaType { .. }));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unsafe_filenames_are_rejected_at_ingest() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&dir);

        let err = store
            .ingest("../escape.pdf", body(b"x"), OnConflict::Overwrite)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidFilename { .. }));

        let err = store
            .ingest(".hidden.pdf", body(b"x"), OnConflict::Overwrite)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidFilename { .. }));
    }

    #[tokio::test]
    async fn oversized_body_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let store =
            DocumentStore::new(StoreConfig::new(dir.path()).with_max_document_bytes(8)).unwrap();

        let err = store
            .ingest(
                "big.pdf",
                chunked(vec![vec![0u8; 6], vec![0u8; 6]]),
                OnConflict::Overwrite,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::PayloadTooLarge { .. }));

        // neither the target nor the staging file survives
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn failing_body_stream_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&dir);

        let parts: Vec<Result<Bytes, std::io::Error>> = vec![
            Ok(Bytes::from_static(b"abc")),
            Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                "connection reset",
            )),
        ];
        let err = store
            .ingest("doc.pdf", stream::iter(parts), OnConflict::Overwrite)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn accented_filename_round_trips_and_lists() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&dir);

        let doc = store
            .ingest(
                "Résumé Notes.pdf",
                chunked(vec![vec![7u8; 1024]]),
                OnConflict::Overwrite,
            )
            .await
            .unwrap();
        assert_eq!(doc.id.filename().unwrap(), "Résumé Notes.pdf");

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Résumé Notes");
        assert_eq!(listed[0].size_bytes, 1024);
    }

    #[tokio::test]
    async fn mangled_multipart_filename_is_repaired() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&dir);

        let doc = store
            .ingest("RÃ©sumÃ© Notes.pdf", body(b"x"), OnConflict::Overwrite)
            .await
            .unwrap();
        assert_eq!(doc.filename, "Résumé Notes.pdf");
        assert_eq!(doc.title, "Résumé Notes");
    }

    #[tokio::test]
    async fn list_skips_everything_that_is_not_a_pdf_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&dir);

        store
            .ingest("real.pdf", body(b"x"), OnConflict::Overwrite)
            .await
            .unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        std::fs::write(dir.path().join(".stale.part"), b"x").unwrap();
        std::fs::write(dir.path().join(".hidden.pdf"), b"x").unwrap();
        std::fs::create_dir(dir.path().join("nested.pdf")).unwrap();

        let docs = store.list().await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].filename, "real.pdf");
    }

    #[tokio::test]
    async fn list_of_an_empty_root_is_empty_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&dir);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn full_read_matches_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&dir);
        let content = pattern(1000);

        let doc = store
            .ingest("file.pdf", chunked(vec![content.clone()]), OnConflict::Overwrite)
            .await
            .unwrap();

        let opened = store.open(&doc.id, None).await.unwrap();
        assert!(opened.range.is_none());
        assert_eq!(opened.content_length(), 1000);
        assert_eq!(collect(opened.stream).await, content);
    }

    #[tokio::test]
    async fn explicit_full_range_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&dir);
        let content = pattern(1000);

        let doc = store
            .ingest("file.pdf", chunked(vec![content.clone()]), OnConflict::Overwrite)
            .await
            .unwrap();

        let opened = store
            .open(&doc.id, Some(ByteRange::new(0, Some(999))))
            .await
            .unwrap();
        assert!(opened.range.unwrap().is_full_content());
        assert_eq!(collect(opened.stream).await, content);
    }

    #[tokio::test]
    async fn interior_range_yields_the_exact_slice() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&dir);
        let content = pattern(1000);

        let doc = store
            .ingest("file.pdf", chunked(vec![content.clone()]), OnConflict::Overwrite)
            .await
            .unwrap();

        let opened = store
            .open(&doc.id, Some(ByteRange::new(100, Some(199))))
            .await
            .unwrap();
        let range = opened.range.unwrap();
        assert_eq!((range.start, range.end, range.total_size), (100, 199, 1000));
        assert_eq!(opened.content_length(), 100);
        assert_eq!(collect(opened.stream).await, &content[100..200]);
    }

    #[tokio::test]
    async fn range_reads_cross_chunk_boundaries() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(
            StoreConfig::new(dir.path()).with_read_chunk_bytes(16),
        )
        .unwrap();
        let content = pattern(100);

        let doc = store
            .ingest("file.pdf", chunked(vec![content.clone()]), OnConflict::Overwrite)
            .await
            .unwrap();

        let opened = store
            .open(&doc.id, Some(ByteRange::new(10, Some(89))))
            .await
            .unwrap();
        assert_eq!(collect(opened.stream).await, &content[10..90]);
    }

    #[tokio::test]
    async fn out_of_bounds_ranges_are_unsatisfiable() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&dir);

        let doc = store
            .ingest("file.pdf", chunked(vec![pattern(1000)]), OnConflict::Overwrite)
            .await
            .unwrap();

        let bad = [
            ByteRange::new(1000, Some(1000)),
            ByteRange::new(500, Some(499)),
            ByteRange::new(0, Some(1000)),
            ByteRange::from_start(1000),
        ];
        for range in bad {
            let err = store.open(&doc.id, Some(range)).await.unwrap_err();
            assert!(matches!(err, StoreError::RangeNotSatisfiable { .. }), "{range:?}");
        }
    }

    #[tokio::test]
    async fn foreign_identifiers_read_as_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&dir);

        // garbage, and a well-formed id for a file that was never stored
        for raw in ["%%%", "bm90LXRoZXJlLnBkZg"] {
            let id = DocumentId::from_string(raw.to_string());
            let err = store.metadata(&id).await.unwrap_err();
            assert!(matches!(err, StoreError::NotFound { .. }), "{raw}");
        }
    }

    #[tokio::test]
    async fn traversal_identifiers_read_as_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&dir);

        for name in ["../escape.pdf", "nested/escape.pdf"] {
            let id = DocumentId::from_filename(name);
            assert!(matches!(
                store.metadata(&id).await.unwrap_err(),
                StoreError::NotFound { .. }
            ));
            assert!(matches!(
                store.delete(&id).await.unwrap_err(),
                StoreError::NotFound { .. }
            ));
        }
    }

    #[tokio::test]
    async fn overwrite_replaces_content_under_the_same_identifier() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&dir);

        let first = store
            .ingest("doc.pdf", body(b"old"), OnConflict::Overwrite)
            .await
            .unwrap();
        let second = store
            .ingest("doc.pdf", body(b"newer!"), OnConflict::Overwrite)
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.size_bytes, 6);
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn reject_mode_preserves_the_existing_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&dir);

        let doc = store
            .ingest("doc.pdf", body(b"old"), OnConflict::Overwrite)
            .await
            .unwrap();
        let err = store
            .ingest("doc.pdf", body(b"replacement"), OnConflict::Reject)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));

        assert_eq!(store.metadata(&doc.id).await.unwrap().size_bytes, 3);
    }

    #[tokio::test]
    async fn rename_mode_stores_numbered_variants() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&dir);

        store
            .ingest("doc.pdf", body(b"one"), OnConflict::Overwrite)
            .await
            .unwrap();
        let second = store
            .ingest("doc.pdf", body(b"two"), OnConflict::Rename)
            .await
            .unwrap();
        let third = store
            .ingest("doc.pdf", body(b"three"), OnConflict::Rename)
            .await
            .unwrap();

        assert_eq!(second.filename, "doc (1).pdf");
        assert_eq!(second.id.filename().unwrap(), "doc (1).pdf");
        assert_eq!(third.filename, "doc (2).pdf");
        assert_eq!(store.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn rename_mode_without_a_conflict_keeps_the_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&dir);

        let doc = store
            .ingest("fresh.pdf", body(b"x"), OnConflict::Rename)
            .await
            .unwrap();
        assert_eq!(doc.filename, "fresh.pdf");
    }

    #[tokio::test]
    async fn missing_root_is_unavailable_at_construction() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("never-created");
        let err = DocumentStore::new(StoreConfig::new(gone)).unwrap_err();
        assert!(matches!(err, StoreError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn vanished_root_is_unavailable_at_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&dir);
        std::fs::remove_dir_all(dir.path()).unwrap();

        let err = store.list().await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable { .. }));
    }
}
