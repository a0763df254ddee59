//! folio-store: filesystem-backed document storage with byte-range reads.
//!
//! One flat directory of PDF files is the whole data model: the directory
//! listing is the index, metadata comes from live stat calls, and a
//! document's external identifier is a reversible encoding of its
//! filename. On top of that this crate provides:
//!
//! - **Streaming ingest** with a hard size cap, staging-file atomicity,
//!   and an explicit conflict policy (overwrite, reject, or rename)
//! - **Byte-range reads** with strict bounds checking, for HTTP
//!   partial-content responses
//! - **Path containment**: every decoded name is canonicalized and must
//!   stay inside the root
//! - **Per-name write serialization**, so a concurrent ingest and delete
//!   of the same document cannot interleave
//!
//! ```no_run
//! use bytes::Bytes;
//! use folio_store::{ByteRange, DocumentStore, OnConflict, StoreConfig};
//! use futures_util::stream;
//!
//! # async fn demo() -> Result<(), folio_store::StoreError> {
//! let store = DocumentStore::new(StoreConfig::new("data/documents"))?;
//!
//! let body = stream::iter(vec![Ok::<_, std::io::Error>(Bytes::from_static(b"%PDF-1.7"))]);
//! let doc = store.ingest("report.pdf", body, OnConflict::Overwrite).await?;
//! println!("stored {} as {}", doc.filename, doc.id);
//!
//! // First hundred bytes, e.g. for an HTTP 206 response.
//! let _opened = store.open(&doc.id, Some(ByteRange::new(0, Some(99)))).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod ident;
pub mod store;
pub mod types;

pub use config::{StoreConfig, DEFAULT_MAX_DOCUMENT_BYTES, MEDIA_TYPE_PDF};
pub use error::{StoreError, StoreResult};
pub use ident::{DocumentId, IdentError};
pub use store::DocumentStore;
pub use types::{ByteRange, ByteStream, Document, OnConflict, OpenedDocument, ResolvedRange};
