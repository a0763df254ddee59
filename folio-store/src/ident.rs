use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures turning an identifier back into a filename.
#[derive(Error, Debug)]
pub enum IdentError {
    #[error("identifier is not valid base64: {source}")]
    Encoding {
        #[from]
        source: base64::DecodeError,
    },

    #[error("identifier does not decode to UTF-8: {source}")]
    NotUtf8 {
        #[from]
        source: std::string::FromUtf8Error,
    },
}

/// Encode a filename into its opaque external identifier.
///
/// Deterministic and total: every filename has exactly one identifier.
/// URL-safe base64 without padding, so the result works as a raw path
/// segment. This is obfuscation, not access control: anyone can decode
/// it and recover the filename.
pub fn encode(filename: &str) -> String {
    URL_SAFE_NO_PAD.encode(filename.as_bytes())
}

/// Decode an identifier back to the filename it was derived from.
///
/// Inverse of [`encode`] for anything `encode` produced. Arbitrary
/// foreign strings are garbage-in-garbage-out: a successful decode says
/// nothing about whether the name exists or is even a sensible filename.
/// The two failure modes that can be detected (bad base64, non-UTF-8
/// payload) are reported; store operations treat both as an unknown
/// document.
pub fn decode(identifier: &str) -> Result<String, IdentError> {
    let bytes = URL_SAFE_NO_PAD.decode(identifier)?;
    Ok(String::from_utf8(bytes)?)
}

/// Opaque external identifier for a document, reversibly derived from
/// its filename. There is no separate id-to-name index anywhere, which
/// also means renaming a file on disk silently changes its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub String);

impl DocumentId {
    /// Derive the identifier for a filename
    pub fn from_filename(filename: &str) -> Self {
        Self(encode(filename))
    }

    /// Create from an externally supplied string
    pub fn from_string(id: String) -> Self {
        Self(id)
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Recover the filename this identifier encodes
    pub fn filename(&self) -> Result<String, IdentError> {
        decode(&self.0)
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Undo the one-byte-per-character mis-decode some multipart stacks
/// apply to UTF-8 filenames.
///
/// A UTF-8 name read as latin-1 turns every byte into one char at or
/// below U+00FF, so "Résumé" arrives as "RÃ©sumÃ©". When the chars all
/// fit in one byte and those bytes form valid UTF-8, the re-decode is
/// the original name; anything else passes through unchanged.
pub fn repair_legacy_encoding(raw: &str) -> String {
    let mut bytes = Vec::with_capacity(raw.len());
    for ch in raw.chars() {
        let cp = ch as u32;
        if cp > 0xFF {
            return raw.to_string();
        }
        bytes.push(cp as u8);
    }
    match String::from_utf8(bytes) {
        Ok(decoded) => decoded,
        Err(_) => raw.to_string(),
    }
}

/// Case-insensitive `.pdf` extension check. The stem must be non-empty.
pub fn has_pdf_extension(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() > 4 && bytes[bytes.len() - 4..].eq_ignore_ascii_case(b".pdf")
}

/// Filename without its final extension.
pub fn title_of(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => filename.to_string(),
    }
}

/// A name that can only refer to a visible direct child of the store
/// root. Dot-prefixed names are reserved for staging files and are
/// never valid document names.
pub fn is_clean_entry_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains('\0')
}
