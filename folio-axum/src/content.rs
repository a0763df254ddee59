use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header::{ACCEPT_RANGES, CONTENT_LENGTH, CONTENT_RANGE, CONTENT_TYPE, RANGE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::Response;
use folio_store::{ByteRange, DocumentId, ResolvedRange, MEDIA_TYPE_PDF};

use crate::error::ApiError;
use crate::state::ApiState;

/// GET /content/{id}
///
/// Whole document by default; a well-formed `Range: bytes=start-end`
/// header narrows the response to a 206 slice. Range forms this store
/// does not serve exactly (suffix ranges, later ranges of a multi-range
/// header, malformed values) are ignored and answered with the full
/// content, which RFC 7233 permits. A range pointing outside the
/// document is a 416.
pub async fn read(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let id = DocumentId::from_string(id);
    let range = parse_range_header(&headers);
    let opened = state.store.open(&id, range).await?;

    let content_length = opened.content_length();
    let range = opened.range;
    let mut response = Response::new(Body::from_stream(opened.stream));
    if range.is_some() {
        *response.status_mut() = StatusCode::PARTIAL_CONTENT;
    }
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(MEDIA_TYPE_PDF));
    headers.insert(ACCEPT_RANGES, HeaderValue::from_static("bytes"));
    headers.insert(CONTENT_LENGTH, HeaderValue::from(content_length));
    if let Some(range) = range {
        headers.insert(CONTENT_RANGE, content_range_value(&range));
    }
    Ok(response)
}

/// First `start-end` pair of the `Range` header, if there is one the
/// store can serve exactly. `None` means "send the whole document".
fn parse_range_header(headers: &HeaderMap) -> Option<ByteRange> {
    let raw = headers.get(RANGE)?.to_str().ok()?;
    let ranges = raw.strip_prefix("bytes=")?;
    let first = ranges.split(',').next()?.trim();
    let (start, end) = first.split_once('-')?;
    let start = start.trim().parse().ok()?;
    let end = end.trim();
    let end = if end.is_empty() {
        None
    } else {
        Some(end.parse().ok()?)
    };
    Some(ByteRange::new(start, end))
}

/// The formatted value is ASCII digits and punctuation, so it always
/// parses.
fn content_range_value(range: &ResolvedRange) -> HeaderValue {
    format!("bytes {}-{}/{}", range.start, range.end, range.total_size)
        .parse()
        .unwrap()
}
