use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Multipart, Path, Query, State};
use axum::Json;
use bytes::Bytes;
use folio_store::{Document, DocumentId, OnConflict};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::ApiState;

/// Query parameters accepted by [`upload`].
#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    /// What to do when the filename is already taken. Defaults to
    /// overwriting, which keeps re-uploading a corrected file a
    /// one-step operation.
    #[serde(default, rename = "onConflict")]
    pub on_conflict: OnConflict,
}

/// GET /documents
pub async fn list(State(state): State<ApiState>) -> Result<Json<Vec<Document>>, ApiError> {
    let documents = state.store.list().await?;
    Ok(Json(documents))
}

/// GET /documents/{id}
pub async fn metadata(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<Document>, ApiError> {
    let id = DocumentId::from_string(id);
    let document = state.store.metadata(&id).await?;
    Ok(Json(document))
}

/// POST /documents
///
/// Takes the first multipart field named `file` and feeds its chunks to
/// the store as they arrive off the wire; the whole document is never
/// held in memory. Requests without a usable `file` field are a 400.
pub async fn upload(
    State(state): State<ApiState>,
    query: Result<Query<UploadQuery>, QueryRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Document>, ApiError> {
    let Query(query) = query.map_err(|err| ApiError::bad_request(err.to_string()))?;
    let mut multipart = multipart.map_err(|err| ApiError::bad_request(err.to_string()))?;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::bad_request(err.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| ApiError::bad_request("No filename on the uploaded file"))?;

        // a transport fault mid-field surfaces as an I/O error on the
        // stream, which the store answers by discarding its staging file
        let body = async_stream::stream! {
            loop {
                match field.chunk().await {
                    Ok(Some(chunk)) => yield Ok::<Bytes, std::io::Error>(chunk),
                    Ok(None) => break,
                    Err(err) => {
                        yield Err(std::io::Error::new(std::io::ErrorKind::Other, err));
                        break;
                    }
                }
            }
        };
        let document = state.store.ingest(&filename, body, query.on_conflict).await?;
        return Ok(Json(document));
    }

    Err(ApiError::bad_request("No file uploaded"))
}

/// DELETE /documents/{id}
pub async fn remove(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = DocumentId::from_string(id);
    state.store.delete(&id).await?;
    Ok(Json(json!({ "message": "Document deleted successfully" })))
}
