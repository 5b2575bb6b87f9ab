use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use staffhub_api::{
    db, DocumentListQuery, DocumentListResponse, DocumentResponse, DocumentUploadResponse,
    OkResponse,
};

use crate::error::ApiErr;
use crate::storage::{document_from_row, sq_execute, sq_query_map, sq_query_row, Db};

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// GET /api/documents — `{success: true, documents: [...]}`, optionally
/// filtered to one employee.
pub async fn list(
    State(db): State<Db>,
    Query(query): Query<DocumentListQuery>,
) -> Result<Json<DocumentListResponse>, ApiErr> {
    let conn = db.conn();
    let documents = sq_query_map(
        &conn,
        db::documents::list(query.employee_id.as_deref()),
        document_from_row,
    )
    .map_err(ApiErr::from_db("list documents"))?;

    Ok(Json(DocumentListResponse {
        success: true,
        documents,
    }))
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

/// GET /api/documents/:id — row metadata only; the file is at `/uploads/...`.
pub async fn get(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<DocumentResponse>, ApiErr> {
    let conn = db.conn();
    sq_query_row(&conn, db::documents::get(&id), document_from_row)
        .map(Json)
        .map_err(|_| ApiErr::not_found("document not found"))
}

// ---------------------------------------------------------------------------
// Upload
// ---------------------------------------------------------------------------

/// POST /api/documents/upload — multipart upload: a `file` part plus
/// optional `employeeId` and `documentType` fields.
///
/// The file is written first; if the row insert fails the file is removed
/// best-effort. The two lifecycles are otherwise independent.
pub async fn upload(
    State(db): State<Db>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<DocumentUploadResponse>), ApiErr> {
    let mut employee_id: Option<String> = None;
    let mut document_type = "general".to_string();
    let mut file: Option<(String, Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiErr::bad_request(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "employeeId" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiErr::bad_request(format!("invalid employeeId field: {e}")))?;
                if !value.trim().is_empty() {
                    employee_id = Some(value.trim().to_string());
                }
            }
            "documentType" => {
                document_type = field
                    .text()
                    .await
                    .map_err(|e| ApiErr::bad_request(format!("invalid documentType field: {e}")))?;
            }
            "file" => {
                let file_name = field
                    .file_name()
                    .map(sanitize_file_name)
                    .filter(|n| !n.is_empty())
                    .ok_or_else(|| ApiErr::bad_request("file part must carry a filename"))?;
                let content_type = field.content_type().map(|m| m.to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiErr::bad_request(format!("failed to read file: {e}")))?;
                file = Some((file_name, content_type, bytes.to_vec()));
            }
            other => {
                tracing::debug!("ignoring unknown multipart field {other:?}");
            }
        }
    }

    let Some((file_name, content_type, bytes)) = file else {
        return Err(ApiErr::bad_request("missing file part"));
    };

    let mime_type = content_type
        .unwrap_or_else(|| mime_guess::from_path(&file_name).first_or_octet_stream().to_string());

    // Random storage name keeps uploads collision-free and unguessable.
    let stored_name = format!("{}-{file_name}", Uuid::new_v4().simple());
    db.write_upload(&stored_name, &bytes).map_err(|e| {
        tracing::error!("write upload: {e}");
        ApiErr::internal("failed to store file")
    })?;

    let id = Uuid::new_v4().to_string();
    let file_path = format!("/uploads/{stored_name}");

    let conn = db.conn();
    let result = sq_execute(
        &conn,
        db::documents::insert(
            &id,
            employee_id.as_deref(),
            &document_type,
            &file_name,
            &file_path,
            &mime_type,
        ),
    );

    if let Err(e) = result {
        tracing::error!("insert document: {e}");
        db.remove_upload(&stored_name);
        return Err(ApiErr::internal("failed to record document"));
    }

    let document = sq_query_row(&conn, db::documents::get(&id), document_from_row)
        .map_err(ApiErr::from_db("reload document"))?;

    Ok((
        StatusCode::CREATED,
        Json(DocumentUploadResponse {
            success: true,
            document,
        }),
    ))
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// DELETE /api/documents/:id — removes the row, then the file best-effort.
pub async fn delete(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<OkResponse>, ApiErr> {
    let conn = db.conn();

    let document = sq_query_row(&conn, db::documents::get(&id), document_from_row)
        .map_err(|_| ApiErr::not_found("document not found"))?;

    sq_execute(&conn, db::documents::delete(&id)).map_err(ApiErr::from_db("delete document"))?;

    if let Some(stored_name) = document.file_path.strip_prefix("/uploads/") {
        db.remove_upload(stored_name);
    }

    Ok(Json(OkResponse { ok: true }))
}

// ---------------------------------------------------------------------------

/// Keep only the final path component and drop characters that could break
/// out of the uploads directory.
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    base.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | ' '))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_are_sanitized() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\temp\\résumé.pdf"), "rsum.pdf");
        assert_eq!(sanitize_file_name("report q3.xlsx"), "report q3.xlsx");
    }
}
