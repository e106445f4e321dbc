use std::sync::Arc;

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use sheetmerge_io_xlsx::conf::derive_default_merge_options;
use sheetmerge_io_xlsx::{C_MIME_XLSX, SpecInputFile, merge_workbooks};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};

/// Shared, read-only request context.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

/// Merge every uploaded workbook into one attachment.
///
/// Only parts named after `field_files` that carry a file name are taken;
/// other form values are ignored.
pub async fn merge_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ServerResult<Response> {
    let mut multipart = multipart.map_err(|e| ServerError::InvalidForm(e.body_text()))?;

    let mut l_files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::InvalidForm(e.body_text()))?
    {
        if field.name() != Some(state.config.field_files.as_str()) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let v_content = field
            .bytes()
            .await
            .map_err(|e| ServerError::InvalidForm(e.body_text()))?;
        l_files.push(SpecInputFile::from_bytes(file_name, v_content.to_vec()));
    }

    if l_files.is_empty() {
        return Err(ServerError::NoFiles);
    }
    tracing::info!(files = l_files.len(), "received upload");

    let options = derive_default_merge_options();
    let output = tokio::task::spawn_blocking(move || merge_workbooks(l_files, &options))
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))??;

    tracing::info!(
        bytes = output.content.len(),
        rows = output.report.cnt_rows_written,
        skipped = output.report.files_skipped(),
        "merged file sent"
    );

    let c_disposition = format!(
        "attachment; filename=\"{}\"",
        state.config.output_file_name
    );
    Ok((
        [
            (header::CONTENT_TYPE, C_MIME_XLSX.to_string()),
            (header::CONTENT_DISPOSITION, c_disposition),
        ],
        output.content,
    )
        .into_response())
}

/// Liveness probe.
pub async fn health_handler() -> &'static str {
    "ok"
}
