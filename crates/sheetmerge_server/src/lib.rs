//! HTTP front-end for the workbook merge kernel.
//!
//! Accepts multipart uploads, merges them with [`sheetmerge_io_xlsx`] and
//! returns the merged workbook as an attachment.

pub mod collect;
pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use collect::collect_input_files;
pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::MergeServer;

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use calamine::{Reader, open_workbook_auto_from_rs};
    use rust_xlsxwriter::Workbook;
    use sheetmerge_io_xlsx::reader::derive_text_rows_from_range;
    use tower::util::ServiceExt;

    use super::*;

    const BOUNDARY: &str = "sheetmerge-test-boundary";

    fn build_xlsx(rows: &[&[&str]]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        for (n_idx_row, row) in rows.iter().enumerate() {
            for (n_idx_col, value) in row.iter().enumerate() {
                worksheet
                    .write_string(n_idx_row as u32, n_idx_col as u16, *value)
                    .unwrap();
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    fn read_rows(v_content: &[u8]) -> Vec<Vec<String>> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(v_content)).unwrap();
        let l_names = workbook.sheet_names();
        assert_eq!(l_names, vec!["Sheet1".to_string()]);
        let range = workbook.worksheet_range(&l_names[0]).unwrap();
        derive_text_rows_from_range(&range)
    }

    /// `(field name, file name, content)` parts.
    fn build_multipart(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, file_name, content) in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match file_name {
                Some(file_name) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                ),
            }
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn merge_request(body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/merge-excel")
            .header(header::ORIGIN, "http://example.com")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn health_endpoint() {
        let app = router::build_router(ServerConfig::default());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn merge_endpoint_returns_attachment() {
        let v_a = build_xlsx(&[&["h1", "h2"], &["a", "b"]]);
        let v_b = build_xlsx(&[&["h1", "h2"], &["c", "d"]]);
        let body = build_multipart(&[
            ("files", Some("B.xlsx"), &v_b),
            ("note", None, b"ignored"),
            ("files", Some("A.xlsx"), &v_a),
        ]);

        let app = router::build_router(ServerConfig::default());
        let response = app.oneshot(merge_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers[header::CONTENT_TYPE],
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"merged.xlsx\""
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let l_rows = read_rows(&body_bytes(response).await);
        assert_eq!(
            l_rows,
            vec![
                vec!["h1".to_string(), "h2".to_string()],
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string(), "d".to_string()],
            ]
        );
    }

    #[tokio::test]
    async fn corrupt_upload_is_skipped() {
        let v_a = build_xlsx(&[&["h"], &["a"]]);
        let body = build_multipart(&[
            ("files", Some("a.xlsx"), &v_a),
            ("files", Some("b.xlsx"), b"not a workbook"),
        ]);

        let app = router::build_router(ServerConfig::default());
        let response = app.oneshot(merge_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let l_rows = read_rows(&body_bytes(response).await);
        assert_eq!(l_rows, vec![vec!["h".to_string()], vec!["a".to_string()]]);
    }

    #[tokio::test]
    async fn missing_files_is_bad_request() {
        let body = build_multipart(&[("note", None, b"hello")]);
        let app = router::build_router(ServerConfig::default());
        let response = app.oneshot(merge_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_bytes(response).await, b"No files uploaded");
    }

    #[tokio::test]
    async fn non_multipart_body_is_bad_request() {
        let app = router::build_router(ServerConfig::default());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/merge-excel")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_bytes(response).await, b"Failed to parse form");
    }

    #[tokio::test]
    async fn oversized_upload_is_bad_request() {
        let config = ServerConfig {
            max_upload_bytes: 64,
            ..ServerConfig::default()
        };
        let v_big = vec![b'x'; 4096];
        let body = build_multipart(&[("files", Some("a.xlsx"), &v_big)]);

        let app = router::build_router(config);
        let response = app.oneshot(merge_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_is_method_not_allowed() {
        let app = router::build_router(ServerConfig::default());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/merge-excel")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn preflight_returns_cors_headers() {
        let app = router::build_router(ServerConfig::default());
        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/merge-excel")
                    .header(header::ORIGIN, "http://example.com")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        let c_methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
        assert!(c_methods.contains("POST"));
        assert!(c_methods.contains("OPTIONS"));
    }
}
