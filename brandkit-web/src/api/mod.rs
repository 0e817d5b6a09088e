//! Router module for handling all API routes

mod cms;
mod public;

use actix_web::web;

/// Configure admin routes mounted under the router prefix (default: `/api`).
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(cms::configure_cms_routes);
}

/// Configure root routes mounted outside the router prefix.
///
/// `upload_prefix` is the public URL prefix uploaded files are served from.
pub fn configure_public_routes(cfg: &mut web::ServiceConfig, upload_prefix: &str) {
    public::configure_public_routes(cfg, upload_prefix);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{json_config, query_config, AppState};
    use actix_web::{
        http::{header, StatusCode},
        test,
        web::Data,
        App,
    };
    use brandkit_models::settings::Upload;
    use serde_json::Value;
    use std::sync::Arc;
    use tempfile::TempDir;

    const BOUNDARY: &str = "brandkit-test-boundary";
    const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake-image";

    fn state(root: &TempDir) -> Data<Arc<AppState>> {
        let upload = Upload {
            logos_dir: root.path().join("logos").to_string_lossy().into_owned(),
            media_dir: root.path().join("media").to_string_lossy().into_owned(),
            ..Default::default()
        };
        Data::new(Arc::new(AppState::new(&upload)))
    }

    fn multipart_body(kind: Option<&str>, file_name: &str, mime: &str, bytes: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        if let Some(kind) = kind {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"type\"\r\n\r\n{kind}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {mime}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload_request(body: Vec<u8>) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/api/upload")
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(body)
    }

    macro_rules! init_app {
        ($root:expr) => {
            test::init_service(
                App::new()
                    .app_data(state($root))
                    .app_data(json_config(1024 * 1024))
                    .app_data(query_config())
                    .configure(|cfg| configure_public_routes(cfg, "/uploads"))
                    .service(web::scope("/api").configure(configure_routes)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn health_answers_ok() {
        let root = TempDir::new().unwrap();
        let app = init_app!(&root);

        let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await.as_ref(), b"OK");
    }

    #[actix_web::test]
    async fn uploaded_logo_can_be_listed_served_and_deleted() {
        let root = TempDir::new().unwrap();
        let app = init_app!(&root);

        let body = multipart_body(Some("logo"), "acme.png", "image/png", PNG);
        let resp = test::call_service(&app, upload_request(body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let uploaded: Value = test::read_body_json(resp).await;
        assert_eq!(uploaded["url"], "/uploads/logos/acme.png");
        assert_eq!(uploaded["size"], PNG.len() as u64);

        let req = test::TestRequest::get().uri("/api/images?type=logos").to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed["total"], 1);
        assert_eq!(listed["images"][0]["filename"], "acme.png");
        assert_eq!(listed["images"][0]["type"], "logos");
        assert_eq!(listed["types"], serde_json::json!(["logos", "media"]));

        let req = test::TestRequest::get().uri("/uploads/logos/acme.png").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await.as_ref(), PNG);

        let req = test::TestRequest::delete()
            .uri("/api/images/delete?filename=acme.png&type=logos")
            .to_request();
        let deleted: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(deleted["success"], true);

        let req = test::TestRequest::get().uri("/uploads/logos/acme.png").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete()
            .uri("/api/images/delete?filename=acme.png&type=logos")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn upload_rejects_bad_requests() {
        let root = TempDir::new().unwrap();
        let app = init_app!(&root);

        let body = multipart_body(Some("media"), "notes.txt", "text/plain", b"hello");
        let resp = test::call_service(&app, upload_request(body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = multipart_body(None, "acme.png", "image/png", PNG);
        let resp = test::call_service(&app, upload_request(body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = multipart_body(Some("videos"), "acme.png", "image/png", PNG);
        let resp = test::call_service(&app, upload_request(body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get().uri("/api/images").to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed["total"], 0);
    }

    #[actix_web::test]
    async fn traversal_and_unknown_types_are_refused() {
        let root = TempDir::new().unwrap();
        let app = init_app!(&root);

        let req = test::TestRequest::delete()
            .uri("/api/images/delete?filename=..%2Fsecret.png&type=media")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Bad Request");

        let req = test::TestRequest::get().uri("/uploads/videos/a.png").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn invalid_query_is_a_json_bad_request() {
        let root = TempDir::new().unwrap();
        let app = init_app!(&root);

        let req = test::TestRequest::get().uri("/api/header/history?limit=0").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Bad Request");
    }
}
