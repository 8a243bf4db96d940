//! 정적 파일 임베드 및 서빙.
//!
//! rust-embed로 오버레이 프론트엔드를 바이너리에 포함한다.

use axum::http::{header, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use rust_embed::Embed;

/// 오버레이 프론트엔드 임베드
///
/// `overlay/` 디렉토리의 파일들을 바이너리에 포함
#[derive(Embed)]
#[folder = "overlay"]
#[include = "*.html"]
#[include = "*.js"]
#[include = "*.css"]
struct Assets;

/// 정적 파일 서빙을 위한 fallback 핸들러
pub async fn serve_static(uri: Uri) -> Response {
    serve_static_impl(uri)
}

/// 정적 파일 서빙 구현
fn serve_static_impl(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    // 빈 경로는 index.html로
    let path = if path.is_empty() { "index.html" } else { path };

    match Assets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();

            let cache_control = if path.ends_with(".html") {
                "no-cache"
            } else {
                "public, max-age=3600"
            };

            (
                [
                    (header::CONTENT_TYPE, mime.as_ref()),
                    (header::CACHE_CONTROL, cache_control),
                ],
                content.data,
            )
                .into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Html("<h1>404</h1><p>오버레이 리소스 없음</p>"),
        )
            .into_response(),
    }
}
