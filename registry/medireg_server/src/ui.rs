use axum::response::Html;

/// Single-page front end: registration, search, edit and a summary sidebar.
/// It talks to the JSON endpoints under `/api`.
pub const INDEX_HTML: &str = include_str!("../assets/index.html");

/// `GET /`
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
