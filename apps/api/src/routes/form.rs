use axum::response::Html;

const FORM_PAGE: &str = include_str!("../../static/index.html");

/// GET /
/// The interactive form. All state lives server-side; the page only calls the JSON API.
pub async fn form_handler() -> Html<&'static str> {
    Html(FORM_PAGE)
}
