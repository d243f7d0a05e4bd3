use axum::{
    http::{StatusCode, Uri},
    response::{Html, IntoResponse},
};

pub async fn homepage() -> impl IntoResponse {
    Html("<!doctype html><title>Home</title><h1>Welcome</h1>")
}

/// Serves every other page path.
pub async fn page(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::OK,
        Html(format!(
            "<!doctype html><title>Page</title><p>{}</p>",
            escape(uri.path())
        )),
    )
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}
