use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};

/// Uploads larger than this are rejected by the extractor.
pub const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    pub name: String,
    pub size: usize,
    pub content_type: Option<String>,
}

pub type Store = Arc<RwLock<Vec<StoredFile>>>;

pub fn app() -> Router {
    let store: Store = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/upload", post(upload))
        .route("/files", get(list_files))
        .route("/chpass", post(chpass))
        .route("/logout", post(logout))
        .route("/status/{code}", post(status))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(store)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Names that would escape the upload directory or hide a file.
pub fn is_safe_filename(name: &str) -> bool {
    !name.is_empty() && !name.contains('/') && !name.starts_with('.')
}

fn bad_request(msg: &str) -> Response {
    warn!(msg, "rejected request");
    (StatusCode::BAD_REQUEST, msg.to_string()).into_response()
}

async fn upload(State(store): State<Store>, mut multipart: Multipart) -> Response {
    let mut op = None;
    let mut file = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return bad_request(&e.body_text()),
        };
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("op") => match field.text().await {
                Ok(text) => op = Some(text),
                Err(e) => return bad_request(&e.body_text()),
            },
            Some("file") => {
                let name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                match field.bytes().await {
                    Ok(data) => file = Some((name, content_type, data.len())),
                    Err(e) => return bad_request(&e.body_text()),
                }
            }
            _ => {}
        }
    }

    if op.as_deref() != Some("mkfile") {
        return bad_request("unknown operation");
    }
    let Some((name, content_type, size)) = file.filter(|(name, _, _)| !name.is_empty()) else {
        return bad_request("no file given");
    };
    if !is_safe_filename(&name) {
        return bad_request("file name security violation");
    }

    info!(%name, size, "stored file");
    let mut files = store.write().await;
    files.retain(|f| f.name != name);
    files.push(StoredFile {
        name,
        size,
        content_type,
    });
    (StatusCode::OK, "ok").into_response()
}

async fn list_files(State(store): State<Store>) -> Json<Vec<StoredFile>> {
    Json(store.read().await.clone())
}

async fn chpass(mut multipart: Multipart) -> Response {
    let mut passwd = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("passwd") => match field.text().await {
                Ok(text) => passwd = Some(text),
                Err(e) => return bad_request(&e.body_text()),
            },
            Ok(Some(_)) => {}
            Ok(None) => break,
            Err(e) => return bad_request(&e.body_text()),
        }
    }
    match passwd {
        Some(p) if !p.is_empty() => {
            info!("password changed");
            (StatusCode::OK, "ok").into_response()
        }
        _ => {
            warn!("password change refused");
            StatusCode::FORBIDDEN.into_response()
        }
    }
}

async fn logout() -> Redirect {
    Redirect::to("/")
}

async fn status(Path(code): Path<u16>) -> Response {
    match StatusCode::from_u16(code) {
        Ok(status) => (status, status.canonical_reason().unwrap_or_default()).into_response(),
        Err(_) => bad_request("invalid status code"),
    }
}
