//! `httpdrop-upload FILE...`
//!
//! Uploads each file to `$HTTPDROP_URL/upload` the way the drop-box page's
//! upload form does, logging progress as it goes.

use std::path::Path;
use std::process::ExitCode;

use httpdrop_client::{AsyncSubmitter, ClientConfig, UreqTransport};
use httpdrop_core::{Callbacks, FilePart, Form, HttpMethod, SubmissionOutcome};
use tracing::{error, info};

fn upload_form(name: &str, data: Vec<u8>) -> Form {
    Form::new("upload", HttpMethod::Post)
        .with_id("file-uploader")
        .text("op", "mkfile")
        .file("file", FilePart::new(name, "application/octet-stream", data))
}

async fn upload(submitter: &AsyncSubmitter<UreqTransport>, path: &Path) -> bool {
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name.to_string(),
        None => {
            error!(path = %path.display(), "not a file name");
            return false;
        }
    };
    let data = match tokio::fs::read(path).await {
        Ok(data) => data,
        Err(e) => {
            error!(path = %path.display(), error = %e, "cannot read file");
            return false;
        }
    };

    let mut hooks = Callbacks::new()
        .with_setup(|_| info!(file = %name, "uploading"))
        .with_progress(|pct| info!(file = %name, "uploading: {pct}%"));
    match submitter.submit(&upload_form(&name, data), &mut hooks).await {
        Ok(SubmissionOutcome::Success(_)) => {
            info!(file = %name, "uploaded");
            true
        }
        Ok(SubmissionOutcome::HttpFailure(status)) => {
            error!(file = %name, status, "upload refused");
            false
        }
        Ok(SubmissionOutcome::NetworkFailure(reason)) => {
            error!(file = %name, %reason, "upload failed");
            false
        }
        Err(e) => {
            error!(file = %name, error = %e, "upload not sent");
            false
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("httpdrop_client=info,httpdrop_upload=info")
            }),
        )
        .init();

    let files: Vec<String> = std::env::args().skip(1).collect();
    if files.is_empty() {
        eprintln!("usage: httpdrop-upload FILE...");
        return ExitCode::from(2);
    }

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "bad configuration");
            return ExitCode::from(2);
        }
    };
    let submitter = match AsyncSubmitter::from_config(&config) {
        Ok(submitter) => submitter,
        Err(e) => {
            error!(error = %e, "bad base url");
            return ExitCode::from(2);
        }
    };
    info!(base_url = %submitter.core().base_url(), "uploading {} file(s)", files.len());

    let mut failed = 0;
    for file in &files {
        if !upload(&submitter, Path::new(file)).await {
            failed += 1;
        }
    }

    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        error!(failed, "some uploads failed");
        ExitCode::FAILURE
    }
}
