//! Async submissions and page handlers against the live mock server.

use std::cell::RefCell;
use std::net::SocketAddr;

use httpdrop_client::{AsyncSubmitter, ClientConfig, Page, UreqTransport};
use httpdrop_core::page::{
    CHPASS_FAIL_MESSAGE, CHPASS_FORM, FILE_NAME_NONE, FILE_NAME_SOME, UPLOADER_BUTTON,
    UPLOADER_FORM,
};
use httpdrop_core::{
    dom, Callbacks, Element, EventResult, FilePart, Form, HttpMethod, HttpRequest, MemoryDocument,
    MemoryElement, PageEvent, SubmissionOutcome, Transport,
};

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn submitter(addr: SocketAddr) -> AsyncSubmitter<UreqTransport> {
    let config = ClientConfig {
        base_url: format!("http://{addr}/"),
        ..ClientConfig::default()
    };
    AsyncSubmitter::from_config(&config).unwrap()
}

fn upload_form(name: &str, data: Vec<u8>) -> Form {
    Form::new("upload", HttpMethod::Post)
        .with_id(UPLOADER_FORM)
        .text("op", "mkfile")
        .file("file", FilePart::new(name, "application/octet-stream", data))
}

fn chpass_form(passwd: &str) -> Form {
    Form::new("chpass", HttpMethod::Post)
        .with_id(CHPASS_FORM)
        .text("passwd", passwd)
}

#[tokio::test]
async fn large_upload_reports_increasing_progress() {
    let addr = start_server();
    let s = submitter(addr);

    let percents = RefCell::new(Vec::new());
    let bodies = RefCell::new(Vec::new());
    let mut hooks = Callbacks::new()
        .with_progress(|pct| percents.borrow_mut().push(pct))
        .with_success(|_, body| bodies.borrow_mut().push(body.to_string()));
    let outcome = s
        .submit(&upload_form("big.bin", vec![0xAB; 256 * 1024]), &mut hooks)
        .await
        .unwrap();
    drop(hooks);

    assert_eq!(outcome, SubmissionOutcome::Success("ok".to_string()));
    assert_eq!(bodies.into_inner(), ["ok"]);
    let percents = percents.into_inner();
    assert!(percents.len() > 1, "expected several progress events: {percents:?}");
    assert!(percents.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(percents.last(), Some(&100));

    let listing = s
        .core()
        .build_request(&Form::new("files", HttpMethod::Get))
        .unwrap();
    let response = UreqTransport::default()
        .send(listing, &mut |_, _| {})
        .unwrap();
    assert!(response.body.contains("big.bin"));
}

#[tokio::test]
async fn rejected_password_reaches_on_error() {
    let addr = start_server();
    let statuses = RefCell::new(Vec::new());
    let mut hooks = Callbacks::new()
        .with_success(|_, _| panic!("empty password accepted"))
        .with_error(|_, status| statuses.borrow_mut().push(status));
    let outcome = submitter(addr)
        .submit(&chpass_form(""), &mut hooks)
        .await
        .unwrap();
    drop(hooks);
    assert_eq!(outcome, SubmissionOutcome::HttpFailure(403));
    assert_eq!(statuses.into_inner(), [403]);
}

#[tokio::test]
async fn unreachable_server_is_a_network_failure() {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let failures = RefCell::new(0);
    let mut hooks = Callbacks::new()
        .with_error(|_, status| panic!("unexpected status {status}"))
        .with_network_failure(|_, _| *failures.borrow_mut() += 1);
    let outcome = submitter(addr)
        .submit(&upload_form("a.txt", b"a".to_vec()), &mut hooks)
        .await
        .unwrap();
    drop(hooks);
    assert!(matches!(outcome, SubmissionOutcome::NetworkFailure(_)));
    assert_eq!(failures.into_inner(), 1);
}

fn document() -> MemoryDocument {
    MemoryDocument::new()
        .with(MemoryElement::new(UPLOADER_FORM))
        .with(MemoryElement::new(UPLOADER_BUTTON))
        .with(MemoryElement::new(FILE_NAME_NONE).with_class("hide"))
        .with(MemoryElement::new(FILE_NAME_SOME))
        .with(MemoryElement::new(CHPASS_FORM))
        .with(MemoryElement::new(CHPASS_FAIL_MESSAGE).with_class("hide"))
}

#[tokio::test]
async fn page_upload_disables_button_and_reloads() {
    let addr = start_server();
    let mut page = Page::new(document(), submitter(addr));

    let bound = page.init();
    assert!(bound
        .iter()
        .any(|b| b.element == UPLOADER_FORM && b.event == PageEvent::UploadSubmit));
    assert_eq!(page.document().get(FILE_NAME_NONE).unwrap().class_name(), "");

    let result = page
        .on_upload_submit(&upload_form("notes.txt", vec![b'n'; 64 * 1024]))
        .await;
    assert_eq!(result, EventResult::PreventDefault);

    let doc = page.into_document();
    let button = doc.get(UPLOADER_BUTTON).unwrap();
    assert!(button.is_disabled());
    assert_eq!(button.text_content(), "Uploading: 100%");
    assert_eq!(doc.reloads(), 1);
}

#[tokio::test]
async fn page_chpass_failure_shows_message() {
    let addr = start_server();
    let mut page = Page::new(document(), submitter(addr));
    page.init();

    let result = page.on_chpass_submit(&chpass_form("")).await;
    assert_eq!(result, EventResult::PreventDefault);
    assert_eq!(
        dom::is_hidden(page.document_mut(), CHPASS_FAIL_MESSAGE),
        Some(false)
    );
    assert_eq!(page.document().reloads(), 0);

    page.on_chpass_submit(&chpass_form("hunter2")).await;
    assert_eq!(
        dom::is_hidden(page.document_mut(), CHPASS_FAIL_MESSAGE),
        Some(true)
    );
    assert_eq!(page.document().reloads(), 1);
}

#[test]
fn transport_sends_bodyless_requests_with_headers() {
    let addr = start_server();
    let transport = UreqTransport::default();
    let mut reports = 0;

    let status = transport
        .send(
            HttpRequest {
                method: HttpMethod::Post,
                url: format!("http://{addr}/status/418"),
                headers: vec![("x-requested-with".to_string(), "httpdrop".to_string())],
                body: None,
            },
            &mut |_, _| reports += 1,
        )
        .unwrap()
        .status;
    assert_eq!(status, 418);

    let listing = transport
        .send(
            HttpRequest {
                method: HttpMethod::Get,
                url: format!("http://{addr}/files"),
                headers: vec![("accept".to_string(), "application/json".to_string())],
                body: None,
            },
            &mut |_, _| reports += 1,
        )
        .unwrap();
    assert_eq!(listing.status, 200);
    assert_eq!(listing.body, "[]");
    assert_eq!(reports, 0);
}
