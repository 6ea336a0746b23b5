//! Stub backend for client tests

use std::io::Read;
use std::sync::mpsc;
use std::thread;

use tiny_http::{Header, Response as StubResponse, Server};

use super::ApiClient;
use crate::config::ClientConfig;

/// A request as seen by the stub server
#[derive(Debug)]
pub(crate) struct Seen {
    pub method: String,
    pub url: String,
    pub body: String,
}

/// Serve the scripted `(status, body)` replies in order, one per request
pub(crate) fn stub_server(replies: Vec<(u16, &'static str)>) -> (ApiClient, mpsc::Receiver<Seen>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().to_ip().unwrap().port();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for (status, body) in replies {
            let Ok(mut request) = server.recv() else {
                return;
            };
            let mut received = String::new();
            let _ = request.as_reader().read_to_string(&mut received);
            let _ = tx.send(Seen {
                method: request.method().to_string(),
                url: request.url().to_string(),
                body: received,
            });
            let header =
                Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap();
            let response = StubResponse::from_string(body)
                .with_status_code(status)
                .with_header(header);
            let _ = request.respond(response);
        }
    });

    let client = ApiClient::new(&ClientConfig {
        api_base_url: format!("http://127.0.0.1:{}", port),
    })
    .unwrap();
    (client, rx)
}
