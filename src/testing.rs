//! Scripted transport and fixtures for unit tests.

use std::collections::VecDeque;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Mutex;
use std::thread::{self, JoinHandle};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::api::form::{Attachment, Form};
use crate::error::{IsApiError, Result};
use crate::http::{RawResponse, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A request as seen by the transport.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub fields: Vec<(String, String)>,
    pub attachments: Vec<Attachment>,
}

impl RecordedRequest {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn op(&self) -> Option<&str> {
        self.field("op")
    }
}

/// Replays queued responses in order and records every request.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<RawResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new(responses: Vec<RawResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// `op` codes of all POSTs, in order.
    pub fn post_ops(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter(|r| r.method == Method::Post)
            .filter_map(|r| r.op().map(str::to_string))
            .collect()
    }

    fn next(&self, request: RecordedRequest) -> Result<RawResponse> {
        let url = request.url.clone();
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| IsApiError::Protocol(format!("no scripted response for {}", url)))
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &str) -> Result<RawResponse> {
        self.next(RecordedRequest {
            method: Method::Get,
            url: url.to_string(),
            fields: Vec::new(),
            attachments: Vec::new(),
        })
    }

    async fn post(&self, url: &str, form: &Form) -> Result<RawResponse> {
        self.next(RecordedRequest {
            method: Method::Post,
            url: url.to_string(),
            fields: form
                .present_fields()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect(),
            attachments: form.attachments().to_vec(),
        })
    }
}

pub fn json_response(body: &str) -> RawResponse {
    RawResponse {
        status: 200,
        content_type: Some("application/json".to_string()),
        charset: Some("utf-8".to_string()),
        body: body.as_bytes().to_vec(),
    }
}

pub fn file_response(data: &[u8], content_type: &str, charset: Option<&str>) -> RawResponse {
    RawResponse {
        status: 200,
        content_type: Some(content_type.to_string()),
        charset: charset.map(str::to_string),
        body: data.to_vec(),
    }
}

pub fn api_error(message: &str) -> RawResponse {
    json_response(&json!({ "chyba": message }).to_string())
}

/// Raw file node backed by a stored object.
pub fn file_node(dir: &str, file_name: &str, mime: &str) -> Value {
    json!({
        "cesta": format!("{}{}", dir, file_name),
        "zkratka": file_name,
        "mam_precteno": "0",
        "pocet_poduzlu": "0",
        "zmenil_uco": "1000",
        "zmeneno": "20181201120000",
        "objekty": {"objekt": [{
            "cesta": format!("{}{}", dir, file_name),
            "jmeno_souboru": file_name,
            "mime_type": mime,
            "vlozil_uco": "4321",
            "vlozeno": "20181202130000",
            "objekt_id": "777"
        }]}
    })
}

/// Raw directory node with `child_count` children on the server.
pub fn dir_node(path: &str, shortname: &str, child_count: usize) -> Value {
    json!({
        "cesta": path,
        "zkratka": shortname,
        "nazev": shortname,
        "mam_precteno": "1",
        "pocet_poduzlu": child_count.to_string(),
        "zmenil_uco": "1000",
        "zmeneno": "20181130080000",
        "objekty": []
    })
}

/// Directory query response listing `children` under `path`.
pub fn listing(path: &str, shortname: &str, children: Vec<Value>) -> RawResponse {
    let mut root = dir_node(path, shortname, children.len());
    root["poduzly"] = json!({ "poduzel": children });
    json_response(&json!({ "uzel": [root] }).to_string())
}

/// Directory query response for a single node without children.
pub fn info(node: Value) -> RawResponse {
    json_response(&json!({ "uzel": [node] }).to_string())
}

/// Serve `response` verbatim to a single connection on a local port.
///
/// Returns the base URL and a handle yielding the raw request that was read.
pub fn serve_once(response: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let handle = thread::spawn(move || {
        let (mut socket, _) = listener.accept().unwrap();
        let request = read_request(&mut socket);
        socket.write_all(response.as_bytes()).unwrap();
        request
    });
    (base_url, handle)
}

/// A complete HTTP/1.1 response closing the connection afterwards.
pub fn http_response(status: u16, content_type: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {} X\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        content_type,
        body.len(),
        body
    )
}

fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).into_owned();
            let length = head
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}
