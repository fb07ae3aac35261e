//! HTTP transport for IS requests.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart;
use reqwest::Client;

use crate::api::form::Form;
use crate::config::ClientConfig;
use crate::credential::Credential;
use crate::error::{IsApiError, Result};

/// Response as received from the server, before any classification.
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// MIME type from the `Content-Type` header, without parameters
    pub content_type: Option<String>,
    /// `charset` parameter of the `Content-Type` header
    pub charset: Option<String>,
    /// Response body
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Network seam between request classification and the wire.
///
/// Implementations fail only with `IsApiError::Connection` (or another
/// transport-level error); status codes and bodies are returned untouched.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue an authenticated GET.
    async fn get(&self, url: &str) -> Result<RawResponse>;

    /// Issue an authenticated POST carrying `form`.
    ///
    /// Fields holding `None` have already been stripped by the caller.
    async fn post(&self, url: &str, form: &Form) -> Result<RawResponse>;
}

/// reqwest-backed transport bound to one credential.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    credential: Credential,
}

impl HttpClient {
    /// Create a new HTTP client.
    pub fn new(credential: Credential, config: &ClientConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());

        if let Some(proxy) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| IsApiError::InvalidArgument(format!("Invalid proxy: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| IsApiError::InvalidArgument(format!("Failed to build client: {}", e)))?;

        Ok(Self { client, credential })
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.basic_auth(self.credential.login(), Some(self.credential.secret()))
    }

    fn multipart_form(form: &Form) -> Result<multipart::Form> {
        let mut body = multipart::Form::new();
        for (name, value) in form.present_fields() {
            body = body.text(name.to_string(), value.to_string());
        }
        for attachment in form.attachments() {
            let part = multipart::Part::bytes(attachment.data.clone())
                .file_name(attachment.file_name.clone())
                .mime_str(&attachment.mime)?;
            body = body.part(attachment.field.clone(), part);
        }
        Ok(body)
    }

    async fn into_raw(response: reqwest::Response) -> Result<RawResponse> {
        let status = response.status().as_u16();
        let (content_type, charset) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(split_content_type)
            .unwrap_or((None, None));
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse {
            status,
            content_type,
            charset,
            body,
        })
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn get(&self, url: &str) -> Result<RawResponse> {
        let response = self.authed(self.client.get(url)).send().await?;
        Self::into_raw(response).await
    }

    async fn post(&self, url: &str, form: &Form) -> Result<RawResponse> {
        let request = self.authed(self.client.post(url));
        let request = if form.attachments().is_empty() {
            let fields: Vec<(&str, &str)> = form.present_fields().collect();
            request.form(&fields)
        } else {
            request.multipart(Self::multipart_form(form)?)
        };

        let response = request.send().await?;
        Self::into_raw(response).await
    }
}

/// Split a `Content-Type` header into the MIME type and its charset.
pub(crate) fn split_content_type(header: &str) -> (Option<String>, Option<String>) {
    let mut parts = header.split(';');
    let mime = parts
        .next()
        .map(|m| m.trim().to_ascii_lowercase())
        .filter(|m| !m.is_empty());
    let charset = parts.find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches('"').to_string())
        } else {
            None
        }
    });
    (mime, charset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FileManagerOp;
    use crate::testing::{http_response, serve_once};

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new(Credential::new("u", "p"), &ClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_proxy_creation() {
        let config = ClientConfig::default().proxy("http://127.0.0.1:8080");
        assert!(HttpClient::new(Credential::new("u", "p"), &config).is_ok());
    }

    #[test]
    fn test_proxy_invalid() {
        let config = ClientConfig::default().proxy(":::::::");
        let res = HttpClient::new(Credential::new("u", "p"), &config);
        assert!(matches!(res, Err(IsApiError::InvalidArgument(_))));
    }

    #[test]
    fn test_split_content_type() {
        assert_eq!(
            split_content_type("text/plain; charset=UTF-8"),
            (Some("text/plain".to_string()), Some("UTF-8".to_string()))
        );
        assert_eq!(
            split_content_type("application/PDF"),
            (Some("application/pdf".to_string()), None)
        );
        assert_eq!(
            split_content_type("text/html;foo=bar; Charset=\"iso-8859-2\""),
            (Some("text/html".to_string()), Some("iso-8859-2".to_string()))
        );
    }

    #[tokio::test]
    async fn test_get_unreachable_host() {
        let client = HttpClient::new(Credential::new("u", "p"), &ClientConfig::default()).unwrap();
        let err = client.get("http://127.0.0.1:1/auth/x").await.unwrap_err();
        assert!(matches!(err, IsApiError::Connection(_)), "{:?}", err);
    }

    #[tokio::test]
    async fn test_get_sends_basic_auth() {
        let (base_url, server) = serve_once(http_response(
            200,
            "text/plain; charset=iso-8859-2",
            "ok",
        ));
        let client =
            HttpClient::new(Credential::new("xlogin", "s3cret"), &ClientConfig::default()).unwrap();

        let response = client.get(&format!("{}/auth/el/a.txt", base_url)).await.unwrap();
        let request = server.join().unwrap();

        assert!(request.starts_with("GET /auth/el/a.txt HTTP/1.1\r\n"));
        let auth = request
            .lines()
            .find(|line| line.to_ascii_lowercase().starts_with("authorization:"))
            .unwrap();
        assert!(auth.ends_with("Basic eGxvZ2luOnMzY3JldA=="), "{}", auth);
        assert_eq!(response.status, 200);
        assert_eq!(response.content_type.as_deref(), Some("text/plain"));
        assert_eq!(response.charset.as_deref(), Some("iso-8859-2"));
        assert_eq!(response.body, b"ok");
    }

    #[tokio::test]
    async fn test_post_without_attachment_is_urlencoded() {
        let (base_url, server) = serve_once(http_response(200, "application/json", "{}"));
        let client = HttpClient::new(Credential::new("u", "p"), &ClientConfig::default()).unwrap();
        let form = Form::op(FileManagerOp::CreateFolder)
            .field("furl", "/el/fi/")
            .field("zkratka", "drop");

        client.post(&base_url, &form).await.unwrap();
        let request = server.join().unwrap().to_ascii_lowercase();

        assert!(request.contains("content-type: application/x-www-form-urlencoded"));
        assert!(request.ends_with("op=vlsl&furl=%2fel%2ffi%2f&zkratka=drop"));
    }

    #[tokio::test]
    async fn test_post_with_attachment_is_multipart() {
        let (base_url, server) = serve_once(http_response(500, "text/html", "boom"));
        let client = HttpClient::new(Credential::new("u", "p"), &ClientConfig::default()).unwrap();
        let form = Form::op(FileManagerOp::Upload)
            .field("furl", "/el/fi/")
            .attach("soubor", "a.txt", "text/plain", b"payload".to_vec());

        let response = client.post(&base_url, &form).await.unwrap();
        let request = server.join().unwrap();

        assert_eq!(response.status, 500);
        assert!(request
            .to_ascii_lowercase()
            .contains("content-type: multipart/form-data; boundary="));
        assert!(request.contains("name=\"furl\""));
        assert!(request.contains("name=\"soubor\"; filename=\"a.txt\""));
        assert!(request.contains("payload"));
    }

    #[test]
    fn test_raw_response_status() {
        let ok = RawResponse {
            status: 204,
            ..Default::default()
        };
        assert!(ok.is_success());
        let err = RawResponse {
            status: 403,
            ..Default::default()
        };
        assert!(!err.is_success());
    }
}
