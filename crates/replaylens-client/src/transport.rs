use std::time::Duration;

const USER_AGENT: &str = concat!("replaylens/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Response of a completed HTTP exchange, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// First value of header `name`, compared case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request could not be completed (connection, timeout, body read).
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("{message}")]
pub struct TransportError {
    #[error(not(source))]
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Minimal blocking HTTP GET.
pub trait Transport {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, TransportError>;
}

/// [`Transport`] over a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| TransportError::new(format!("failed to create HTTP client: {err}")))?;
        Ok(Self { client })
    }
}

fn describe(err: &reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::new(format!("request timeout: {err}"))
    } else {
        TransportError::new(format!("Network error: {err}"))
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, TransportError> {
        let mut request = self.client.get(url);
        for &(name, value) in headers {
            request = request.header(name, value);
        }
        let response = request.send().map_err(|err| describe(&err))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                Some((name.as_str().to_owned(), value.to_str().ok()?.to_owned()))
            })

            .collect();
        let body = response.text().map_err(|err| describe(&err))?;
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_ignores_case() {
        let response = HttpResponse {
            status: 200,
            headers: vec![("etag".to_owned(), "\"a\"".to_owned())],
            body: String::new(),
        };
        assert_eq!(response.header("ETag"), Some("\"a\""));
        assert_eq!(response.header("Cache-Control"), None);
        assert!(response.is_success());
        assert!(!HttpResponse::default().is_success());
    }
}
