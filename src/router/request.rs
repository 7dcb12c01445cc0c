use std::collections::HashMap;

/// Read access to request headers.
///
/// Lookups are case-insensitive, the way HTTP header names are.
pub trait RequestHeaders {
    /// Value of the header called `name`, if present and valid UTF-8
    fn header(&self, name: &str) -> Option<&str>;
}

/// A request with no headers at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHeaders;

impl RequestHeaders for NoHeaders {
    fn header(&self, _name: &str) -> Option<&str> {
        None
    }
}

impl RequestHeaders for http::HeaderMap {
    fn header(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Header maps built by hand usually carry lowercase keys; anything else is
/// found with a case-insensitive scan.
impl RequestHeaders for HashMap<String, String> {
    fn header(&self, name: &str) -> Option<&str> {
        self.get(name)
            .or_else(|| {
                self.iter()
                    .find(|(k, _)| k.eq_ignore_ascii_case(name))
                    .map(|(_, v)| v)
            })
            .map(String::as_str)
    }
}

impl<const N: usize> RequestHeaders for [(&str, &str); N] {
    fn header(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| *v)
    }
}

impl RequestHeaders for Vec<(String, String)> {
    fn header(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Everything the matcher needs to know about an inbound request.
///
/// Borrowed from whatever the hosting server parsed; nothing is copied.
#[derive(Clone, Copy)]
pub struct RequestDescriptor<'a> {
    /// Method as sent by the client (`GET`, `post`, ...)
    pub method: &'a str,
    /// Raw (still percent-encoded) path, without the query string
    pub path: &'a str,
    /// `Host` header value
    pub host: Option<&'a str>,
    /// Raw query string, without the leading `?`
    pub query: Option<&'a str>,
    /// Header accessor (at least `x-http-method-override` is consulted)
    pub headers: &'a dyn RequestHeaders,
}

impl<'a> RequestDescriptor<'a> {
    /// A request with no host and no headers.
    ///
    /// A `?` in `path` splits off the query string.
    #[must_use]
    pub fn new(method: &'a str, path: &'a str) -> Self {
        let (path, query) = match path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path, None),
        };
        Self {
            method,
            path,
            host: None,
            query,
            headers: &NoHeaders,
        }
    }

    #[must_use]
    pub fn with_host(mut self, host: &'a str) -> Self {
        self.host = Some(host);
        self
    }

    /// Replace the query string (a leading `?` is ignored)
    #[must_use]
    pub fn with_query(mut self, query: &'a str) -> Self {
        self.query = Some(query.strip_prefix('?').unwrap_or(query));
        self
    }

    #[must_use]
    pub fn with_headers(mut self, headers: &'a dyn RequestHeaders) -> Self {
        self.headers = headers;
        self
    }

    /// Borrow the interesting parts of an [`http::Request`].
    ///
    /// The host comes from the `Host` header, falling back to the URI authority.
    #[must_use]
    pub fn from_http<B>(request: &'a http::Request<B>) -> Self {
        let host = request
            .headers()
            .get(http::header::HOST)
            .and_then(|v| v.to_str().ok())
            .or_else(|| request.uri().host());
        Self {
            method: request.method().as_str(),
            path: request.uri().path(),
            host,
            query: request.uri().query(),
            headers: request.headers(),
        }
    }
}

impl std::fmt::Debug for RequestDescriptor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestDescriptor")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("host", &self.host)
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}
