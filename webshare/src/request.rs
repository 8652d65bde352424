//! Request descriptors handed to the executor.
//!
//! A descriptor says what to send (method, path, query, body, extra
//! headers) and whether the caller wants the raw response back. It knows
//! nothing about credentials or retries.

use crate::error::{WebshareError, WebshareResult};
use serde::Serialize;
use std::fmt;
use url::form_urlencoded;

/// HTTP methods used by the Webshare API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PATCH
    Patch,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Method name as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Whether a body sent with this method is serialized as JSON.
    #[must_use]
    pub const fn carries_body(self) -> bool {
        !matches!(self, Self::Get | Self::Delete)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Patch => Self::PATCH,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// A query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// String value
    Str(String),
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    UInt(u64),
    /// Floating point number
    Float(f64),
    /// Boolean, rendered as `true`/`false`
    Bool(bool),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::UInt(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for QueryValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

macro_rules! query_value_from_int {
    ($variant:ident as $wide:ty: $($ty:ty),+) => {
        $(
            impl From<$ty> for QueryValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(<$wide>::from(value))
                }
            }
        )+
    };
}

query_value_from_int!(Int as i64: i8, i16, i32, i64);
query_value_from_int!(UInt as u64: u8, u16, u32, u64);

/// What to send, independent of who sends it.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    method: HttpMethod,
    path: String,
    query: Vec<(String, QueryValue)>,
    body: Option<serde_json::Value>,
    headers: Vec<(String, String)>,
    raw: bool,
}

impl RequestDescriptor {
    /// Create a descriptor for `method` on `path` (relative to the base URL).
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            headers: Vec::new(),
            raw: false,
        }
    }

    /// GET `path`.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// POST `path`.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// PATCH `path`.
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    /// PUT `path`.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    /// DELETE `path`.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Add a query parameter. A key set twice keeps the last value.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.query.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.query.push((key, value)),
        }
        self
    }

    /// Add a query parameter only when `value` is present.
    #[must_use]
    pub fn query_opt<V: Into<QueryValue>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize `body` and attach it.
    ///
    /// # Errors
    ///
    /// Returns [`WebshareError::InvalidInput`] if `body` cannot be serialized.
    pub fn json<B: Serialize + ?Sized>(self, body: &B) -> WebshareResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| WebshareError::invalid_input(format!("request body: {e}")))?;
        Ok(self.body(value))
    }

    /// Add a header. Caller headers override the executor's defaults.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Ask for the untouched response instead of a decoded body.
    #[must_use]
    pub const fn raw(mut self) -> Self {
        self.raw = true;
        self
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Path relative to the base URL.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters, in insertion order.
    #[must_use]
    pub fn query_params(&self) -> &[(String, QueryValue)] {
        &self.query
    }

    /// Extra headers.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Whether the raw response was requested.
    #[must_use]
    pub const fn is_raw(&self) -> bool {
        self.raw
    }

    /// Body to put on the wire: present only for methods that carry one.
    #[must_use]
    pub fn wire_body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref().filter(|_| self.method.carries_body())
    }

    /// `key=value` pairs joined with `&`, form-urlencoded.
    #[must_use]
    pub fn query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.query {
            serializer.append_pair(key, &value.to_string());
        }
        serializer.finish()
    }

    /// Target URL: `base_url + path`, plus `?query` if any parameter is set.
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        if self.query.is_empty() {
            format!("{base_url}{}", self.path)
        } else {
            format!("{base_url}{}?{}", self.path, self.query_string())
        }
    }
}
