//! HTTP-style response module
//!
//! Provides a framework-agnostic response carrier so a generated PDF can be
//! handed to whatever web layer hosts the builder.

/// The content type every PDF response carries
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// An insertion-ordered collection of response headers
///
/// Inserting a name that is already present overrides its value in place,
/// keeping the original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeaders {
    entries: Vec<(String, String)>,
}

impl ResponseHeaders {
    /// Create an empty header collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or override a header
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Look up a header value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether a header with the given name is present
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over headers in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of headers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A rendered PDF packaged as an HTTP-style response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfResponse {
    /// HTTP status code, always 200 for a successful render
    pub status: u16,
    /// Accumulated response headers
    pub headers: ResponseHeaders,
    /// Raw PDF bytes
    pub body: Vec<u8>,
}

impl PdfResponse {
    /// Create a 200 response from headers and body bytes
    pub fn new(headers: ResponseHeaders, body: Vec<u8>) -> Self {
        Self {
            status: 200,
            headers,
            body,
        }
    }
}
