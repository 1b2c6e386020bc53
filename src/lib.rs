//! Converts diva.cmore.se `image.aspx` URLs into img-cdn-cmore.b17g.services URLs.
//!
//! ```
//! assert_eq!(
//!     diva::cdn_raw_url("http://diva.cmore.se/image.aspx?formatid=221&id=a21630f5-ef51-4632-bf6f-cc94073d3cb1"),
//!     "https://img-cdn-cmore.b17g.services/a21630f5-ef51-4632-bf6f-cc94073d3cb1/221.img"
//! );
//!
//! // Anything else is passed through untouched.
//! assert_eq!(diva::cdn_raw_url("http://example.com/foo/bar.jpg"), "http://example.com/foo/bar.jpg");
//! ```
//!
//! Use a [`Converter`] to target another base URL or to emit `.jpg` paths:
//!
//! ```
//! use diva::{Converter, OutputFormat};
//!
//! let conv = Converter::with_base_url("https://example.com/foo").with_output_format(OutputFormat::Jpg);
//! let u = conv.new_url("id1", "", "format")?;
//! assert_eq!(u.as_str(), "https://example.com/foo/id1/format.jpg");
//! # Ok::<(), diva::Error>(())
//! ```

pub mod config;
pub mod converter;
pub mod error;
pub mod legacy;
pub mod path;

pub use config::{ConverterConfig, OutputFormat, DEFAULT_BASE_URL};
pub use converter::Converter;
pub use error::{Error, ErrorKind, Result};
pub use legacy::{is_legacy_url, ImageRef, LEGACY_MARKER};
pub use url::Url;

use std::fmt;
use std::sync::OnceLock;

/// Converter used by the package-level functions.
fn default_converter() -> &'static Converter {
    static DEFAULT: OnceLock<Converter> = OnceLock::new();
    DEFAULT.get_or_init(Converter::default)
}

/// Converts a diva URL into a CDN URL string, or returns `raw` unchanged.
pub fn cdn_raw_url(raw: &str) -> String {
    default_converter().cdn_raw_url(raw)
}

/// Parses a diva URL into a CDN URL on the default host.
pub fn parse(raw: &str) -> Result<Url> {
    default_converter().parse(raw)
}

/// Builds a CDN URL on the default host.
pub fn new_url(id: &str, id2: &str, format_id: &str) -> Result<Url> {
    default_converter().new_url(id, id2, format_id)
}

/// A raw URL string that displays as its CDN form.
///
/// Conversion happens on every `Display`, through the default converter;
/// anything that is not a convertible diva URL displays unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawUrl(String);

impl RawUrl {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The URL as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RawUrl {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for RawUrl {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Display for RawUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&default_converter().cdn_raw_url(&self.0))
    }
}
