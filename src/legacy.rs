//! Recognizing diva `image.aspx` URLs and extracting their image reference.

use crate::config::OutputFormat;
use crate::error::{Error, ErrorKind, Result, OP_PARSE};
use url::Url;

/// Substring identifying a diva image URL. Matched anywhere in the input.
pub const LEGACY_MARKER: &str = "diva.cmore.se/image.aspx";

/// Base used to resolve scheme-less references such as `//diva.cmore.se/...`.
const LEGACY_BASE: &str = "http://diva.cmore.se/";

/// Identifying fields of a diva image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub id: String,
    /// Secondary id; never `Some("")`.
    pub id2: Option<String>,
    pub format_id: String,
}

impl ImageRef {
    /// `id2` as a plain string, empty when absent.
    pub fn id2_str(&self) -> &str {
        self.id2.as_deref().unwrap_or("")
    }

    /// Rebuilds the reference from the path segments that follow the base
    /// path of a CDN URL: `[id, format.ext]` or `[id, id2, format.ext]`.
    pub fn from_path_segments<S: AsRef<str>>(segments: &[S], format: OutputFormat) -> Option<Self> {
        let (id, id2, last) = match segments {
            [id, last] => (id.as_ref(), None, last.as_ref()),
            [id, id2, last] => (id.as_ref(), Some(id2.as_ref()), last.as_ref()),
            _ => return None,
        };
        let format_id = last
            .strip_suffix(format.extension())
            .and_then(|s| s.strip_suffix('.'))
            .filter(|s| !s.is_empty())?;
        if id.is_empty() || id2 == Some("") {
            return None;
        }
        Some(Self {
            id: id.to_string(),
            id2: id2.map(str::to_string),
            format_id: format_id.to_string(),
        })
    }
}

/// Returns true if `raw` contains [`LEGACY_MARKER`].
pub fn is_legacy_url(raw: &str) -> bool {
    raw.contains(LEGACY_MARKER)
}

/// Parses a diva URL and extracts its `id`, `id2` and `formatid` query values.
///
/// Fails with `NotRecognized` when the marker is absent, `MalformedInput` when
/// the URL does not parse and `MissingRequiredArgument` when `id` or
/// `formatid` is absent or empty.
pub fn parse_image_ref(raw: &str) -> Result<ImageRef> {
    if !is_legacy_url(raw) {
        return Err(Error::new(ErrorKind::NotRecognized, OP_PARSE, raw));
    }

    let parsed = parse_lenient(raw)
        .map_err(|e| Error::new(ErrorKind::MalformedInput, OP_PARSE, raw).with_source(e))?;

    let id = query_value(&parsed, "id").unwrap_or_default();
    let format_id = query_value(&parsed, "formatid").unwrap_or_default();
    if id.is_empty() || format_id.is_empty() {
        return Err(Error::new(
            ErrorKind::MissingRequiredArgument,
            OP_PARSE,
            raw,
        ));
    }

    let id2 = query_value(&parsed, "id2").filter(|v| !v.is_empty());

    Ok(ImageRef { id, id2, format_id })
}

fn parse_lenient(raw: &str) -> std::result::Result<Url, url::ParseError> {
    match Url::parse(raw) {
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(LEGACY_BASE)?.join(raw),
        other => other,
    }
}

/// First value of `key` in the query string, percent-decoded.
fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
