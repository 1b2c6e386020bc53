//! Diva to CDN URL converter.

use crate::config::{ConverterConfig, OutputFormat, DEFAULT_BASE_URL};
use crate::error::{Error, ErrorKind, Result, OP_BUILD};
use crate::legacy::{parse_image_ref, ImageRef};
use crate::path::{clean_path, image_path, is_dot_segment, join_path};
use percent_encoding::percent_decode_str;
use url::Url;

/// Destination base, resolved once when the converter is built.
#[derive(Debug, Clone)]
enum Base {
    Url(Url),
    Missing,
    Invalid { raw: String, err: url::ParseError },
}

impl Base {
    fn resolve(configured: Option<&str>) -> Self {
        let raw = match configured {
            None => DEFAULT_BASE_URL,
            Some(s) if s.trim().is_empty() => {
                tracing::debug!("converter configured with an empty base URL");
                return Base::Missing;
            }
            Some(s) => s,
        };
        match Url::parse(raw) {
            Ok(u) if u.cannot_be_a_base() => Base::Invalid {
                raw: raw.to_string(),
                err: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            },
            Ok(u) => Base::Url(u),
            Err(err) => {
                tracing::debug!("invalid base URL {:?}: {}", raw, err);
                Base::Invalid {
                    raw: raw.to_string(),
                    err,
                }
            }
        }
    }
}

/// Converts diva image URLs into CDN URLs.
///
/// Immutable once built; share it freely between threads.
#[derive(Debug, Clone)]
pub struct Converter {
    base: Base,
    output_format: OutputFormat,
}

impl Default for Converter {
    /// Targets [`DEFAULT_BASE_URL`] with the `.img` extension.
    fn default() -> Self {
        Self::new(&ConverterConfig::default())
    }
}

impl Converter {
    pub fn new(config: &ConverterConfig) -> Self {
        Self {
            base: Base::resolve(config.base_url.as_deref()),
            output_format: config.output_format,
        }
    }

    /// Converter targeting `base_url` with the `.img` extension.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::new(&ConverterConfig {
            base_url: Some(base_url.into()),
            output_format: OutputFormat::Img,
        })
    }

    /// Selects the extension of generated paths (`.img` or `.jpg`).
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    /// Converts a diva URL into a CDN URL string.
    ///
    /// Any input that cannot be converted is returned unchanged; use
    /// [`Converter::parse`] to find out why.
    pub fn cdn_raw_url(&self, raw: &str) -> String {
        match self.parse(raw) {
            Ok(u) => u.into(),
            Err(_) => raw.to_string(),
        }
    }

    /// Parses a diva URL into a CDN URL.
    pub fn parse(&self, raw: &str) -> Result<Url> {
        let image = parse_image_ref(raw).map_err(|e| {
            tracing::debug!("rejected {:?}: {}", raw, e.kind());
            e
        })?;

        let u = self
            .new_url(&image.id, image.id2_str(), &image.format_id)
            .map_err(|e| e.wrap_parse(raw))?;
        tracing::trace!("converted {} -> {}", raw, u);
        Ok(u)
    }

    /// Builds a CDN URL from its parts. `id2` may be empty.
    ///
    /// Each part becomes exactly one escaped path segment under the base path.
    pub fn new_url(&self, id: &str, id2: &str, format_id: &str) -> Result<Url> {
        let args = || format!("id={}&id2={}&formatid={}", id, id2, format_id);

        if id.is_empty() || format_id.is_empty() {
            return Err(Error::new(
                ErrorKind::MissingRequiredArgument,
                OP_BUILD,
                args(),
            ));
        }
        if is_dot_segment(id) || is_dot_segment(id2) {
            return Err(Error::new(ErrorKind::InvalidArgument, OP_BUILD, args()));
        }

        let mut u = match &self.base {
            Base::Url(u) => u.clone(),
            Base::Missing => {
                return Err(Error::new(ErrorKind::MissingBaseUrl, OP_BUILD, args()));
            }
            Base::Invalid { raw, err } => {
                return Err(
                    Error::new(ErrorKind::InvalidBaseUrl, OP_BUILD, raw.as_str()).with_source(*err),
                );
            }
        };

        let rel = image_path(id, id2, format_id, self.output_format);
        let path = join_path(u.path(), &rel);
        u.set_path(&path);
        u.set_query(None);
        u.set_fragment(None);
        Ok(u)
    }

    /// Recovers the image reference from a URL produced by this converter.
    ///
    /// Returns `None` if the URL is not under the converter's base or its
    /// trailing segments do not form an image path.
    pub fn image_ref(&self, cdn: &Url) -> Option<ImageRef> {
        let base = match &self.base {
            Base::Url(u) => u,
            _ => return None,
        };
        if cdn.origin() != base.origin() {
            return None;
        }

        let base_path = clean_path(base.path());
        let prefix: Vec<&str> = base_path.split('/').filter(|s| !s.is_empty()).collect();
        let segments: Vec<&str> = cdn.path_segments()?.collect();
        let rest = segments.strip_prefix(prefix.as_slice())?;

        let decoded = rest
            .iter()
            .map(|s| percent_decode_str(s).decode_utf8().ok().map(|c| c.into_owned()))
            .collect::<Option<Vec<String>>>()?;
        ImageRef::from_path_segments(&decoded, self.output_format)
    }
}
