//! CDN image path construction.

use crate::config::OutputFormat;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped inside a single path segment. Includes `%` so decoded
/// ids containing escapes survive, and `/` so an id stays one segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Returns true for `.` and `..`, which cannot be kept as literal URL path
/// segments.
pub fn is_dot_segment(s: &str) -> bool {
    s == "." || s == ".."
}

fn encode_segment(s: &str) -> String {
    utf8_percent_encode(s, PATH_SEGMENT).to_string()
}

/// Relative, escaped image path: `id/formatid.ext`, or `id/id2/formatid.ext`
/// when `id2` is non-empty.
pub fn image_path(id: &str, id2: &str, format_id: &str, format: OutputFormat) -> String {
    let ext = format.extension();
    let id = encode_segment(id);
    let format_id = encode_segment(format_id);
    if id2.is_empty() {
        format!("{}/{}.{}", id, format_id, ext)
    } else {
        format!("{}/{}/{}.{}", id, encode_segment(id2), format_id, ext)
    }
}

/// Cleans a base path: empty and `.` segments are dropped and `..` removes
/// the preceding segment. The result is rooted and has no trailing slash
/// unless it is `/`.
pub fn clean_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for seg in path.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    let mut out = String::with_capacity(path.len() + 1);
    for seg in &segments {
        out.push('/');
        out.push_str(seg);
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}

/// Appends the relative image path `rel` to the cleaned `base`. `rel` is
/// taken as is.
pub fn join_path(base: &str, rel: &str) -> String {
    let base = clean_path(base);
    if base == "/" {
        format!("/{}", rel)
    } else {
        format!("{}/{}", base, rel)
    }
}
