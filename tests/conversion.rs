//! Integration test: converter configured from a TOML file, shared across threads.

use diva::{Converter, ConverterConfig, ErrorKind, OutputFormat};
use std::sync::Arc;
use std::thread;
use tempfile::tempdir;

const RAW: &str = "http://diva.cmore.se/image.aspx?id=e4c78001-2854-4151-baa5-a46e070f2cee&formatid=215";

#[test]
fn converter_from_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("diva.toml");
    std::fs::write(
        &path,
        "base_url = \"https://example.com/foo\"\noutput_format = \"jpg\"\n",
    )
    .unwrap();

    let cfg = ConverterConfig::load(&path).unwrap();
    assert_eq!(cfg.output_format, OutputFormat::Jpg);

    let conv = Converter::new(&cfg);
    assert_eq!(
        conv.new_url("id1", "", "format").unwrap().as_str(),
        "https://example.com/foo/id1/format.jpg"
    );
    assert_eq!(
        conv.cdn_raw_url(RAW),
        "https://example.com/foo/e4c78001-2854-4151-baa5-a46e070f2cee/215.jpg"
    );
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = tempdir().unwrap();
    assert!(ConverterConfig::load(&dir.path().join("nope.toml")).is_err());
}

#[test]
fn empty_base_url_in_config() {
    let cfg = ConverterConfig::from_toml_str("base_url = \"\"").unwrap();
    let err = Converter::new(&cfg).parse(RAW).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingBaseUrl);
    assert_eq!(Converter::new(&cfg).cdn_raw_url(RAW), RAW);
}

#[test]
fn output_path_segments_match_query() {
    let raw = "http://diva.cmore.se/image.aspx?id=b1876803&id2=ac4213c2&formatid=21";
    let u = diva::parse(raw).unwrap();
    let segments: Vec<&str> = u.path_segments().unwrap().collect();
    assert_eq!(segments, ["b1876803", "ac4213c2", "21.img"]);
    assert_eq!(u.host_str(), Some("img-cdn-cmore.b17g.services"));
    assert_eq!(u.scheme(), "https");
}

#[test]
fn shared_converter_across_threads() {
    let conv = Arc::new(Converter::with_base_url("https://example.com/"));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let conv = Arc::clone(&conv);
            thread::spawn(move || {
                conv.cdn_raw_url(&format!(
                    "http://diva.cmore.se/image.aspx?id=id{}&formatid=1",
                    i
                ))
            })
        })
        .collect();

    for (i, h) in handles.into_iter().enumerate() {
        assert_eq!(
            h.join().unwrap(),
            format!("https://example.com/id{}/1.img", i)
        );
    }
}
