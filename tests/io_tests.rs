use std::fs;
use std::path::PathBuf;

use mimesniff::io::{by_name, sniff_file};
use mimesniff::{Error, SniffOptions};
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn tar_header() -> Vec<u8> {
    let mut data = vec![0u8; 512];
    data[257..262].copy_from_slice(b"ustar");
    data
}

#[test]
fn test_sniff_file_by_content() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "picture.bin", &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]);

    let mime = sniff_file(&path, &SniffOptions::default()).unwrap();
    assert_eq!(mime.essence(), "image/jpeg");
    assert_eq!(mime.extension(), Some("jpeg"));
}

#[test]
fn test_sniff_file_falls_back_to_name() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "style.css", b"body { margin: 0 }");

    let mime = sniff_file(&path, &SniffOptions::default()).unwrap();
    assert_eq!(mime.essence(), "text/css");

    let content_only = SniffOptions::new().without_extension_fallback();
    assert!(sniff_file(&path, &content_only).unwrap().is_default());
}

#[test]
fn test_sniff_file_prefer_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "renamed.gif", &[0x89, 0x50, 0x4E, 0x47]);

    let mime = sniff_file(&path, &SniffOptions::default()).unwrap();
    assert_eq!(mime.essence(), "image/png");

    let mime = sniff_file(&path, &SniffOptions::new().prefer_extension()).unwrap();
    assert_eq!(mime.essence(), "image/gif");
}

#[test]
fn test_sniff_file_prefix_len_limits_tar() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "bundle", &tar_header());

    let mime = sniff_file(&path, &SniffOptions::default()).unwrap();
    assert_eq!(mime.essence(), "application/x-tar");

    let short = SniffOptions::new().with_prefix_len(64);
    assert!(sniff_file(&path, &short).unwrap().is_default());
}

#[test]
fn test_sniff_file_unbounded_prefix_len() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "tiny", &[0x89, 0x50, 0x4E, 0x47]);

    let options = SniffOptions::new().with_prefix_len(usize::MAX);
    let mime = sniff_file(&path, &options).unwrap();
    assert_eq!(mime.essence(), "image/png");

    let options = SniffOptions::new().with_prefix_len(1_000_000_000_000);
    assert_eq!(sniff_file(&path, &options).unwrap().essence(), "image/png");
}

#[test]
fn test_sniff_file_empty() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "empty", &[]);

    let mime = sniff_file(&path, &SniffOptions::default()).unwrap();
    assert!(mime.is_default());
    assert_eq!(mime.extension(), None);
}

#[test]
fn test_sniff_file_missing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.png");

    let result = sniff_file(&path, &SniffOptions::default());
    assert!(matches!(result, Err(Error::Io { .. })));
}

#[test]
fn test_by_name_does_not_read() {
    let mime = by_name(std::path::Path::new("/does/not/exist/archive.7z"));
    assert_eq!(mime.essence(), "application/x-7z-compressed");
}
