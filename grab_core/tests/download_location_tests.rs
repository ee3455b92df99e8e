use std::path::Path;

use grab_core::download_location;
use grab_core::DownloadError;

#[test]
fn joins_last_url_segment_onto_out_dir() {
    let location =
        download_location("https://example.com/files/archive.zip", Path::new("/tmp/out")).unwrap();
    assert_eq!(location, Path::new("/tmp/out").join("archive.zip"));
}

#[test]
fn single_segment_path() {
    let location = download_location("https://example.com/setup.exe", Path::new("out")).unwrap();
    assert_eq!(location, Path::new("out").join("setup.exe"));
}

#[test]
fn query_string_and_fragment_are_ignored() {
    let location = download_location(
        "https://example.com/a/b/data.tar.gz?token=abc123&x=1#section",
        Path::new("/downloads"),
    )
    .unwrap();
    assert_eq!(location, Path::new("/downloads").join("data.tar.gz"));
}

#[test]
fn relative_out_dir_is_preserved() {
    let location =
        download_location("http://mirror.local/pkg/tool.bin", Path::new("cache/pkgs")).unwrap();
    assert_eq!(location, Path::new("cache/pkgs").join("tool.bin"));
}

#[test]
fn trailing_slash_has_no_filename() {
    let err = download_location("https://example.com/files/", Path::new("/tmp/out")).unwrap_err();
    assert!(matches!(err, DownloadError::MissingFilename(_)));
}

#[test]
fn bare_host_has_no_filename() {
    let err = download_location("https://example.com", Path::new("/tmp/out")).unwrap_err();
    assert!(matches!(err, DownloadError::MissingFilename(_)));
}

#[test]
fn unparseable_url_is_rejected() {
    let err = download_location("not a url at all", Path::new("/tmp/out")).unwrap_err();
    assert!(matches!(err, DownloadError::InvalidUrl { .. }));
}
