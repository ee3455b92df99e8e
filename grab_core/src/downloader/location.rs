use std::path::{Path, PathBuf};

use reqwest::Url;

use crate::types::DownloadError;

/// Compute where a download will land: `out_dir` joined with the last
/// segment of the URL path. Useful for knowing where a file is going to
/// end up before (or without) starting the transfer.
///
/// Query strings and fragments never influence the result. A URL whose
/// path ends in `/` (or has no path at all) carries no filename and fails
/// with [`DownloadError::MissingFilename`] rather than producing a
/// malformed path. No filesystem access happens here; `out_dir` is not
/// checked for existence.
pub fn download_location(download_url: &str, out_dir: &Path) -> Result<PathBuf, DownloadError> {
    let url = Url::parse(download_url).map_err(|e| DownloadError::InvalidUrl {
        url: download_url.to_string(),
        reason: e.to_string(),
    })?;

    let filename = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| DownloadError::MissingFilename(download_url.to_string()))?;

    Ok(out_dir.join(filename))
}
