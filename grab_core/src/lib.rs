pub mod downloader;
pub mod progress;
pub mod types;

pub use downloader::file_downloader::FileDownloader;
pub use downloader::location::download_location;
pub use types::{DownloadError, Downloaded, ProgressUpdate};
