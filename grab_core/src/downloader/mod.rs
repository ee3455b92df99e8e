pub mod file_downloader;
pub mod location;

mod percent;
