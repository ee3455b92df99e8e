use std::path::Path;

use futures::StreamExt;
use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;

use crate::downloader::location::download_location;
use crate::downloader::percent::PercentGauge;
use crate::progress::notifier::ProgressNotifier;
use crate::progress::observer::ProgressObserver;
use crate::types::{DownloadError, Downloaded, ProgressUpdate};

/// Streams one remote file into a local directory.
///
/// The output filename is the last segment of the URL path (see
/// [`download_location`]). Progress is fanned out to registered observers
/// as whole-percent updates; on any failure the partial output file is
/// removed before the error reaches the caller, so the filesystem ends up
/// holding either the complete file or nothing.
pub struct FileDownloader {
    client: Client,
    notifier: ProgressNotifier,
}

impl FileDownloader {
    pub fn new() -> Self {
        // Tuned HTTP client: connect timeout, TCP optimizations
        let client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .tcp_nodelay(true)
            .build()
            .expect("failed to build HTTP client");

        Self::with_client(client)
    }

    /// Build a downloader around a caller-supplied client (proxies, extra
    /// default headers, test setups).
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            notifier: ProgressNotifier::new(),
        }
    }

    /// Register a progress observer.
    ///
    /// Observers apply to the next `download()` call only: the call moves
    /// them into that download's notifier task, so a reused downloader
    /// needs its observers registered again before the next call.
    pub fn add_observer(&mut self, observer: Box<dyn ProgressObserver>) {
        self.notifier.add_observer(observer);
    }

    /// Download `download_url` into `out_dir`, keeping the remote filename.
    ///
    /// Fails without touching the network if a file already exists at the
    /// resolved output path. Emits zero or more progress updates, then
    /// settles into exactly one terminal outcome: `Ok` with the output path
    /// and byte count, or `Err` after any partial file has been cleaned up.
    pub async fn download(
        &mut self,
        download_url: &str,
        out_dir: &Path,
    ) -> Result<Downloaded, DownloadError> {
        let out_path = download_location(download_url, out_dir)?;

        // Create the internal progress channel.
        let (progress_tx, progress_rx) = mpsc::channel(256);

        // Take the notifier out so we can move it into the background task.
        // A fresh empty notifier is left in place so the field stays valid.
        let notifier = std::mem::replace(&mut self.notifier, ProgressNotifier::new());

        // Spawn the notifier — it drains until all senders are dropped.
        let notifier_handle = tokio::spawn(async move {
            notifier.run(progress_rx).await;
        });

        let result = transfer(&self.client, download_url, &out_path, &progress_tx).await;

        // Route a failure to the observers before the channel closes.
        if let Err(e) = &result {
            let _ = progress_tx.send(Err(e.to_string())).await;
        }

        // Drop the sender so the channel closes and the notifier task can
        // call on_complete / on_error and exit cleanly.
        drop(progress_tx);

        // Wait for the notifier to finish before returning to the caller.
        let _ = notifier_handle.await;

        result
    }
}

impl Default for FileDownloader {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs the preflight check and the streaming transfer. The partial-file
/// cleanup lives here, in one place, so every post-creation failure takes
/// the same exit path and a failure can never be followed by a success.
async fn transfer(
    client: &Client,
    download_url: &str,
    out_path: &Path,
    progress_tx: &mpsc::Sender<Result<ProgressUpdate, String>>,
) -> Result<Downloaded, DownloadError> {
    // Preflight: never clobber an existing file. Checked before anything is
    // created, so this error path has nothing to clean up. Not atomic with
    // file creation — concurrent downloads to the same path are undefined.
    if out_path.exists() {
        return Err(DownloadError::AlreadyExists(out_path.to_path_buf()));
    }

    let result = stream_to_file(client, download_url, out_path, progress_tx).await;

    if result.is_err() {
        remove_partial(out_path);
    }

    result
}

async fn stream_to_file(
    client: &Client,
    download_url: &str,
    out_path: &Path,
    progress_tx: &mpsc::Sender<Result<ProgressUpdate, String>>,
) -> Result<Downloaded, DownloadError> {
    // Open the output file first, then the remote stream; a request that
    // never gets off the ground still leaves an empty file for cleanup.
    let file = tokio::fs::File::create(out_path).await?;
    let mut writer = tokio::io::BufWriter::with_capacity(256 * 1024, file);

    let response = client
        .get(download_url)
        .send()
        .await?
        .error_for_status()?;

    let mut gauge = PercentGauge::new(response.content_length());

    log::info!(
        "[download] {} -> {}: status={}, content_length={:?}",
        download_url,
        out_path.display(),
        response.status(),
        response.content_length()
    );

    // Stream the response body chunk by chunk, in arrival order.
    let mut stream = response.bytes_stream();

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result?;

        writer.write_all(&chunk).await?;

        if let Some(update) = gauge.advance(chunk.len() as u64) {
            let _ = progress_tx.send(Ok(update)).await;
        }
    }

    writer.flush().await?;
    writer.shutdown().await?;

    log::info!(
        "[download] {}: finished, {} bytes",
        out_path.display(),
        gauge.bytes_received()
    );

    Ok(Downloaded {
        path: out_path.to_path_buf(),
        bytes_received: gauge.bytes_received(),
    })
}

/// Best-effort removal of a partial output file after a failed transfer.
/// A failed delete is logged and otherwise ignored so the caller still
/// sees the transfer error that started the cleanup.
fn remove_partial(out_path: &Path) {
    if out_path.exists() {
        if let Err(e) = std::fs::remove_file(out_path) {
            log::warn!(
                "[download] could not remove partial file {}: {}",
                out_path.display(),
                e
            );
        }
    }
}
