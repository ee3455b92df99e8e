use std::sync::Mutex;

use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};

use grab_core::progress::{format_bytes, ProgressObserver, ProgressSnapshot};

/// Renders download progress as a single indicatif terminal bar.
///
/// The bar is created lazily on the first `on_progress` call, once the
/// total size is known. Downloads with no declared content length emit no
/// percent snapshots, so those just print a summary line on completion.
pub struct TerminalProgressObserver {
    bar: Mutex<Option<ProgressBar>>,
}

impl TerminalProgressObserver {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn ensure_bar(&self, snapshot: &ProgressSnapshot) {
        let mut bar = self.bar.lock().unwrap();
        if bar.is_none() && snapshot.total_bytes > 0 {
            let style = ProgressStyle::with_template(
                "[{bar:30.cyan/blue}] {bytes}/{total_bytes} ({binary_bytes_per_sec}) ETA {eta} {msg}",
            )
            .unwrap()
            .progress_chars("=>-");

            let pb = ProgressBar::new(snapshot.total_bytes);
            pb.set_style(style);
            *bar = Some(pb);
        }
    }
}

#[async_trait]
impl ProgressObserver for TerminalProgressObserver {
    async fn on_progress(&self, snapshot: &ProgressSnapshot) {
        self.ensure_bar(snapshot);

        let bar = self.bar.lock().unwrap();
        if let Some(pb) = bar.as_ref() {
            // An under-reporting server can push received past the declared
            // total; stretch the bar instead of letting it stall at 100%.
            if snapshot.bytes_received > snapshot.total_bytes {
                pb.set_length(snapshot.bytes_received);
            }
            pb.set_position(snapshot.bytes_received);
        }
    }

    async fn on_complete(&self, snapshot: &ProgressSnapshot) {
        let bar = self.bar.lock().unwrap();
        if let Some(pb) = bar.as_ref() {
            pb.finish_with_message(format!(
                "Complete — {}",
                format_bytes(snapshot.bytes_received)
            ));
        }
    }

    async fn on_error(&self, error: &str) {
        let bar = self.bar.lock().unwrap();
        if let Some(pb) = bar.as_ref() {
            pb.abandon_with_message(format!("Failed: {}", error));
        }
    }
}
