use serde::Serialize;

/// Point-in-time progress of a single download.
///
/// `total_bytes` is 0 while the server has not declared a content length;
/// in that case no percent snapshots are produced and the only one
/// observers see is the final `done` snapshot.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProgressSnapshot {
    pub percent: u64,
    pub bytes_received: u64,
    pub total_bytes: u64,
    pub done: bool,
}

impl ProgressSnapshot {
    pub fn empty() -> Self {
        Self {
            percent: 0,
            bytes_received: 0,
            total_bytes: 0,
            done: false,
        }
    }
}

/// Human-readable byte formatting.
pub fn format_bytes(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;
    const GB: f64 = 1024.0 * 1024.0 * 1024.0;

    let b = bytes as f64;
    if b >= GB {
        format!("{:.2} GB", b / GB)
    } else if b >= MB {
        format!("{:.2} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}
