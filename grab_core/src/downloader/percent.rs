use crate::types::ProgressUpdate;

/// Tracks cumulative bytes against the declared content length and decides
/// when a new whole-percent progress update is due.
///
/// The last notified percent only ever grows, so one gauge never produces
/// duplicate or decreasing updates. Percent is not clamped at 100: a server
/// that under-reports its `Content-Length` pushes the gauge past 100 rather
/// than freezing it.
pub(crate) struct PercentGauge {
    total_bytes: Option<u64>,
    bytes_received: u64,
    last_notified_percent: u64,
}

impl PercentGauge {
    pub(crate) fn new(total_bytes: Option<u64>) -> Self {
        Self {
            total_bytes,
            bytes_received: 0,
            last_notified_percent: 0,
        }
    }

    /// Record a received chunk. Returns an update when the whole-number
    /// percent grew since the last one.
    ///
    /// Without a declared length there is nothing meaningful to compute,
    /// so no updates are produced and observers only hear about completion.
    pub(crate) fn advance(&mut self, chunk_len: u64) -> Option<ProgressUpdate> {
        self.bytes_received += chunk_len;

        let total = self.total_bytes.filter(|t| *t > 0)?;
        let percent = self.bytes_received * 100 / total;

        if percent > self.last_notified_percent {
            self.last_notified_percent = percent;
            Some(ProgressUpdate {
                percent,
                bytes_received: self.bytes_received,
                total_bytes: total,
            })
        } else {
            None
        }
    }

    pub(crate) fn bytes_received(&self) -> u64 {
        self.bytes_received
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_half_chunks_notify_fifty_then_hundred() {
        let mut gauge = PercentGauge::new(Some(250));

        let first = gauge.advance(125).expect("first half should notify");
        assert_eq!(first.percent, 50);
        assert_eq!(first.bytes_received, 125);

        let second = gauge.advance(125).expect("second half should notify");
        assert_eq!(second.percent, 100);
        assert_eq!(second.bytes_received, 250);
        assert_eq!(gauge.bytes_received(), 250);
    }

    #[test]
    fn percents_strictly_increase_without_duplicates() {
        let mut gauge = PercentGauge::new(Some(1000));
        let mut notified = Vec::new();

        // 200 chunks of 5 bytes: every other chunk crosses a percent line.
        for _ in 0..200 {
            if let Some(update) = gauge.advance(5) {
                notified.push(update.percent);
            }
        }

        assert_eq!(notified.len(), 100);
        assert!(notified.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(*notified.last().unwrap(), 100);
    }

    #[test]
    fn sub_percent_chunks_do_not_notify() {
        let mut gauge = PercentGauge::new(Some(10_000));

        // 1% is 100 bytes; 50-byte chunks only notify on even ones.
        assert!(gauge.advance(50).is_none());
        assert_eq!(gauge.advance(50).unwrap().percent, 1);
        assert!(gauge.advance(50).is_none());
        assert_eq!(gauge.advance(50).unwrap().percent, 2);
    }

    #[test]
    fn under_reported_length_exceeds_hundred() {
        let mut gauge = PercentGauge::new(Some(100));

        assert_eq!(gauge.advance(100).unwrap().percent, 100);
        assert_eq!(gauge.advance(50).unwrap().percent, 150);
    }

    #[test]
    fn unknown_length_never_notifies() {
        let mut gauge = PercentGauge::new(None);

        assert!(gauge.advance(1024).is_none());
        assert!(gauge.advance(1024 * 1024).is_none());
        assert_eq!(gauge.bytes_received(), 1024 + 1024 * 1024);
    }

    #[test]
    fn zero_declared_length_never_notifies() {
        let mut gauge = PercentGauge::new(Some(0));
        assert!(gauge.advance(512).is_none());
    }
}
