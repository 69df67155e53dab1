//! In-memory update watermark.

/// Offset for the next `getUpdates` call: highest seen update id + 1.
///
/// Never moves backwards. Lost on restart, so the platform may redeliver
/// anything not yet confirmed by a later fetch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UpdateCursor(Option<i64>);

impl UpdateCursor {
    /// Offset to pass to the next fetch. `None` before the first update.
    pub fn offset(&self) -> Option<i64> {
        self.0
    }

    /// Move past `update_id`.
    pub fn advance(&mut self, update_id: i64) {
        let next = update_id.saturating_add(1);
        if self.0.map_or(true, |current| next > current) {
            self.0 = Some(next);
        }
    }
}
