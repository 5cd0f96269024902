//! Single-slot buffer for auxiliary (non-triggering) sensor evidence.

/// Holds at most one pending reading. The newest reading wins, and a
/// reading is handed out at most once.
#[derive(Debug, Clone)]
pub struct EvidenceBuffer<T> {
    pending: Option<T>,
}

impl<T> EvidenceBuffer<T> {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Store `reading` as the valid pending reading.
    ///
    /// Returns the unconsumed reading it replaced, if any.
    pub fn put(&mut self, reading: T) -> Option<T> {
        self.pending.replace(reading)
    }

    /// Consume the pending reading. Subsequent calls return `None` until
    /// the next [`put`](Self::put).
    pub fn take_if_valid(&mut self) -> Option<T> {
        self.pending.take()
    }

    pub fn is_valid(&self) -> bool {
        self.pending.is_some()
    }

    pub fn peek(&self) -> Option<&T> {
        self.pending.as_ref()
    }
}

impl<T> Default for EvidenceBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer_yields_nothing() {
        let mut buffer: EvidenceBuffer<u32> = EvidenceBuffer::new();
        assert!(!buffer.is_valid());
        assert_eq!(buffer.take_if_valid(), None);
    }

    #[test]
    fn test_latest_reading_wins() {
        let mut buffer = EvidenceBuffer::new();
        assert_eq!(buffer.put("a"), None);
        assert_eq!(buffer.put("b"), Some("a"));

        assert_eq!(buffer.peek(), Some(&"b"));
        assert_eq!(buffer.take_if_valid(), Some("b"));
    }

    #[test]
    fn test_reading_is_consumed_once() {
        let mut buffer = EvidenceBuffer::new();
        buffer.put(1);

        assert_eq!(buffer.take_if_valid(), Some(1));
        assert_eq!(buffer.take_if_valid(), None);
        assert!(!buffer.is_valid());
    }
}
