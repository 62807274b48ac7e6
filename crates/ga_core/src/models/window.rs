use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Minute range selected for an analysis, `low <= high`.
///
/// The network and positional pipelines use the exclusive test
/// (`low < minute < high`); the player report uses the inclusive one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinuteWindow {
    low: u32,
    high: u32,
}

impl MinuteWindow {
    pub fn new(low: u32, high: u32) -> Result<Self> {
        if low > high {
            return Err(AnalysisError::InvalidWindow { low, high });
        }
        Ok(Self { low, high })
    }

    /// Whole match: `0..=max_minute`.
    pub fn full_match(max_minute: u32) -> Self {
        Self {
            low: 0,
            high: max_minute,
        }
    }

    pub fn low(&self) -> u32 {
        self.low
    }

    pub fn high(&self) -> u32 {
        self.high
    }

    pub fn contains_exclusive(&self, minute: u32) -> bool {
        minute > self.low && minute < self.high
    }

    pub fn contains_inclusive(&self, minute: u32) -> bool {
        minute >= self.low && minute <= self.high
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_inverted_window() {
        assert!(matches!(
            MinuteWindow::new(50, 10),
            Err(AnalysisError::InvalidWindow { low: 50, high: 10 })
        ));
    }

    #[test]
    fn test_bounds() {
        let w = MinuteWindow::new(10, 20).unwrap();
        assert!(!w.contains_exclusive(10));
        assert!(w.contains_exclusive(11));
        assert!(!w.contains_exclusive(20));
        assert!(w.contains_inclusive(10));
        assert!(w.contains_inclusive(20));
    }

    #[test]
    fn test_degenerate_window_is_empty() {
        let w = MinuteWindow::new(30, 30).unwrap();
        assert!(!w.contains_exclusive(30));
        assert!(w.contains_inclusive(30));
    }
}
