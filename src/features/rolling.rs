//! Trailing-window mean over a stream of optional samples
//!
//! Single pass, O(1) per push. The running sum is kept relative to an
//! anchor value (the first sample seen), so a flat signal produces exactly
//! its own value as the mean and a trend of exactly 1.0. The sum is rebuilt
//! from the buffer once per `window` evictions to bound floating-point drift.

use std::collections::VecDeque;

/// Trailing simple moving average over the last `window` samples.
///
/// The mean is defined only when the window is full and holds no gaps.
#[derive(Debug, Clone)]
pub struct RollingMean {
    window: usize,
    buffer: VecDeque<Option<f64>>,
    anchor: Option<f64>,
    /// Sum of (value - anchor) over present samples in the buffer
    shifted_sum: f64,
    gaps: usize,
    evictions: usize,
}

impl RollingMean {
    /// `window` must be at least 1; callers validate it.
    pub fn new(window: usize) -> Self {
        Self {
            window,
            buffer: VecDeque::with_capacity(window),
            anchor: None,
            shifted_sum: 0.0,
            gaps: 0,
            evictions: 0,
        }
    }

    /// Push the next sample and return the trailing mean including it.
    pub fn push(&mut self, value: Option<f64>) -> Option<f64> {
        if self.buffer.len() == self.window {
            self.evict();
        }

        match value {
            Some(v) => {
                let anchor = *self.anchor.get_or_insert(v);
                self.shifted_sum += v - anchor;
            }
            None => self.gaps += 1,
        }
        self.buffer.push_back(value);

        self.mean()
    }

    /// Current trailing mean, if the window is full and gap-free.
    pub fn mean(&self) -> Option<f64> {
        if self.buffer.len() < self.window || self.gaps > 0 {
            return None;
        }
        let anchor = self.anchor?;
        Some(anchor + self.shifted_sum / self.window as f64)
    }

    fn evict(&mut self) {
        match self.buffer.pop_front().flatten() {
            Some(old) => {
                if let Some(anchor) = self.anchor {
                    self.shifted_sum -= old - anchor;
                }
            }
            None => self.gaps = self.gaps.saturating_sub(1),
        }

        self.evictions += 1;
        if self.evictions >= self.window {
            self.resync();
        }
    }

    fn resync(&mut self) {
        self.evictions = 0;
        self.shifted_sum = match self.anchor {
            Some(anchor) => self.buffer.iter().flatten().map(|v| v - anchor).sum(),
            None => 0.0,
        };
    }
}
