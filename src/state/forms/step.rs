//! Step index tracking for multi-step forms

/// Current step of a form with a fixed number of steps.
///
/// Every move is clamped into `[0, total - 1]`, so out-of-range requests
/// are no-ops rather than errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepController {
    current: usize,
    total: usize,
}

impl StepController {
    /// Create a controller at step 0. A `total` of 0 is treated as 1.
    pub fn new(total: usize) -> Self {
        Self {
            current: 0,
            total: total.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    fn last(&self) -> usize {
        self.total - 1
    }

    pub fn next_step(&mut self) {
        self.current = (self.current + 1).min(self.last());
    }

    pub fn prev_step(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    pub fn go_to_step(&mut self, step: isize) {
        self.current = if step <= 0 {
            0
        } else {
            (step as usize).min(self.last())
        };
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }

    pub fn is_first_step(&self) -> bool {
        self.current == 0
    }

    pub fn is_last_step(&self) -> bool {
        self.current == self.last()
    }

    /// Completion in percent, 100 for single-step forms
    pub fn progress(&self) -> f64 {
        if self.total > 1 {
            self.current as f64 / self.last() as f64 * 100.0
        } else {
            100.0
        }
    }

    /// Progress rounded for gauge widgets
    pub fn progress_percent(&self) -> u16 {
        self.progress().round() as u16
    }
}
