/// A trait for reporting progress of the page walk.
pub trait Progress: Send + Sync {
    /// Set the phase label for the current operation (e.g., "Probing", "Fetching").
    fn set_phase(&self, phase: &str);

    /// Report that `current` of `total` pages are being fetched, with a status message.
    fn set_position(&self, current: u64, total: u64, message: &str);

    /// Print a message line without disrupting the progress indicator.
    fn println(&self, msg: &str);

    /// Finish and clear the progress indicator.
    fn done(&self);
}

/// Progress sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn set_phase(&self, _phase: &str) {}
    fn set_position(&self, _current: u64, _total: u64, _message: &str) {}
    fn println(&self, _msg: &str) {}
    fn done(&self) {}
}
