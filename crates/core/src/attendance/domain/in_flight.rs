use std::sync::atomic::{AtomicBool, Ordering};

/// Busy flag that admits one request at a time.
///
/// [`InFlight::try_begin`] hands out a token; the flag clears when the
/// token drops, including on early return or panic.
#[derive(Debug, Default)]
pub struct InFlight {
    busy: AtomicBool,
}

/// Held for the duration of one request.
#[derive(Debug)]
pub struct InFlightToken<'a> {
    busy: &'a AtomicBool,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the flag, or returns `None` if a request is already running.
    pub fn try_begin(&self) -> Option<InFlightToken<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightToken { busy: &self.busy })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for InFlightToken<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
