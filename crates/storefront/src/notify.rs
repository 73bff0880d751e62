//! Busy indicator and result dialogs.
//!
//! A notifier holds at most one open dialog. Opening a dialog replaces the
//! one that was open; the busy indicator is just another dialog that blocks
//! interaction while a request is in flight.
//!
//! Controllers bracket every request with a [`BusyGuard`], so the busy
//! indicator is closed on every exit path, including when the operation
//! future is dropped mid-request.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

/// A dialog the page can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    /// Blocking "loading" modal. Outside clicks do not dismiss it.
    Busy,
    /// Transient confirmation after a successful action.
    Success { message: String },
    /// Failure report: a fixed title plus the raw failure detail.
    Error {
        title: String,
        detail: Option<String>,
    },
}

impl Dialog {
    /// Whether this dialog blocks interaction with the page.
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        matches!(self, Self::Busy)
    }
}

/// Presentation of busy state and operation results.
pub trait Notifier: Send + Sync {
    /// Open the blocking loading indicator.
    fn show_busy(&self);

    /// Close the loading indicator if it is open. Closing nothing is a no-op.
    fn hide_busy(&self);

    /// Report a successful action.
    fn notify_success(&self, message: &str);

    /// Report a failed action.
    fn notify_error(&self, title: &str, detail: Option<&str>);
}

/// Closes the busy indicator when dropped.
#[must_use = "the busy indicator closes as soon as the guard is dropped"]
pub struct BusyGuard<N: Notifier + ?Sized> {
    notifier: Arc<N>,
}

impl<N: Notifier + ?Sized> BusyGuard<N> {
    /// Open the busy indicator and return a guard that closes it.
    pub fn enter(notifier: Arc<N>) -> Self {
        notifier.show_busy();
        Self { notifier }
    }
}

impl<N: Notifier + ?Sized> Drop for BusyGuard<N> {
    fn drop(&mut self) {
        self.notifier.hide_busy();
    }
}

/// Single-slot dialog state, rendered into the page by the host.
#[derive(Debug, Default)]
pub struct DialogNotifier {
    open: Mutex<Option<Dialog>>,
}

impl DialogNotifier {
    /// Create a notifier with nothing open.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The dialog currently open, if any.
    #[must_use]
    pub fn current(&self) -> Option<Dialog> {
        self.slot().clone()
    }

    /// Close and return the open dialog.
    ///
    /// The host calls this after showing a result dialog once.
    pub fn dismiss(&self) -> Option<Dialog> {
        self.slot().take()
    }

    fn open(&self, dialog: Dialog) {
        debug!(?dialog, "Opening dialog");
        *self.slot() = Some(dialog);
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<Dialog>> {
        // Dialog state stays usable even if a holder panicked
        self.open.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Notifier for DialogNotifier {
    fn show_busy(&self) {
        self.open(Dialog::Busy);
    }

    fn hide_busy(&self) {
        let mut slot = self.slot();
        if slot.as_ref().is_some_and(Dialog::is_blocking) {
            *slot = None;
        }
    }

    fn notify_success(&self, message: &str) {
        self.open(Dialog::Success {
            message: message.to_string(),
        });
    }

    fn notify_error(&self, title: &str, detail: Option<&str>) {
        self.open(Dialog::Error {
            title: title.to_string(),
            detail: detail.map(String::from),
        });
    }
}
