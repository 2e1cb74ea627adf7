//! Copying the generated message to the clipboard.
//!
//! The system clipboard (through `arboard`) is tried first on a detached
//! worker thread, bounded by [`PRIMARY_TIMEOUT`]. A worker that never returns
//! is abandoned and does not hold up runtime shutdown. If it is unavailable, refuses the
//! write, or hangs, the text is copied through the terminal instead with an
//! OSC 52 escape sequence, which most terminal emulators turn into a
//! selection. Either way the user gets a [`Flash`] confirmation that
//! disappears after [`CONFIRMATION_WINDOW`].

use std::io::Write;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tokio::sync::oneshot;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};

/// How long the system clipboard may take before the fallback is used.
pub const PRIMARY_TIMEOUT: Duration = Duration::from_secs(2);

/// How long a copy confirmation stays visible.
pub const CONFIRMATION_WINDOW: Duration = Duration::from_secs(3);

/// Something that can take text and put it where the user can paste it.
pub trait ClipboardBackend {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Stores `text`.
    fn set_text(&mut self, text: &str) -> Result<(), String>;
}

/// The desktop clipboard.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl ClipboardBackend for SystemClipboard {
    fn name(&self) -> &'static str {
        "system"
    }

    fn set_text(&mut self, text: &str) -> Result<(), String> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| format!("failed to access clipboard: {}", e))?;
        clipboard
            .set_text(text)
            .map_err(|e| format!("failed to copy to clipboard: {}", e))
    }
}

/// Copies through the terminal emulator using OSC 52.
#[derive(Debug)]
pub struct TerminalClipboard<W: Write> {
    out: W,
}

impl TerminalClipboard<std::io::Stderr> {
    /// Writes the escape sequence to stderr, which stays attached to the
    /// terminal when stdout is piped.
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write> TerminalClipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ClipboardBackend for TerminalClipboard<W> {
    fn name(&self) -> &'static str {
        "terminal"
    }

    fn set_text(&mut self, text: &str) -> Result<(), String> {
        write!(self.out, "{}", osc52_sequence(text))
            .and_then(|()| self.out.flush())
            .map_err(|e| format!("failed to write to terminal: {}", e))
    }
}

/// The OSC 52 "set clipboard" sequence for `text`.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

/// Which mechanism ended up holding the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMethod {
    System,
    Terminal,
}

impl CopyMethod {
    /// Confirmation shown to the user.
    pub fn confirmation(&self) -> &'static str {
        match self {
            Self::System => "✓ Message copied to the clipboard",
            Self::Terminal => "✓ Message copied via the terminal",
        }
    }
}

/// Copies `text`, trying `primary` first and `fallback` if it fails or
/// exceeds `timeout`.
///
/// # Errors
///
/// Returns [`ClientError::Clipboard`] only when both mechanisms fail.
pub async fn copy_with_fallback<P, F>(
    primary: P,
    fallback: &mut F,
    text: &str,
    timeout: Duration,
) -> ClientResult<CopyMethod>
where
    P: ClipboardBackend + Send + 'static,
    F: ClipboardBackend + ?Sized,
{
    let name = primary.name();
    let primary_error = match spawn_primary(primary, text) {
        Ok(done) => match tokio::time::timeout(timeout, done).await {
            Ok(Ok(Ok(()))) => {
                info!(backend = name, bytes = text.len(), "copied message");
                return Ok(CopyMethod::System);
            }
            Ok(Ok(Err(e))) => e,
            Ok(Err(_)) => "clipboard worker exited without a result".to_string(),
            Err(_) => format!("clipboard did not respond within {:?}", timeout),
        },
        Err(e) => format!("failed to start clipboard worker: {}", e),
    };

    warn!(backend = name, error = %primary_error, "primary copy failed, using fallback");

    fallback.set_text(text).map_err(|fallback_error| {
        ClientError::Clipboard(format!("{}; fallback: {}", primary_error, fallback_error))
    })?;
    debug!(backend = fallback.name(), "copied via fallback");
    Ok(CopyMethod::Terminal)
}

/// Runs `primary` on its own thread. The thread is never joined.
fn spawn_primary<P>(
    primary: P,
    text: &str,
) -> std::io::Result<oneshot::Receiver<Result<(), String>>>
where
    P: ClipboardBackend + Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    let owned = text.to_string();
    std::thread::Builder::new()
        .name("meetzone-clipboard".into())
        .spawn(move || {
            let mut primary = primary;
            let _ = tx.send(primary.set_text(&owned));
        })?;
    Ok(rx)
}

/// The primary and fallback backends used for every copy in a run.
#[derive(Debug)]
pub struct Clipboards<P, F> {
    primary: P,
    fallback: F,
    timeout: Duration,
}

impl Clipboards<SystemClipboard, TerminalClipboard<std::io::Stderr>> {
    /// System clipboard with the OSC 52 fallback on stderr.
    pub fn system() -> Self {
        Self::new(SystemClipboard, TerminalClipboard::stderr(), PRIMARY_TIMEOUT)
    }
}

impl<P, F> Clipboards<P, F>
where
    P: ClipboardBackend + Clone + Send + 'static,
    F: ClipboardBackend,
{
    pub fn new(primary: P, fallback: F, timeout: Duration) -> Self {
        Self {
            primary,
            fallback,
            timeout,
        }
    }

    pub async fn copy(&mut self, text: &str) -> ClientResult<CopyMethod> {
        copy_with_fallback(self.primary.clone(), &mut self.fallback, text, self.timeout).await
    }
}

/// Copies `text` using the system clipboard with the terminal fallback.
pub async fn copy_message(text: &str) -> ClientResult<CopyMethod> {
    Clipboards::system().copy(text).await
}

/// A transient confirmation that reverts after a fixed window.
#[derive(Debug, Clone)]
pub struct Flash {
    message: String,
    expires_at: Instant,
}

impl Flash {
    /// Creates a flash visible from `now` for [`CONFIRMATION_WINDOW`].
    pub fn new(message: impl Into<String>, now: Instant) -> Self {
        Self {
            message: message.into(),
            expires_at: now + CONFIRMATION_WINDOW,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the flash should still be displayed at `now`.
    pub fn is_visible(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}
