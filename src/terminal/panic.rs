//! Panic hook: write the panic to the log, then give the terminal back.
//!
//! While the TUI owns the alternate screen a panic message printed to stderr
//! is wiped when the screen is left, so the log file is the only place it
//! reliably survives.

use std::any::Any;
use std::panic;

use super::setup::emergency_restore;

/// Install the hook in front of whatever hook is already set (color-eyre's,
/// when called after `color_eyre::install`).
pub fn setup_panic_hook() {
    let previous = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_default();
        tracing::error!(%location, "panic: {}", payload_text(info.payload()));

        emergency_restore();
        previous(info);
    }));
}

/// The message carried by a panic payload, for `panic!` with a literal or a
/// formatted string.
fn payload_text(payload: &(dyn Any + Send)) -> &str {
    if let Some(text) = payload.downcast_ref::<&str>() {
        text
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.as_str()
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_text_literal_and_formatted() {
        let literal: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(payload_text(literal.as_ref()), "boom");

        let formatted: Box<dyn Any + Send> = Box::new(format!("index {}", 3));
        assert_eq!(payload_text(formatted.as_ref()), "index 3");

        let other: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(payload_text(other.as_ref()), "non-string panic payload");
    }

    #[test]
    fn test_payload_text_from_caught_panic() {
        let caught = panic::catch_unwind(|| panic!("lost {}", "reply")).unwrap_err();
        assert_eq!(payload_text(caught.as_ref()), "lost reply");
    }
}
