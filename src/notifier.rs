//! Notification capability for the guide screen.
//!
//! The guide's "copy message" action needs clipboard/alert style side
//! effects. They live behind this trait so the session loop and the view
//! machinery stay free of platform-specific I/O.

use owo_colors::OwoColorize;

pub trait Notifier {
    /// Hand `text` to the user for copying.
    fn copy_text(&self, text: &str);
    /// Show a short, non-blocking message.
    fn notify(&self, message: &str);
}

/// Terminal notifier: prints the text to copy and the message to stdout.
pub struct TermNotifier;

impl Notifier for TermNotifier {
    fn copy_text(&self, text: &str) {
        println!("{}", text.bold());
    }

    fn notify(&self, message: &str) {
        println!("{}", message.dimmed());
    }
}
