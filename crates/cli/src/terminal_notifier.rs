use rollcall_core::attendance::domain::notifier::Notifier;

/// Prints toasts to the terminal: successes on stdout, errors on stderr.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn success(&self, message: &str) {
        println!("✓ {message}");
    }

    fn error(&self, message: &str) {
        eprintln!("✗ {message}");
    }
}
