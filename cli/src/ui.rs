use colored::Colorize;
use epic_mint::{Frontend, View};
use tracing::debug;

pub fn status(message: impl AsRef<str>) {
    eprintln!("{} {}", "==>".blue().bold(), message.as_ref());
}

pub fn success(message: impl AsRef<str>) {
    eprintln!("{} {}", "ok".green().bold(), message.as_ref());
}

pub fn warn(message: impl AsRef<str>) {
    eprintln!("{} {}", "warn".yellow().bold(), message.as_ref());
}

pub fn error(message: impl AsRef<str>) {
    eprintln!("{} {}", "error".red().bold(), message.as_ref());
}

pub fn alert(message: impl AsRef<str>) {
    eprintln!("{} {}", "alert".magenta().bold(), message.as_ref());
}

/// Prints the page on stdout.
pub fn print_view(view: &View) {
    println!("{view}");
}

/// Terminal front-end: alerts go to stderr right away, the page itself is
/// printed by the command once it is done.
#[derive(Debug, Default)]
pub struct Terminal;

impl Frontend for Terminal {
    fn alert(&mut self, message: &str) {
        alert(message);
    }

    fn render(&mut self, view: &View) {
        if view.action.disabled() {
            status(view.action.label());
        }
        debug!(counter = %view.counter, action = view.action.label(), "view updated");
    }
}
