use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Consistent user-facing messages. Colors only when the stream is a TTY.
/// Audit lines go to stdout untouched; everything else goes to stderr.
fn stderr_is_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

pub fn print_info(msg: &str) {
    if stderr_is_tty() {
        eprintln!("{} {}", "info:".cyan().bold(), msg);
    } else {
        eprintln!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if stderr_is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if stderr_is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

/// Print a plain line (no prefix) to stdout. Used to mirror audit log lines,
/// which users may script against. Unlike `println!`, a closed or broken
/// stdout comes back as an error instead of a panic.
pub fn print_user(msg: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{msg}")?;
    stdout.flush()
}
