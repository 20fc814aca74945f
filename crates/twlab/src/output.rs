use std::io::{self, Write};

/// Writes one line to stdout; JSON and text reports share it
pub fn print_line(s: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{s}")
}
