//! Terminal detection for color output

use is_terminal::IsTerminal;
use std::env;
use std::io::stdout;

/// Whether colored output should be written to stdout
///
/// Requires an interactive terminal, honours `NO_COLOR` and refuses `TERM=dumb`.
pub fn use_color(color_enabled: bool) -> bool {
    if !color_enabled || !stdout().is_terminal() {
        return false;
    }
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }

    let term = env::var("TERM").unwrap_or_default();
    cfg!(windows) || !(term == "dumb" || term.is_empty())
}
