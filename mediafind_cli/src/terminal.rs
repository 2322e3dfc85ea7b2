//! Terminal detection utilities

use is_terminal::IsTerminal;
use std::env;
use std::io::stdout;

/// Whether colored output should be produced
///
/// Color needs the config switch on, stdout attached to a terminal, and no
/// `NO_COLOR`/`TERM=dumb` in the environment.
pub fn use_color(color_enabled: bool) -> bool {
    if !color_enabled || !stdout().is_terminal() {
        return false;
    }
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }
    env::var("TERM").map(|t| t != "dumb").unwrap_or(true)
}
