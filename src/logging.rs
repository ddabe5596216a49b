use std::fmt;

use log::Level;

const TARGET: &str = "othello";

/// Logging handle passed to the components that report diagnostics.
///
/// Records go to the `log` facade; a disabled handle drops them before
/// formatting. Installing a backend is up to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Logger {
    enabled: bool,
}

impl Logger {
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub const fn disabled() -> Self {
        Self::new(false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Info, args);
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Debug, args);
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Warn, args);
    }

    fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        if self.enabled && log::log_enabled!(target: TARGET, level) {
            log::log!(target: TARGET, level, "{args}");
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(true)
    }
}
