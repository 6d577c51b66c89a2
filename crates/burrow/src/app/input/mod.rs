//! Input event handling.
//!
//! Routes key events to the handler for whatever currently owns the
//! keyboard: an overlay, the command line, the shell or the browser.

mod browse;
mod command;
mod event;
mod overlay;
mod shell;

#[cfg(test)]
mod tests;

pub use event::handle_event;
pub use shell::{start_shell, sync_shell_size};
