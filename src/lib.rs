//! guiterm - a GUI wrapper around an interactive command shell
//!
//! guiterm starts the platform command interpreter (`cmd` on Windows, `sh` elsewhere), shows
//! its merged stdout/stderr in a scrolling text pane and sends commands typed into an input
//! line. A sidebar offers command templates: pick one, choose an option from its dropdown,
//! select the paths it needs with the folder picker, and execute it.
//!
//! # Architecture Overview
//!
//! - **UI Layer** ([`app::termui`]): egui/eframe window with sidebar, terminal pane and
//!   floating windows
//! - **Shell** ([`app::shell_process`]): child process, reader threads and termination
//! - **Templates** ([`app::command_templates`]): the static command table and string composition
//! - **Settings** ([`app::settings`]): theme, font and shell configuration stored by eframe
//!
//! Everything runs on the egui event loop. Shell output arrives through reader threads and a
//! channel that the UI drains once per frame.

#![warn(clippy::all, rust_2018_idioms)]

// Include logging macros first
#[macro_use]
pub mod logging_macros;

pub mod app;
pub use app::TerminalApp;
