//! Core application modules for guiterm.
//!
//! # Module Organization
//!
//! - [`command_templates`] - Static table of command templates and command-line composition
//! - [`shell_process`] - Child shell with merged output and lifecycle management
//! - [`output_decoder`] - Incremental UTF-8 decoding of the shell output
//! - [`settings`] - Persisted user settings (theme, font size, shell)
//! - [`termui`] - egui user interface

pub mod command_templates;
pub mod output_decoder;
pub mod settings;
pub mod shell_process;
pub mod termui;

pub use termui::app::TerminalApp;
