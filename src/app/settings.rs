//! User settings persisted through eframe storage.
//!
//! Settings are stored as part of the app state under `eframe::APP_KEY`. Every field has a
//! default so that state written by an older build still loads.

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ThemeChoice {
    Latte,
    Frappe,
    Macchiato,
    #[default]
    Mocha,
}

impl ThemeChoice {
    pub const ALL: [ThemeChoice; 4] = [
        ThemeChoice::Latte,
        ThemeChoice::Frappe,
        ThemeChoice::Macchiato,
        ThemeChoice::Mocha,
    ];

    pub fn palette(self) -> catppuccin_egui::Theme {
        match self {
            ThemeChoice::Latte => catppuccin_egui::LATTE,
            ThemeChoice::Frappe => catppuccin_egui::FRAPPE,
            ThemeChoice::Macchiato => catppuccin_egui::MACCHIATO,
            ThemeChoice::Mocha => catppuccin_egui::MOCHA,
        }
    }
}

impl std::fmt::Display for ThemeChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeChoice::Latte => write!(f, "Latte"),
            ThemeChoice::Frappe => write!(f, "Frappe"),
            ThemeChoice::Macchiato => write!(f, "Macchiato"),
            ThemeChoice::Mocha => write!(f, "Mocha"),
        }
    }
}

/// Which shell to start and how to terminate the lines written to it.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct ShellConfig {
    pub program: String,
    pub args: Vec<String>,
    pub line_ending: String,
    /// Exported as `PS1` so a POSIX shell prompt carries the working directory.
    pub prompt: Option<String>,
}

impl Default for ShellConfig {
    #[cfg(windows)]
    fn default() -> Self {
        Self {
            program: "cmd".to_string(),
            args: Vec::new(),
            line_ending: "\r\n".to_string(),
            prompt: None,
        }
    }

    #[cfg(not(windows))]
    fn default() -> Self {
        Self {
            program: "sh".to_string(),
            args: vec!["-i".to_string()],
            line_ending: "\n".to_string(),
            prompt: Some("$PWD$ ".to_string()),
        }
    }
}

impl ShellConfig {
    /// Program and arguments as shown in the status bar.
    pub fn display_command(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

pub const MIN_FONT_SIZE: f32 = 8.0;
pub const MAX_FONT_SIZE: f32 = 32.0;

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub theme: ThemeChoice,
    /// Monospace font size of the terminal display.
    pub font_size: f32,
    /// Echo submitted commands into the display. `cmd` echoes by itself, `sh` does not.
    pub local_echo: bool,
    pub shell: ShellConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: ThemeChoice::default(),
            font_size: 13.0,
            local_echo: !cfg!(windows),
            shell: ShellConfig::default(),
        }
    }
}

impl Settings {
    pub fn clamped_font_size(&self) -> f32 {
        self.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
    }
}
