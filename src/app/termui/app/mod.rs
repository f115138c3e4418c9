//! Modular implementation of TerminalApp
//!
//! - initialization: app creation from the eframe creation context
//! - theme: theme application
//! - shell: shell lifecycle, output polling and command submission
//! - event_handling: sidebar, folder picker and menu actions
//! - rendering: menu bar, status bar, sidebar and terminal panels

use super::command_sidebar::CommandSidebar;
use super::folder_picker::FolderPicker;
use super::help_window::HelpWindow;
use super::terminal_view::TerminalView;
use super::window_focus::WindowFocusManager;
use crate::app::settings::{Settings, ThemeChoice};
use crate::app::shell_process::ShellProcess;
use eframe::egui;

mod event_handling;
mod initialization;
mod rendering;
mod shell;
mod theme;

#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct TerminalApp {
    pub settings: Settings,

    #[serde(skip)]
    pub sidebar: CommandSidebar,
    #[serde(skip)]
    pub terminal: TerminalView,
    #[serde(skip)]
    shell: Option<ShellProcess>,
    #[serde(skip)]
    pub folder_picker: Option<FolderPicker>,
    #[serde(skip)]
    pub help_window: HelpWindow,
    #[serde(skip)]
    window_focus_manager: WindowFocusManager,
    #[serde(skip)]
    /// Most recent failure shown in the status bar
    last_error: Option<String>,
    #[serde(skip)]
    /// Set once the shell's exit has been written to the display
    exit_reported: bool,
    #[serde(skip)]
    /// Handed to reader threads so new output wakes the UI
    repaint_ctx: Option<egui::Context>,
    #[serde(skip)]
    applied_theme: Option<ThemeChoice>,
}

impl Default for TerminalApp {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            sidebar: CommandSidebar::default(),
            terminal: TerminalView::default(),
            shell: None,
            folder_picker: None,
            help_window: HelpWindow::new(),
            window_focus_manager: WindowFocusManager::new(),
            last_error: None,
            exit_reported: false,
            repaint_ctx: None,
            applied_theme: None,
        }
    }
}

impl TerminalApp {
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

impl eframe::App for TerminalApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_theme_if_changed(ctx);

        self.poll_shell();

        self.render_top_menu_bar(ctx);
        self.render_status_bar(ctx);
        self.render_sidebar(ctx);
        self.render_central_panel(ctx);

        self.handle_folder_picker(ctx);
        self.handle_help_window(ctx);

        self.handle_close_request(ctx);
    }
}
