//! Sidebar, folder picker and menu action handling

use super::TerminalApp;
use crate::app::command_templates::BUILTIN_TEMPLATES;
use crate::app::termui::command_sidebar::SidebarAction;
use crate::app::termui::folder_picker::{FolderPicker, FolderPickerStatus};
use crate::app::termui::menu::MenuAction;
use crate::app::termui::window_focus::FocusableWindow;
use eframe::egui;

impl TerminalApp {
    pub fn handle_sidebar_action(&mut self, action: SidebarAction) {
        match action {
            SidebarAction::Execute(command) => {
                self.send_command(&command);
                self.terminal.focus_input();
            }
            SidebarAction::PickPath { slot, title } => {
                // Start next to whatever the slot already holds
                let start_dir = self
                    .sidebar
                    .path(slot)
                    .and_then(|p| {
                        if p.is_dir() {
                            Some(p.clone())
                        } else {
                            p.parent().map(|dir| dir.to_path_buf())
                        }
                    })
                    .or_else(|| std::env::current_dir().ok());
                let picker = FolderPicker::new(slot, title, start_dir);
                self.window_focus_manager.request_focus(picker.window_id());
                self.folder_picker = Some(picker);
            }
            SidebarAction::Clear => {
                trace_debug!("Clearing terminal display");
                self.terminal.clear();
            }
        }
    }

    pub(super) fn handle_menu_action(&mut self, action: MenuAction, ctx: &egui::Context) {
        match action {
            MenuAction::RestartShell => self.restart_shell(),
            MenuAction::ClearDisplay => self.terminal.clear(),
            MenuAction::ThemeChanged => {
                trace_info!("Theme changed to {}", self.settings.theme);
                self.apply_theme_if_changed(ctx);
            }
            MenuAction::SettingsChanged => {
                tracing::debug!(
                    "Settings changed: font size {}, local echo {}",
                    self.settings.font_size,
                    self.settings.local_echo
                );
            }
            MenuAction::ShowHelp => {
                self.help_window.open = true;
                self.window_focus_manager
                    .request_focus(self.help_window.window_id());
            }
            MenuAction::Quit => {
                tracing::info!("Quit requested from menu");
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            MenuAction::None => {}
        }
    }

    /// Show the folder picker and hand a finished selection to the sidebar
    pub(super) fn handle_folder_picker(&mut self, ctx: &egui::Context) {
        let Some(picker) = self.folder_picker.as_mut() else {
            return;
        };

        self.window_focus_manager.show(picker, ctx, ());

        match &picker.status {
            FolderPickerStatus::Open => {}
            FolderPickerStatus::Selected(path) => {
                log_debug!("Path slot {} set to {}", picker.slot, path.display());
                self.sidebar.set_path(picker.slot, path.clone());
                self.folder_picker = None;
            }
            FolderPickerStatus::Cancelled => {
                self.folder_picker = None;
            }
        }
    }

    pub(super) fn handle_help_window(&mut self, ctx: &egui::Context) {
        self.window_focus_manager
            .show(&mut self.help_window, ctx, &*BUILTIN_TEMPLATES);
    }
}
