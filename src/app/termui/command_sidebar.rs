//! Sidebar of command templates.
//!
//! The overview lists one button per template. Choosing one switches to its detail view,
//! which offers the option dropdown, a picker per path argument and the execute button.
//! Going back discards the detail state entirely.

use crate::app::command_templates::{CommandTable, CommandTemplate, BUILTIN_TEMPLATES};
use eframe::egui;
use egui::RichText;
use std::path::PathBuf;

/// What the user asked for while interacting with the sidebar this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum SidebarAction {
    /// Send this command line to the shell
    Execute(String),
    /// Open a picker to fill path slot `slot`
    PickPath { slot: usize, title: String },
    /// Clear the terminal display
    Clear,
}

#[derive(Debug, Clone, PartialEq)]
struct DetailState {
    name: &'static str,
    option_index: usize,
    paths: Vec<Option<PathBuf>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
enum SidebarView {
    #[default]
    Overview,
    Detail(DetailState),
}

pub struct CommandSidebar {
    table: CommandTable,
    view: SidebarView,
}

impl Default for CommandSidebar {
    fn default() -> Self {
        Self::new(BUILTIN_TEMPLATES.clone())
    }
}

impl CommandSidebar {
    pub fn new(table: CommandTable) -> Self {
        Self {
            table,
            view: SidebarView::Overview,
        }
    }

    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    /// Template whose detail view is showing, if any.
    pub fn selected(&self) -> Option<&CommandTemplate> {
        match &self.view {
            SidebarView::Detail(state) => self.table.get(state.name),
            SidebarView::Overview => None,
        }
    }

    pub fn is_overview(&self) -> bool {
        self.view == SidebarView::Overview
    }

    /// Names of the template buttons the overview shows.
    pub fn overview_buttons(&self) -> Vec<&'static str> {
        match self.view {
            SidebarView::Overview => self.table.names(),
            SidebarView::Detail(_) => Vec::new(),
        }
    }

    /// Switch to the detail view of `name`. Unknown names leave the sidebar untouched.
    pub fn select(&mut self, name: &str) {
        let Some(template) = self.table.get(name) else {
            tracing::warn!("Unknown command template '{}'", name);
            return;
        };
        tracing::debug!("Selected command template '{}'", template.name);
        self.view = SidebarView::Detail(DetailState {
            name: template.name,
            option_index: 0,
            paths: vec![None; template.path_count],
        });
    }

    pub fn back(&mut self) {
        self.view = SidebarView::Overview;
    }

    pub fn set_option(&mut self, index: usize) {
        let Some(count) = self.selected().map(|t| t.options.len()) else {
            return;
        };
        if let SidebarView::Detail(state) = &mut self.view {
            state.option_index = index.min(count.saturating_sub(1));
        }
    }

    pub fn selected_option(&self) -> Option<&'static str> {
        match &self.view {
            SidebarView::Detail(state) => self
                .table
                .get(state.name)
                .map(|t| t.option(state.option_index)),
            SidebarView::Overview => None,
        }
    }

    /// Fill path slot `slot` of the current detail view. Out-of-range slots are ignored.
    pub fn set_path(&mut self, slot: usize, path: PathBuf) {
        if let SidebarView::Detail(state) = &mut self.view {
            if let Some(entry) = state.paths.get_mut(slot) {
                *entry = Some(path);
            }
        }
    }

    pub fn path(&self, slot: usize) -> Option<&PathBuf> {
        match &self.view {
            SidebarView::Detail(state) => state.paths.get(slot).and_then(Option::as_ref),
            SidebarView::Overview => None,
        }
    }

    /// Command the execute button would send, or `None` while a path is still missing.
    pub fn pending_command(&self) -> Option<String> {
        let SidebarView::Detail(state) = &self.view else {
            return None;
        };
        let template = self.table.get(state.name)?;
        let paths: Option<Vec<&PathBuf>> = state.paths.iter().map(Option::as_ref).collect();
        Some(template.compose(template.option(state.option_index), &paths?))
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) -> Option<SidebarAction> {
        let mut action = None;

        egui::ScrollArea::vertical()
            .id_salt("command_sidebar")
            .auto_shrink([false, true])
            .show(ui, |ui| {
                if self.is_overview() {
                    self.overview_ui(ui);
                } else {
                    action = self.detail_ui(ui);
                }

                ui.add_space(12.0);
                ui.separator();
                if ui
                    .add_sized([ui.available_width(), 24.0], egui::Button::new("Clear"))
                    .on_hover_text("Clear the terminal display")
                    .clicked()
                {
                    action = Some(SidebarAction::Clear);
                }
            });

        action
    }

    fn overview_ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Commands");
        ui.add_space(6.0);

        let mut chosen = None;
        for template in self.table.iter() {
            let response = ui
                .add_sized([ui.available_width(), 24.0], egui::Button::new(template.name))
                .on_hover_text(template.description);
            if response.clicked() {
                chosen = Some(template.name);
            }
        }

        if let Some(name) = chosen {
            self.select(name);
        }
    }

    fn detail_ui(&mut self, ui: &mut egui::Ui) -> Option<SidebarAction> {
        let SidebarView::Detail(state) = &mut self.view else {
            return None;
        };
        let template = self.table.get(state.name)?;

        let mut action = None;
        let mut go_back = false;

        if ui.button("Back").clicked() {
            go_back = true;
        }

        ui.add_space(6.0);
        ui.label(RichText::new(template.name).heading().monospace());
        ui.add_space(6.0);

        ui.label("Option:");
        egui::ComboBox::from_id_salt(("command_option", template.name))
            .width(ui.available_width())
            .selected_text(option_label(template.option(state.option_index)))
            .show_ui(ui, |ui| {
                for (idx, option) in template.options.iter().enumerate() {
                    ui.selectable_value(&mut state.option_index, idx, option_label(option));
                }
            });

        for slot in 0..template.path_count {
            ui.add_space(6.0);
            let label = template.path_label(slot);
            ui.horizontal(|ui| {
                ui.label(format!("{}:", label));
                if ui.button("Browse…").clicked() {
                    action = Some(SidebarAction::PickPath {
                        slot,
                        title: format!("{}: select {}", template.name, label.to_lowercase()),
                    });
                }
            });
            match state.paths.get(slot).and_then(Option::as_ref) {
                Some(path) => ui.label(RichText::new(path.display().to_string()).monospace()),
                None => ui.label(RichText::new("(not selected)").weak()),
            };
        }

        ui.add_space(10.0);
        let paths: Option<Vec<&PathBuf>> = state.paths.iter().map(Option::as_ref).collect();
        let command = paths.map(|paths| template.compose(template.option(state.option_index), &paths));

        if let Some(command) = &command {
            ui.label(RichText::new(command).monospace().weak());
        }

        let execute = ui
            .add_enabled(
                command.is_some(),
                egui::Button::new("Execute").min_size(egui::vec2(ui.available_width(), 24.0)),
            )
            .on_disabled_hover_text("Select every path first");
        if execute.clicked() {
            if let Some(command) = command {
                action = Some(SidebarAction::Execute(command));
            }
        }

        ui.add_space(10.0);
        ui.label(template.description);

        if go_back {
            self.back();
        }
        action
    }
}

fn option_label(option: &str) -> String {
    if option.is_empty() {
        "(none)".to_string()
    } else {
        option.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::command_templates::POSIX_TEMPLATES;
    use pretty_assertions::assert_eq;

    fn sidebar() -> CommandSidebar {
        CommandSidebar::new(CommandTable::from_templates(POSIX_TEMPLATES.iter().cloned()).unwrap())
    }

    #[test]
    fn test_select_then_back_restores_overview() {
        let mut sidebar = sidebar();
        let before = sidebar.overview_buttons();

        sidebar.select("cp");
        assert!(!sidebar.is_overview());
        assert!(sidebar.overview_buttons().is_empty());
        sidebar.set_path(0, PathBuf::from("/a"));

        sidebar.back();
        assert_eq!(sidebar.overview_buttons(), before);
        assert!(sidebar.selected().is_none());
        assert!(sidebar.path(0).is_none());
    }

    #[test]
    fn test_repeated_select_back_never_duplicates() {
        let mut sidebar = sidebar();
        let before = sidebar.overview_buttons();
        for template in POSIX_TEMPLATES {
            sidebar.select(template.name);
            sidebar.back();
        }
        assert_eq!(sidebar.overview_buttons(), before);
    }

    #[test]
    fn test_unknown_template_ignored() {
        let mut sidebar = sidebar();
        sidebar.select("format-c");
        assert!(sidebar.is_overview());
    }

    #[test]
    fn test_pending_command_requires_all_paths() {
        let mut sidebar = sidebar();
        sidebar.select("cp");
        sidebar.set_option(1);
        assert_eq!(sidebar.pending_command(), None);

        sidebar.set_path(0, PathBuf::from("/src/a.txt"));
        assert_eq!(sidebar.pending_command(), None);

        sidebar.set_path(1, PathBuf::from("/dst"));
        assert_eq!(
            sidebar.pending_command().as_deref(),
            Some("cp -r /src/a.txt /dst")
        );
    }

    #[test]
    fn test_command_without_paths_ready_immediately() {
        let mut sidebar = sidebar();
        sidebar.select("ls");
        assert_eq!(sidebar.pending_command().as_deref(), Some("ls -l"));
        sidebar.set_option(2);
        assert_eq!(sidebar.pending_command().as_deref(), Some("ls -la"));
    }

    #[test]
    fn test_set_option_clamped() {
        let mut sidebar = sidebar();
        sidebar.select("df");
        sidebar.set_option(99);
        assert_eq!(sidebar.selected_option(), Some("-T"));
    }

    #[test]
    fn test_set_path_out_of_range_ignored() {
        let mut sidebar = sidebar();
        sidebar.select("cat");
        sidebar.set_path(5, PathBuf::from("/etc/hosts"));
        assert_eq!(sidebar.pending_command(), None);
    }

    #[test]
    fn test_reselect_resets_detail_state() {
        let mut sidebar = sidebar();
        sidebar.select("cat");
        sidebar.set_option(1);
        sidebar.set_path(0, PathBuf::from("/etc/hosts"));
        sidebar.back();
        sidebar.select("cat");
        assert_eq!(sidebar.selected_option(), Some(""));
        assert!(sidebar.path(0).is_none());
    }
}
