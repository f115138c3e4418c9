//! UI rendering for the menu bar, status bar, sidebar and terminal panel

use super::TerminalApp;
use crate::app::termui::menu;
use eframe::egui;

impl TerminalApp {
    pub(super) fn render_top_menu_bar(&mut self, ctx: &egui::Context) {
        let mut menu_action = menu::MenuAction::None;
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                menu_action = menu::build_menu(ui, &mut self.settings);
            });
        });
        self.handle_menu_action(menu_action, ctx);
    }

    pub(super) fn render_status_bar(&mut self, ctx: &egui::Context) {
        let shell_command = self.settings.shell.display_command();
        let shell_state = self.shell_status_text();
        let last_error = self.last_error.clone();

        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.monospace(shell_command);
                    ui.separator();
                    ui.label(shell_state);
                    if let Some(error) = last_error {
                        ui.separator();
                        ui.colored_label(ui.visuals().error_fg_color, error);
                    }
                });
            });
    }

    pub(super) fn render_sidebar(&mut self, ctx: &egui::Context) {
        let mut action = None;
        egui::SidePanel::left("command_sidebar_panel")
            .resizable(true)
            .default_width(200.0)
            .min_width(150.0)
            .show(ctx, |ui| {
                action = self.sidebar.ui(ui);
            });

        if let Some(action) = action {
            self.handle_sidebar_action(action);
        }
    }

    pub(super) fn render_central_panel(&mut self, ctx: &egui::Context) {
        let (background, text) = self.terminal_colors();
        let font_size = self.settings.clamped_font_size();
        let frame = egui::Frame::central_panel(&ctx.style())
            .fill(background)
            .inner_margin(egui::Margin::same(6));

        let mut submitted = None;
        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            ui.visuals_mut().override_text_color = Some(text);
            submitted = self.terminal.ui(ui, font_size);
        });

        if let Some(line) = submitted {
            self.send_command(&line);
        }
    }
}
