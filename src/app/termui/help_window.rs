use super::window_focus::FocusableWindow;
use crate::app::command_templates::CommandTable;
use eframe::egui;
use egui::{Context, RichText, Ui};

#[derive(Default)]
pub struct HelpWindow {
    pub open: bool,
}

impl HelpWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, ctx: &Context, table: &CommandTable, bring_to_front: bool) {
        if !self.open {
            return;
        }

        let available = ctx.available_rect().size();
        let window_width = available.x.min(560.0);
        let window_height = available.y.min(480.0);

        let mut window = egui::Window::new("Help")
            .open(&mut self.open)
            .default_size([window_width, window_height])
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .resizable(true)
            .collapsible(false);

        if bring_to_front {
            window = window.order(egui::Order::Foreground);
        }

        window.show(ctx, |ui| {
            Self::ui_content(ui, table);
        });
    }

    fn ui_content(ui: &mut Ui, table: &CommandTable) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.heading("Using the terminal");
            ui.add_space(5.0);
            ui.label("Type a command in the input line and press Enter to send it to the shell.");
            ui.horizontal(|ui| {
                ui.label(RichText::new("↑ / ↓").strong());
                ui.label("- Recall previous commands");
            });
            ui.horizontal(|ui| {
                ui.label(RichText::new("Clear").strong());
                ui.label("- Reset the display to the current prompt");
            });

            ui.add_space(15.0);
            ui.heading("Command templates");
            ui.add_space(5.0);
            ui.label("Pick a template in the sidebar, choose an option, select any paths it needs and press Execute.");
            ui.add_space(10.0);

            egui::Grid::new("help_templates")
                .num_columns(4)
                .striped(true)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Command").strong());
                    ui.label(RichText::new("Options").strong());
                    ui.label(RichText::new("Paths").strong());
                    ui.label(RichText::new("Description").strong());
                    ui.end_row();

                    for template in table.iter() {
                        let options: Vec<&str> = template
                            .options
                            .iter()
                            .map(|o| if o.is_empty() { "(none)" } else { *o })
                            .collect();
                        ui.monospace(template.name);
                        ui.monospace(options.join(", "));
                        ui.label(template.path_count.to_string());
                        ui.label(template.description);
                        ui.end_row();
                    }
                });

            ui.add_space(15.0);
            ui.label(
                RichText::new(format!(
                    "guiterm {} ({}, {})",
                    env!("CARGO_PKG_VERSION"),
                    env!("GIT_BRANCH"),
                    env!("GIT_COMMIT")
                ))
                .weak(),
            );
        });
    }
}

impl FocusableWindow for HelpWindow {
    type ShowParams = &'static CommandTable;

    fn window_id(&self) -> &'static str {
        "help_window"
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn show_with_focus(
        &mut self,
        ctx: &egui::Context,
        params: Self::ShowParams,
        bring_to_front: bool,
    ) {
        HelpWindow::show(self, ctx, params, bring_to_front);
    }
}
