//! Theme management

use super::TerminalApp;
use eframe::egui;

impl TerminalApp {
    /// Apply the selected theme when it differs from the one last applied
    pub(super) fn apply_theme_if_changed(&mut self, ctx: &egui::Context) {
        if self.applied_theme == Some(self.settings.theme) {
            return;
        }

        catppuccin_egui::set_theme(ctx, self.settings.theme.palette());

        // Square-ish window corners
        let mut style = (*ctx.style()).clone();
        style.visuals.window_corner_radius = egui::CornerRadius::same(2);
        ctx.set_style(style);

        self.applied_theme = Some(self.settings.theme);
        tracing::debug!("Applied theme {}", self.settings.theme);
    }

    /// Background and text colours of the terminal display
    pub(super) fn terminal_colors(&self) -> (egui::Color32, egui::Color32) {
        let palette = self.settings.theme.palette();
        (palette.crust, palette.text)
    }
}
