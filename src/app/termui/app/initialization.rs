//! App initialization

use super::TerminalApp;

impl TerminalApp {
    /// Create a TerminalApp from the creation context and start the shell
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app: Self = if let Some(storage) = cc.storage {
            eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default()
        } else {
            Self::default()
        };

        app.apply_theme_if_changed(&cc.egui_ctx);

        app.repaint_ctx = Some(cc.egui_ctx.clone());
        app.start_shell();

        app
    }
}
