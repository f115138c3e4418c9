use crate::app::settings::{Settings, ThemeChoice, MAX_FONT_SIZE, MIN_FONT_SIZE};
use eframe::egui;
use egui::RichText;

#[derive(Debug, PartialEq)]
pub enum MenuAction {
    None,
    RestartShell,
    ClearDisplay,
    ThemeChanged,
    SettingsChanged,
    ShowHelp,
    Quit,
}

pub fn build_menu(ui: &mut egui::Ui, settings: &mut Settings) -> MenuAction {
    let mut menu_action = MenuAction::None;

    ui.menu_button("Shell", |ui| {
        if ui.button("Restart shell").clicked() {
            menu_action = MenuAction::RestartShell;
        }
        if ui.button("Clear display").clicked() {
            menu_action = MenuAction::ClearDisplay;
        }
        ui.separator();
        if ui.button("Quit").clicked() {
            menu_action = MenuAction::Quit;
        }
    });

    ui.menu_button(RichText::new("🎨").size(18.0), |ui| {
        for theme in ThemeChoice::ALL {
            if ui
                .selectable_label(settings.theme == theme, theme.to_string())
                .clicked()
            {
                settings.theme = theme;
                menu_action = MenuAction::ThemeChanged;
            }
        }
    });

    ui.menu_button("Settings", |ui| {
        let original = settings.clone();

        ui.horizontal(|ui| {
            ui.label("Font size:");
            ui.add(egui::Slider::new(
                &mut settings.font_size,
                MIN_FONT_SIZE..=MAX_FONT_SIZE,
            ));
        });
        ui.checkbox(&mut settings.local_echo, "Echo commands in display");
        ui.separator();
        ui.label(RichText::new(format!("Shell: {}", settings.shell.display_command())).weak());

        if *settings != original {
            menu_action = MenuAction::SettingsChanged;
        }
    });

    if ui.button("Help").clicked() {
        menu_action = MenuAction::ShowHelp;
    }

    menu_action
}
