use super::window_focus::FocusableWindow;
use eframe::egui;
use egui::{Color32, Context, Key, RichText, Window};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::path::{Path, PathBuf};

/// Status of the folder picker
#[derive(Debug, Clone, PartialEq)]
pub enum FolderPickerStatus {
    /// The picker is open and waiting for input
    Open,
    /// The picker was dismissed without a selection
    Cancelled,
    /// A path was selected
    Selected(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    name: String,
    is_dir: bool,
}

/// In-app browser used to fill a path argument of a command template.
///
/// Enter on a folder navigates into it. Accept takes the highlighted entry, file or folder,
/// or the folder being browsed when nothing is highlighted.
pub struct FolderPicker {
    pub status: FolderPickerStatus,
    /// Sidebar path slot this picker is filling
    pub slot: usize,
    title: String,
    current_dir: PathBuf,
    query: String,
    entries: Vec<Entry>,
    selected_index: Option<usize>,
    error_message: Option<String>,
    matcher: SkimMatcherV2,
}

impl FolderPicker {
    /// Open a picker for `slot`, starting in `start_dir` (or the home directory).
    pub fn new(slot: usize, title: impl Into<String>, start_dir: Option<PathBuf>) -> Self {
        let current_dir = start_dir
            .filter(|dir| dir.is_dir())
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("/"));

        let mut picker = Self {
            status: FolderPickerStatus::Open,
            slot,
            title: title.into(),
            current_dir,
            query: String::new(),
            entries: Vec::new(),
            selected_index: None,
            error_message: None,
            matcher: SkimMatcherV2::default(),
        };
        picker.refresh_entries();
        picker
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    fn refresh_entries(&mut self) {
        self.entries.clear();
        self.selected_index = None;
        self.error_message = None;

        let listing = match std::fs::read_dir(&self.current_dir) {
            Ok(listing) => listing,
            Err(e) => {
                self.error_message = Some(format!("Error reading directory: {}", e));
                return;
            }
        };

        // (score, entry); an empty query keeps everything with score 0
        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for entry in listing.flatten() {
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            let score = if self.query.is_empty() {
                0
            } else {
                match self.matcher.fuzzy_match(&name, &self.query) {
                    Some(score) => score,
                    None => continue,
                }
            };
            let is_dir = entry.path().is_dir();
            if is_dir {
                dirs.push((score, Entry { name, is_dir }));
            } else {
                files.push((score, Entry { name, is_dir }));
            }
        }

        for group in [&mut dirs, &mut files] {
            group.sort_by(|(score_a, a), (score_b, b)| {
                score_b
                    .cmp(score_a)
                    .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            });
        }
        self.entries.extend(dirs.into_iter().map(|(_, entry)| entry));
        self.entries.extend(files.into_iter().map(|(_, entry)| entry));

        if !self.entries.is_empty() {
            self.selected_index = Some(0);
        }
    }

    fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refresh_entries();
    }

    fn enter_dir(&mut self, name: &str) {
        let new_dir = self.current_dir.join(name);
        if new_dir.is_dir() {
            self.current_dir = new_dir;
            self.query.clear();
            self.refresh_entries();
        } else {
            self.error_message = Some(format!("Cannot access directory: {}", name));
        }
    }

    fn navigate_to_parent(&mut self) {
        if let Some(parent) = self.current_dir.parent() {
            self.current_dir = parent.to_path_buf();
            self.query.clear();
            self.refresh_entries();
        }
    }

    /// Enter key: open the highlighted folder, otherwise accept.
    fn activate_selection(&mut self) {
        let highlighted = self
            .selected_index
            .and_then(|idx| self.entries.get(idx))
            .cloned();
        match highlighted {
            Some(entry) if entry.is_dir => self.enter_dir(&entry.name),
            _ => self.accept(),
        }
    }

    fn accept(&mut self) {
        let path = self
            .selected_index
            .and_then(|idx| self.entries.get(idx))
            .map(|entry| self.current_dir.join(&entry.name))
            .unwrap_or_else(|| self.current_dir.clone());
        self.status = FolderPickerStatus::Selected(path);
    }

    fn accept_current_dir(&mut self) {
        self.status = FolderPickerStatus::Selected(self.current_dir.clone());
    }

    fn move_selection(&mut self, down: bool) {
        if self.entries.is_empty() {
            return;
        }
        let last = self.entries.len() - 1;
        self.selected_index = Some(match (self.selected_index, down) {
            (None, true) => 0,
            (None, false) => last,
            (Some(idx), true) => (idx + 1).min(last),
            (Some(idx), false) => idx.saturating_sub(1),
        });
    }

    pub fn show(&mut self, ctx: &Context, bring_to_front: bool) {
        if self.status != FolderPickerStatus::Open {
            return;
        }

        ctx.memory_mut(|mem| mem.request_focus(egui::Id::new("folder_search_field")));

        let screen_rect = ctx.screen_rect();
        let window_width = screen_rect.width() * 0.6;
        let window_height = screen_rect.height() * 0.6;

        let mut window = Window::new(self.title.clone())
            .id(egui::Id::new("folder_picker_window"))
            .default_pos(screen_rect.center() - egui::vec2(window_width, window_height) / 2.0)
            .fixed_size([window_width, window_height])
            .collapsible(false)
            .resizable(false);
        if bring_to_front {
            window = window.order(egui::Order::Foreground);
        }

        window.show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Current folder:");
                ui.label(RichText::new(self.current_dir.display().to_string()).strong());
            });

            ui.add_space(8.0);

            if let Some(error) = &self.error_message {
                ui.colored_label(Color32::RED, error);
                ui.add_space(8.0);
            }

            ui.horizontal(|ui| {
                ui.label("Search:");
                let mut query = self.query.clone();
                let response = ui.add_sized(
                    [ui.available_width(), ui.spacing().interact_size.y],
                    egui::TextEdit::singleline(&mut query).id(egui::Id::new("folder_search_field")),
                );
                if response.changed() {
                    self.set_query(query);
                }
            });

            ui.add_space(5.0);

            let mut folder_to_enter: Option<String> = None;
            let mut go_up = false;
            let list_height = (ui.available_height() - 60.0).max(80.0);
            egui::ScrollArea::vertical()
                .max_height(list_height)
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    if ui.selectable_label(false, ".. (Parent Folder)").clicked() {
                        go_up = true;
                    }

                    for (idx, entry) in self.entries.iter().enumerate() {
                        let is_selected = self.selected_index == Some(idx);
                        let text = if entry.is_dir {
                            RichText::new(format!("📁 {}", entry.name))
                                .color(Color32::from_rgb(100, 170, 255))
                                .strong()
                        } else {
                            RichText::new(format!("📄 {}", entry.name))
                        };

                        let response = ui.selectable_label(is_selected, text);
                        if response.clicked() {
                            self.selected_index = Some(idx);
                        }
                        if response.double_clicked() && entry.is_dir {
                            folder_to_enter = Some(entry.name.clone());
                        }
                    }
                });

            if go_up {
                self.navigate_to_parent();
            } else if let Some(name) = folder_to_enter {
                self.enter_dir(&name);
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new("Enter: open folder or select").weak());
                ui.label("|");
                ui.label(RichText::new("←: up a level").weak());
                ui.label("|");
                ui.label(RichText::new("Esc: cancel").weak());
            });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    self.status = FolderPickerStatus::Cancelled;
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Accept").clicked() {
                        self.accept();
                    }
                    if ui.button("Use this folder").clicked() {
                        self.accept_current_dir();
                    }
                });
            });
        });

        self.handle_keys(ctx);
    }

    fn handle_keys(&mut self, ctx: &Context) {
        if self.status != FolderPickerStatus::Open {
            return;
        }
        if ctx.input(|i| i.key_pressed(Key::Escape)) {
            self.status = FolderPickerStatus::Cancelled;
            return;
        }
        if ctx.input(|i| i.key_pressed(Key::Enter)) {
            self.activate_selection();
        }
        if ctx.input(|i| i.key_pressed(Key::ArrowLeft)) && self.query.is_empty() {
            self.navigate_to_parent();
        }
        if ctx.input(|i| i.key_pressed(Key::ArrowDown)) {
            self.move_selection(true);
        }
        if ctx.input(|i| i.key_pressed(Key::ArrowUp)) {
            self.move_selection(false);
        }
    }
}

impl FocusableWindow for FolderPicker {
    type ShowParams = super::window_focus::SimpleShowParams;

    fn window_id(&self) -> &'static str {
        "folder_picker"
    }

    fn is_open(&self) -> bool {
        self.status == FolderPickerStatus::Open
    }

    fn show_with_focus(
        &mut self,
        ctx: &egui::Context,
        _params: Self::ShowParams,
        bring_to_front: bool,
    ) {
        FolderPicker::show(self, ctx, bring_to_front);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("projects")).unwrap();
        fs::create_dir(dir.path().join("Backups")).unwrap();
        fs::create_dir(dir.path().join(".cache")).unwrap();
        fs::write(dir.path().join("notes.txt"), "n").unwrap();
        fs::write(dir.path().join("a_report.csv"), "r").unwrap();
        fs::write(dir.path().join("projects").join("main.rs"), "fn main() {}").unwrap();
        dir
    }

    fn names(picker: &FolderPicker) -> Vec<&str> {
        picker.entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_query_ranks_closer_matches_first() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("annotate.txt"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join("readme.md"), "").unwrap();
        fs::create_dir(dir.path().join("zz_notebooks")).unwrap();

        let mut picker = FolderPicker::new(0, "Path", Some(dir.path().to_path_buf()));
        picker.set_query("note");
        assert_eq!(names(&picker), ["zz_notebooks", "notes.txt", "annotate.txt"]);
        assert_eq!(picker.selected_index, Some(0));
    }

    #[test]
    fn test_directories_first_hidden_skipped() {
        let dir = fixture();
        let picker = FolderPicker::new(0, "Path", Some(dir.path().to_path_buf()));
        assert_eq!(names(&picker), ["Backups", "projects", "a_report.csv", "notes.txt"]);
        assert_eq!(picker.selected_index, Some(0));
    }

    #[test]
    fn test_query_filters_entries() {
        let dir = fixture();
        let mut picker = FolderPicker::new(0, "Path", Some(dir.path().to_path_buf()));
        picker.set_query("nts");
        assert_eq!(names(&picker), ["notes.txt"]);
    }

    #[test]
    fn test_enter_navigates_into_folder_then_parent() {
        let dir = fixture();
        let mut picker = FolderPicker::new(0, "Path", Some(dir.path().to_path_buf()));
        picker.selected_index = Some(1);
        picker.activate_selection();
        assert_eq!(picker.current_dir(), dir.path().join("projects"));
        assert_eq!(picker.status, FolderPickerStatus::Open);
        assert_eq!(names(&picker), ["main.rs"]);

        picker.navigate_to_parent();
        assert_eq!(picker.current_dir(), dir.path());
    }

    #[test]
    fn test_enter_on_file_selects_it() {
        let dir = fixture();
        let mut picker = FolderPicker::new(1, "Destination", Some(dir.path().to_path_buf()));
        picker.selected_index = Some(3);
        picker.activate_selection();
        assert_eq!(
            picker.status,
            FolderPickerStatus::Selected(dir.path().join("notes.txt"))
        );
        assert_eq!(picker.slot, 1);
    }

    #[test]
    fn test_accept_takes_highlighted_folder() {
        let dir = fixture();
        let mut picker = FolderPicker::new(0, "Path", Some(dir.path().to_path_buf()));
        picker.accept();
        assert_eq!(
            picker.status,
            FolderPickerStatus::Selected(dir.path().join("Backups"))
        );
    }

    #[test]
    fn test_accept_in_empty_folder_takes_current_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut picker = FolderPicker::new(0, "Path", Some(dir.path().to_path_buf()));
        assert!(picker.entries.is_empty());
        picker.activate_selection();
        assert_eq!(
            picker.status,
            FolderPickerStatus::Selected(dir.path().to_path_buf())
        );
    }

    #[test]
    fn test_move_selection_clamps() {
        let dir = fixture();
        let mut picker = FolderPicker::new(0, "Path", Some(dir.path().to_path_buf()));
        picker.move_selection(false);
        assert_eq!(picker.selected_index, Some(0));
        for _ in 0..10 {
            picker.move_selection(true);
        }
        assert_eq!(picker.selected_index, Some(3));
    }

    #[test]
    fn test_missing_start_dir_falls_back() {
        let picker = FolderPicker::new(0, "Path", Some(PathBuf::from("/definitely/not/here")));
        assert_ne!(picker.current_dir(), Path::new("/definitely/not/here"));
    }
}
