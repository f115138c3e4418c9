//! Terminal display pane and command input line.
//!
//! The display is append-only text fed from the shell's merged output. Typing happens in a
//! separate single-line editor below it, with its own history, so the output text itself
//! is never edited.

use eframe::egui;
use egui::{Key, RichText};

pub const MAX_DISPLAY_LINES: usize = 5000;
/// Byte cap, for output that streams without newlines.
pub const MAX_DISPLAY_BYTES: usize = 1 << 20;
const INPUT_ID: &str = "terminal_input_line";

/// Prompt shown before the shell has printed one of its own.
pub fn initial_prompt() -> String {
    let cwd = std::env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    if cfg!(windows) {
        format!("{}>", cwd)
    } else {
        format!("{}$ ", cwd)
    }
}

/// Whether an unterminated output line looks like a shell prompt waiting for input.
///
/// The line has to start with a path (`/...`, `~...` or `C:\...`) and end with one of the
/// usual prompt terminators.
pub fn looks_like_prompt(line: &str) -> bool {
    let Some(body) = ["$ ", "# ", "% ", ">"]
        .iter()
        .find_map(|terminator| line.strip_suffix(terminator))
    else {
        return false;
    };
    starts_with_path(body.trim_end())
}

fn starts_with_path(text: &str) -> bool {
    if text.starts_with('/') || text.starts_with('~') {
        return true;
    }
    let bytes = text.as_bytes();
    bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'\\' || bytes[2] == b'/')
}

pub struct TerminalView {
    buffer: String,
    prompt: String,
    /// Prompt-like last line, adopted once the shell goes quiet
    pending_prompt: Option<String>,
    input: String,
    history: Vec<String>,
    history_cursor: Option<usize>,
    draft: String,
    request_focus: bool,
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new(initial_prompt())
    }
}

impl TerminalView {
    pub fn new(prompt: String) -> Self {
        Self {
            buffer: String::new(),
            prompt,
            pending_prompt: None,
            input: String::new(),
            history: Vec::new(),
            history_cursor: None,
            draft: String::new(),
            request_focus: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn line_count(&self) -> usize {
        self.buffer.lines().count()
    }

    /// Append decoded shell output. Carriage returns are dropped so `\r\n` becomes `\n`.
    ///
    /// A prompt-like last line only becomes a candidate; see [`Self::settle_prompt`].
    pub fn append_output(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.push_without_cr(text);
        self.pending_prompt = self
            .last_line()
            .filter(|line| looks_like_prompt(line))
            .map(str::to_string);
        self.trim_to_limit();
    }

    /// The shell produced nothing this frame: adopt the prompt candidate, if any.
    pub fn settle_prompt(&mut self) {
        if let Some(prompt) = self.pending_prompt.take() {
            self.prompt = prompt;
        }
    }

    /// Show a submitted command in the display, after whatever prompt is already there.
    pub fn echo(&mut self, command: &str) {
        // The shell was waiting for this input
        self.settle_prompt();
        self.push_without_cr(command);
        self.buffer.push('\n');
        self.trim_to_limit();
    }

    /// Append a status line such as `[process exited: 0]` on a line of its own.
    pub fn append_notice(&mut self, notice: &str) {
        if !self.buffer.is_empty() && !self.buffer.ends_with('\n') {
            self.buffer.push('\n');
        }
        self.buffer.push_str(notice);
        self.buffer.push('\n');
        self.pending_prompt = None;
        self.trim_to_limit();
    }

    /// Replace the display with a single line holding the remembered prompt.
    pub fn clear(&mut self) {
        self.buffer = self.prompt.clone();
        self.pending_prompt = None;
    }

    fn push_without_cr(&mut self, text: &str) {
        self.buffer.extend(text.chars().filter(|c| *c != '\r'));
    }

    fn last_line(&self) -> Option<&str> {
        let line = match self.buffer.rfind('\n') {
            Some(pos) => &self.buffer[pos + 1..],
            None => self.buffer.as_str(),
        };
        (!line.is_empty()).then_some(line)
    }

    fn trim_to_limit(&mut self) {
        let newlines = self.buffer.matches('\n').count();
        if newlines >= MAX_DISPLAY_LINES {
            let excess = newlines + 1 - MAX_DISPLAY_LINES;
            if let Some((pos, _)) = self.buffer.match_indices('\n').nth(excess - 1) {
                self.buffer.drain(..=pos);
            }
        }

        if self.buffer.len() > MAX_DISPLAY_BYTES {
            let mut cut = self.buffer.len() - MAX_DISPLAY_BYTES;
            while !self.buffer.is_char_boundary(cut) {
                cut += 1;
            }
            self.buffer.drain(..cut);
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.history_cursor = None;
    }

    /// Take the edited line, recording it in history.
    pub fn submit(&mut self) -> String {
        let line = std::mem::take(&mut self.input);
        if !line.trim().is_empty() && self.history.last() != Some(&line) {
            self.history.push(line.clone());
        }
        self.history_cursor = None;
        self.draft.clear();
        line
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let index = match self.history_cursor {
            None => {
                self.draft = self.input.clone();
                self.history.len() - 1
            }
            Some(i) => i.saturating_sub(1),
        };
        self.history_cursor = Some(index);
        self.input = self.history[index].clone();
    }

    pub fn history_next(&mut self) {
        let Some(i) = self.history_cursor else {
            return;
        };
        if i + 1 < self.history.len() {
            self.history_cursor = Some(i + 1);
            self.input = self.history[i + 1].clone();
        } else {
            self.history_cursor = None;
            self.input = std::mem::take(&mut self.draft);
        }
    }

    pub fn focus_input(&mut self) {
        self.request_focus = true;
    }

    /// Render the display and the input line. Returns a line the user submitted.
    pub fn ui(&mut self, ui: &mut egui::Ui, font_size: f32) -> Option<String> {
        let input_height = ui.spacing().interact_size.y + ui.spacing().item_spacing.y * 3.0;
        let display_height = (ui.available_height() - input_height).max(0.0);

        egui::ScrollArea::vertical()
            .id_salt("terminal_display")
            .max_height(display_height)
            .auto_shrink([false; 2])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.style_mut().wrap_mode = Some(egui::TextWrapMode::Wrap);
                ui.add(
                    egui::Label::new(RichText::new(&self.buffer).monospace().size(font_size))
                        .selectable(true),
                );
            });

        ui.separator();

        let mut submitted = None;
        ui.horizontal(|ui| {
            ui.label(RichText::new(">").monospace().size(font_size).strong());
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.input)
                    .id(egui::Id::new(INPUT_ID))
                    .font(egui::FontId::monospace(font_size))
                    .hint_text("Type a command and press Enter")
                    .desired_width(f32::INFINITY),
            );

            if self.request_focus {
                response.request_focus();
                self.request_focus = false;
            }

            if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                submitted = Some(self.submit());
                response.request_focus();
            } else if response.has_focus() {
                if ui.input(|i| i.key_pressed(Key::ArrowUp)) {
                    self.history_prev();
                } else if ui.input(|i| i.key_pressed(Key::ArrowDown)) {
                    self.history_next();
                }
            }
        });

        submitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_crlf_normalised() {
        let mut view = TerminalView::new("C:\\>".to_string());
        view.append_output("line one\r\nline two\r");
        view.append_output("\n");
        assert_eq!(view.text(), "line one\nline two\n");
    }

    #[test]
    fn test_prompt_remembered_once_shell_is_quiet() {
        let mut view = TerminalView::new("/start$ ".to_string());
        view.append_output("Volume in drive C\r\n\r\nC:\\Users\\me>");
        assert_eq!(view.prompt(), "/start$ ");
        view.settle_prompt();
        assert_eq!(view.prompt(), "C:\\Users\\me>");

        view.append_output("dir\r\n file.txt\r\n");
        view.settle_prompt();
        assert_eq!(view.prompt(), "C:\\Users\\me>");

        view.append_output("/home/me/src$ ");
        view.settle_prompt();
        assert_eq!(view.prompt(), "/home/me/src$ ");
    }

    #[test]
    fn test_clear_leaves_single_prompt_line() {
        let mut view = TerminalView::new("/tmp$ ".to_string());
        view.append_output("a\nb\nc\n/home/me$ ");
        view.settle_prompt();
        view.clear();
        assert_eq!(view.text(), "/home/me$ ");
        assert_eq!(view.line_count(), 1);
    }

    #[test]
    fn test_clear_before_any_output_uses_initial_prompt() {
        let mut view = TerminalView::new("/work$ ".to_string());
        view.clear();
        assert_eq!(view.text(), "/work$ ");
    }

    #[test]
    fn test_prompt_needs_path_and_terminator() {
        assert!(!looks_like_prompt(""));
        assert!(!looks_like_prompt("   "));
        assert!(!looks_like_prompt("total 12"));
        assert!(!looks_like_prompt("# "));
        assert!(!looks_like_prompt("$ "));
        assert!(!looks_like_prompt("$PWD$ "));
        assert!(!looks_like_prompt("  <item>"));
        assert!(!looks_like_prompt("</config>"));
        assert!(looks_like_prompt("/root# "));
        assert!(looks_like_prompt("~/src$ "));
        assert!(looks_like_prompt("C:\\>"));
        assert!(looks_like_prompt("D:\\Projects\\site>"));
    }

    #[test]
    fn test_partial_markup_line_never_becomes_prompt() {
        let mut view = TerminalView::new("/home/me$ ".to_string());
        view.append_output("<config>\n  <item>");
        view.settle_prompt();
        view.append_output("1</item>\n</config>\n");
        view.settle_prompt();
        view.clear();
        assert_eq!(view.text(), "/home/me$ ");
    }

    #[test]
    fn test_candidate_dropped_when_line_continues() {
        let mut view = TerminalView::new("/home/me$ ".to_string());
        view.append_output("/srv/data>");
        view.append_output(" is mounted read-only\n");
        view.settle_prompt();
        assert_eq!(view.prompt(), "/home/me$ ");
    }

    #[test]
    fn test_echo_never_becomes_prompt() {
        let mut view = TerminalView::new("/start$ ".to_string());
        view.append_output("/home/me$ ");
        view.echo("echo hi > /tmp/out.txt >");
        view.settle_prompt();
        view.clear();
        assert_eq!(view.text(), "/home/me$ ");
    }

    #[test]
    fn test_display_capped() {
        let mut view = TerminalView::new("$ ".to_string());
        for i in 0..(MAX_DISPLAY_LINES + 10) {
            view.append_output(&format!("line {}\n", i));
        }
        assert!(view.line_count() <= MAX_DISPLAY_LINES);
        assert!(view.text().ends_with(&format!("line {}\n", MAX_DISPLAY_LINES + 9)));
        assert!(!view.text().contains("line 0\n"));
    }

    #[test]
    fn test_display_capped_without_newlines() {
        let mut view = TerminalView::new("$ ".to_string());
        let chunk = "é".repeat(1000);
        for _ in 0..(MAX_DISPLAY_BYTES / 1000) {
            view.append_output(&chunk);
        }
        view.echo(&"x".repeat(4096));
        assert!(view.text().len() <= MAX_DISPLAY_BYTES);
        assert!(view.text().ends_with(&format!("{}\n", "x".repeat(4096))));
    }

    #[test]
    fn test_echo_and_notice() {
        let mut view = TerminalView::new("$ ".to_string());
        view.append_output("$ ");
        view.echo("ls -l\r");
        view.append_output("out");
        view.append_notice("[process exited: 0]");
        assert_eq!(view.text(), "$ ls -l\nout\n[process exited: 0]\n");
    }

    #[test]
    fn test_history_navigation() {
        let mut view = TerminalView::new("$ ".to_string());
        for cmd in ["ls", "pwd", "pwd", "", "whoami"] {
            view.set_input(cmd);
            view.submit();
        }
        assert_eq!(view.history(), ["ls", "pwd", "whoami"]);

        view.set_input("draft");
        view.history_prev();
        assert_eq!(view.input(), "whoami");
        view.history_prev();
        view.history_prev();
        view.history_prev();
        assert_eq!(view.input(), "ls");
        view.history_next();
        assert_eq!(view.input(), "pwd");
        view.history_next();
        view.history_next();
        assert_eq!(view.input(), "draft");
    }

    #[test]
    fn test_submit_returns_line_and_clears_input() {
        let mut view = TerminalView::new("$ ".to_string());
        view.set_input("echo hi");
        assert_eq!(view.submit(), "echo hi");
        assert_eq!(view.input(), "");
    }
}
