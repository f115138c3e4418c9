//! Shell lifecycle tests for TerminalApp
//!
//! These start a real `sh`, so they only run on Unix.

#![cfg(unix)]

use guiterm::app::command_templates::BUILTIN_TEMPLATES;
use guiterm::app::settings::ShellConfig;
use guiterm::app::shell_process::TerminateOutcome;
use guiterm::TerminalApp;
use std::time::{Duration, Instant};

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn app_with_plain_sh() -> TerminalApp {
        let mut app = TerminalApp::default();
        app.settings.shell = ShellConfig {
            program: "sh".to_string(),
            args: Vec::new(),
            line_ending: "\n".to_string(),
            prompt: None,
        };
        app.settings.local_echo = true;
        app
    }

    /// Poll the shell until `done` holds or five seconds pass
    fn poll_until(app: &mut TerminalApp, mut done: impl FnMut(&mut TerminalApp) -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            app.poll_shell();
            if done(app) {
                return true;
            }
            std::thread::sleep(Duration::from_millis(20));
        }
        false
    }

    /// Run one frame of `handle_close_request`, with or without a close request
    fn close_frame(app: &mut TerminalApp, close: bool) -> Option<TerminateOutcome> {
        let ctx = egui::Context::default();
        let mut input = egui::RawInput::default();
        if close {
            input.viewports.insert(
                egui::ViewportId::ROOT,
                egui::ViewportInfo {
                    events: vec![egui::ViewportEvent::Close],
                    ..Default::default()
                },
            );
        }
        let mut outcome = None;
        let _ = ctx.run(input, |ctx| outcome = app.handle_close_request(ctx));
        outcome
    }

    #[test]
    fn test_close_request_kills_running_shell() {
        let mut app = app_with_plain_sh();
        app.start_shell();

        assert_eq!(close_frame(&mut app, false), None);
        assert!(app.has_shell());

        assert_eq!(close_frame(&mut app, true), Some(TerminateOutcome::Killed));
        assert!(!app.has_shell());
    }

    #[test]
    fn test_close_request_never_signals_exited_shell() {
        let mut app = app_with_plain_sh();
        app.start_shell();
        app.send_command("exit 0");
        assert!(poll_until(&mut app, |app| !app.shell_running()));

        assert_eq!(
            close_frame(&mut app, true),
            Some(TerminateOutcome::AlreadyExited)
        );
    }

    #[test]
    fn test_close_request_without_shell() {
        let mut app = TerminalApp::default();
        assert_eq!(close_frame(&mut app, true), None);
    }

    #[test]
    fn test_default_shell_clear_keeps_working_directory() {
        let cwd = std::env::current_dir().unwrap().display().to_string();
        let mut app = TerminalApp::default();
        app.start_shell();
        assert!(app.has_shell());

        // The prompt shows up once the shell is ready; either way it names the cwd
        poll_until(&mut app, |app| app.terminal.text().contains(&cwd));
        std::thread::sleep(Duration::from_millis(100));
        app.poll_shell();
        app.terminal.clear();

        assert_eq!(app.terminal.text().lines().count(), 1);
        assert!(
            app.terminal.text().contains(&cwd),
            "cleared display {:?} lacks {}",
            app.terminal.text(),
            cwd
        );
    }

    #[test]
    fn test_no_shell_shutdown_is_noop() {
        let mut app = TerminalApp::default();
        assert!(!app.has_shell());
        assert_eq!(app.shutdown_shell(), None);
    }

    #[test]
    fn test_command_output_reaches_display() {
        let mut app = app_with_plain_sh();
        app.start_shell();
        assert!(app.has_shell());

        app.send_command("echo guiterm-ok");
        assert!(app.terminal.text().contains("echo guiterm-ok"));
        assert!(poll_until(&mut app, |app| app
            .terminal
            .text()
            .lines()
            .any(|line| line == "guiterm-ok")));

        assert_eq!(app.shutdown_shell(), Some(TerminateOutcome::Killed));
        assert!(!app.has_shell());
        assert_eq!(app.shutdown_shell(), None);
    }

    #[test]
    fn test_stderr_merged_into_display() {
        let mut app = app_with_plain_sh();
        app.start_shell();

        app.send_command("echo guiterm-err 1>&2");
        assert!(poll_until(&mut app, |app| app
            .terminal
            .text()
            .lines()
            .any(|line| line == "guiterm-err")));
    }

    #[test]
    fn test_exited_shell_is_not_killed() {
        let mut app = app_with_plain_sh();
        app.start_shell();

        app.send_command("exit 0");
        assert!(poll_until(&mut app, |app| !app.shell_running()));
        app.poll_shell();
        assert!(app.terminal.text().contains("[process exited"));

        assert_eq!(app.shutdown_shell(), Some(TerminateOutcome::AlreadyExited));
    }

    #[test]
    fn test_send_without_shell_sets_error() {
        let mut app = app_with_plain_sh();
        app.send_command("ls");
        assert_eq!(app.last_error(), Some("shell is not running"));
        assert!(!app.terminal.text().contains("ls"));
    }

    #[test]
    fn test_missing_program_reports_failure() {
        let mut app = TerminalApp::default();
        app.settings.shell.program = "/nonexistent/guiterm-shell".to_string();
        app.start_shell();

        assert!(!app.has_shell());
        assert!(app.terminal.text().contains("[failed to start shell"));
        assert!(app.last_error().is_some());
    }

    #[test]
    fn test_clear_leaves_single_prompt_line() {
        let mut app = app_with_plain_sh();
        app.terminal.append_output("line one\nline two\n/tmp$ ");
        app.terminal.settle_prompt();
        app.terminal.clear();

        assert_eq!(app.terminal.text(), "/tmp$ ");
        assert_eq!(app.terminal.text().lines().count(), 1);
    }

    #[test]
    fn test_builtin_commands_compose_from_parts() {
        for template in BUILTIN_TEMPLATES.iter() {
            let paths: Vec<String> = (0..template.path_count)
                .map(|i| format!("/data/dir{}", i))
                .collect();
            for option in template.options {
                let mut expected = format!("{} {}", template.name, option);
                for path in &paths {
                    expected.push(' ');
                    expected.push_str(path);
                }
                assert_eq!(template.compose(option, &paths), expected);
            }
        }
    }
}
