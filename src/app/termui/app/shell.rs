//! Shell lifecycle, output polling and command submission

use super::TerminalApp;
use crate::app::shell_process::{ShellProcess, TerminateOutcome};
use eframe::egui;

impl TerminalApp {
    /// Spawn the configured shell. On failure the app keeps running without one.
    pub fn start_shell(&mut self) {
        match ShellProcess::spawn(&self.settings.shell, self.repaint_ctx.clone()) {
            Ok(shell) => {
                log_info!(
                    "Shell '{}' running as pid {}",
                    shell.config().display_command(),
                    shell.id()
                );
                self.shell = Some(shell);
                self.exit_reported = false;
                self.last_error = None;
            }
            Err(e) => {
                log_error!("Could not start shell: {:#}", e);
                self.terminal
                    .append_notice(&format!("[failed to start shell: {:#}]", e));
                self.last_error = Some(format!("{:#}", e));
            }
        }
    }

    /// Terminate the shell if there is one. Returns what happened to it.
    pub fn shutdown_shell(&mut self) -> Option<TerminateOutcome> {
        let mut shell = self.shell.take()?;
        match shell.terminate() {
            Ok(outcome) => {
                log_info!("Shell shutdown: {:?}", outcome);
                Some(outcome)
            }
            Err(e) => {
                log_error!("Failed to terminate shell: {:#}", e);
                None
            }
        }
    }

    /// Stop the shell when the window is closing. Returns `None` without a close request.
    pub fn handle_close_request(&mut self, ctx: &egui::Context) -> Option<TerminateOutcome> {
        if !ctx.input(|i| i.viewport().close_requested()) {
            return None;
        }
        log_info!("Window close requested, stopping shell");
        self.shutdown_shell()
    }

    pub fn restart_shell(&mut self) {
        log_info!("Restarting shell");
        self.shutdown_shell();
        self.terminal.append_notice("[restarting shell]");
        self.start_shell();
    }

    pub fn has_shell(&self) -> bool {
        self.shell.is_some()
    }

    pub fn shell_running(&mut self) -> bool {
        self.shell.as_mut().is_some_and(|shell| shell.is_running())
    }

    /// Move new shell output into the display and report an exit once.
    pub fn poll_shell(&mut self) {
        let Some(shell) = self.shell.as_mut() else {
            return;
        };

        let output = shell.poll_output();
        if output.is_empty() {
            self.terminal.settle_prompt();
        } else {
            self.terminal.append_output(&output);
        }

        if self.exit_reported || shell.is_running() {
            return;
        }

        // Output written just before exit may still be in flight.
        let tail = shell.poll_output();
        self.terminal.append_output(&tail);

        let status = shell
            .exit_status()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unknown status".to_string());
        log_warn!("Shell exited: {}", status);
        self.terminal
            .append_notice(&format!("[process exited: {}]", status));
        self.exit_reported = true;
    }

    /// Write `command` to the shell, echoing it first when local echo is on.
    pub fn send_command(&mut self, command: &str) {
        let Some(shell) = self.shell.as_mut() else {
            self.last_error = Some("shell is not running".to_string());
            log_warn!("Dropped command, no shell: {}", command);
            return;
        };

        if self.settings.local_echo {
            self.terminal.echo(command);
        }

        match shell.write_line(command) {
            Ok(()) => {
                log_info!("Executed: {}", command);
                self.last_error = None;
            }
            Err(e) => {
                log_error!("Failed to send command '{}': {:#}", command, e);
                self.last_error = Some(format!("{:#}", e));
            }
        }
    }

    /// One-line description of the shell state for the status bar.
    pub(super) fn shell_status_text(&mut self) -> String {
        let Some(shell) = self.shell.as_mut() else {
            return "not started".to_string();
        };
        if shell.is_running() {
            return format!("running (pid {})", shell.id());
        }
        match shell.exit_status() {
            Some(status) => format!("exited ({})", status),
            None => "exited".to_string(),
        }
    }
}
