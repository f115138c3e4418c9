//! Child shell process with merged output.
//!
//! The shell runs with piped stdin, stdout and stderr. One reader thread per output pipe
//! forwards raw chunks into a single channel, which the UI thread drains once per frame.
//! Each pipe has its own UTF-8 decoder so that interleaved chunks never split a character.

use super::output_decoder::Utf8StreamDecoder;
use super::settings::ShellConfig;
use anyhow::{bail, Context as _};
use eframe::egui;
use std::io::{Read, Write};
use std::process::{Child, ChildStdin, Command, ExitStatus, Stdio};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;

const READ_BUFFER_SIZE: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputStream {
    Stdout,
    Stderr,
}

impl std::fmt::Display for OutputStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputStream::Stdout => write!(f, "stdout"),
            OutputStream::Stderr => write!(f, "stderr"),
        }
    }
}

enum OutputChunk {
    Data(OutputStream, Vec<u8>),
    Closed(OutputStream),
}

/// Result of [`ShellProcess::terminate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminateOutcome {
    /// The process was running and has been killed and reaped.
    Killed,
    /// The process had already exited; no signal was sent.
    AlreadyExited,
}

pub struct ShellProcess {
    config: ShellConfig,
    child: Child,
    stdin: Option<ChildStdin>,
    output_rx: Receiver<OutputChunk>,
    stdout_decoder: Utf8StreamDecoder,
    stderr_decoder: Utf8StreamDecoder,
    exit_status: Option<ExitStatus>,
}

impl ShellProcess {
    /// Start the shell described by `config`.
    ///
    /// When `repaint` is given, reader threads request a repaint whenever output arrives so
    /// the UI picks it up without polling on a timer.
    pub fn spawn(config: &ShellConfig, repaint: Option<egui::Context>) -> anyhow::Result<Self> {
        let mut command = Command::new(&config.program);
        command
            .args(&config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(prompt) = &config.prompt {
            command.env("PS1", prompt);
            // Shells trust an inherited PWD only when it names their cwd
            if let Ok(cwd) = std::env::current_dir() {
                command.current_dir(&cwd).env("PWD", &cwd);
            }
        }

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            const CREATE_NO_WINDOW: u32 = 0x0800_0000;
            command.creation_flags(CREATE_NO_WINDOW);
        }

        let mut child = command
            .spawn()
            .with_context(|| format!("failed to start shell '{}'", config.display_command()))?;

        let stdin = child.stdin.take();
        let stdout = child.stdout.take().context("shell stdout was not captured")?;
        let stderr = child.stderr.take().context("shell stderr was not captured")?;

        let (sender, receiver) = channel();
        spawn_reader(stdout, OutputStream::Stdout, sender.clone(), repaint.clone())?;
        spawn_reader(stderr, OutputStream::Stderr, sender, repaint)?;

        tracing::info!(
            "Started shell '{}' (pid {})",
            config.display_command(),
            child.id()
        );

        Ok(Self {
            config: config.clone(),
            child,
            stdin,
            output_rx: receiver,
            stdout_decoder: Utf8StreamDecoder::new(),
            stderr_decoder: Utf8StreamDecoder::new(),
            exit_status: None,
        })
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn id(&self) -> u32 {
        self.child.id()
    }

    /// Drain everything the reader threads have produced so far. Never blocks.
    pub fn poll_output(&mut self) -> String {
        let mut text = String::new();
        loop {
            match self.output_rx.try_recv() {
                Ok(OutputChunk::Data(stream, bytes)) => {
                    text.push_str(&self.decoder_for(stream).decode(&bytes));
                }
                Ok(OutputChunk::Closed(stream)) => {
                    tracing::debug!("Shell {} closed", stream);
                    text.push_str(&self.decoder_for(stream).finish());
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        text
    }

    fn decoder_for(&mut self, stream: OutputStream) -> &mut Utf8StreamDecoder {
        match stream {
            OutputStream::Stdout => &mut self.stdout_decoder,
            OutputStream::Stderr => &mut self.stderr_decoder,
        }
    }

    /// Write `line` plus the configured line terminator to the shell and flush it.
    pub fn write_line(&mut self, line: &str) -> anyhow::Result<()> {
        let Some(stdin) = self.stdin.as_mut() else {
            bail!("shell input is closed");
        };

        let mut payload = String::with_capacity(line.len() + self.config.line_ending.len());
        payload.push_str(line);
        payload.push_str(&self.config.line_ending);

        let result = stdin
            .write_all(payload.as_bytes())
            .and_then(|_| stdin.flush());
        if let Err(e) = result {
            // A broken pipe will not recover; stop writing to it.
            self.stdin = None;
            return Err(e).context("failed to write to shell");
        }

        tracing::debug!("Sent to shell: {}", line);
        Ok(())
    }

    /// Whether the shell is still alive. An exit status is recorded the first time one is seen.
    pub fn is_running(&mut self) -> bool {
        if self.exit_status.is_some() {
            return false;
        }
        match wait_state(self.child.try_wait()) {
            WaitState::Exited(status) => {
                tracing::info!("Shell exited with {}", status);
                self.exit_status = Some(status);
                false
            }
            WaitState::Running => true,
        }
    }

    pub fn exit_status(&self) -> Option<ExitStatus> {
        self.exit_status
    }

    /// Kill and reap the shell if it is still running.
    ///
    /// A process that has already exited is never signalled.
    pub fn terminate(&mut self) -> anyhow::Result<TerminateOutcome> {
        if !self.is_running() {
            return Ok(TerminateOutcome::AlreadyExited);
        }

        self.stdin = None;
        self.child.kill().context("failed to kill shell")?;
        let status = self.child.wait().context("failed to wait for shell")?;
        tracing::info!("Shell (pid {}) terminated: {}", self.child.id(), status);
        self.exit_status = Some(status);
        Ok(TerminateOutcome::Killed)
    }
}

impl Drop for ShellProcess {
    fn drop(&mut self) {
        if let Err(e) = self.terminate() {
            tracing::warn!("Failed to terminate shell on drop: {:#}", e);
        }
    }
}

#[derive(Debug, PartialEq)]
enum WaitState {
    Running,
    Exited(ExitStatus),
}

/// A failed `try_wait` says nothing about the child, so it still counts as running and
/// termination goes ahead.
fn wait_state(result: std::io::Result<Option<ExitStatus>>) -> WaitState {
    match result {
        Ok(Some(status)) => WaitState::Exited(status),
        Ok(None) => WaitState::Running,
        Err(e) => {
            tracing::warn!("Could not query shell state: {}", e);
            WaitState::Running
        }
    }
}

fn spawn_reader<R>(
    mut reader: R,
    stream: OutputStream,
    sender: Sender<OutputChunk>,
    repaint: Option<egui::Context>,
) -> anyhow::Result<()>
where
    R: Read + Send + 'static,
{
    thread::Builder::new()
        .name(format!("shell-{}", stream))
        .spawn(move || {
            let mut buf = [0u8; READ_BUFFER_SIZE];
            loop {
                match reader.read(&mut buf) {
                    Ok(0) => break,
                    Ok(len) => {
                        if sender
                            .send(OutputChunk::Data(stream, buf[..len].to_vec()))
                            .is_err()
                        {
                            return;
                        }
                        if let Some(ctx) = &repaint {
                            ctx.request_repaint();
                        }
                    }
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                    Err(e) => {
                        tracing::warn!("Reading shell {} failed: {}", stream, e);
                        break;
                    }
                }
            }
            let _ = sender.send(OutputChunk::Closed(stream));
            if let Some(ctx) = &repaint {
                ctx.request_repaint();
            }
        })
        .with_context(|| format!("failed to start {} reader thread", stream))?;
    Ok(())
}
