//! Command template table used by the sidebar.
//!
//! A template is a command name together with a short description, the flag strings
//! offered in its option dropdown and the number of filesystem paths it expects. The
//! table is built once at startup and never changes afterwards.
//!
//! Composed commands always have the shape `name option path...`: the template name,
//! a single space, the selected option (which may be empty) and each selected path
//! preceded by a single space.

use anyhow::bail;
use once_cell::sync::Lazy;
use std::path::Path;

/// Built-in template table for the platform this binary was compiled for.
pub static BUILTIN_TEMPLATES: Lazy<CommandTable> = Lazy::new(CommandTable::builtin);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    pub name: &'static str,
    pub description: &'static str,
    /// Flag strings offered in the dropdown, in display order. May contain `""`.
    pub options: &'static [&'static str],
    /// Number of path arguments appended after the option.
    pub path_count: usize,
}

impl CommandTemplate {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        options: &'static [&'static str],
        path_count: usize,
    ) -> Self {
        Self {
            name,
            description,
            options,
            path_count,
        }
    }

    /// Option at `index`, or the empty option when the index is out of range.
    pub fn option(&self, index: usize) -> &'static str {
        self.options.get(index).copied().unwrap_or("")
    }

    /// Label shown next to the picker for path slot `slot`.
    pub fn path_label(&self, slot: usize) -> String {
        match (self.path_count, slot) {
            (2, 0) => "Source".to_string(),
            (2, 1) => "Destination".to_string(),
            (1, _) => "Path".to_string(),
            (_, n) => format!("Path {}", n + 1),
        }
    }

    pub fn compose<P: AsRef<Path>>(&self, option: &str, paths: &[P]) -> String {
        compose_command(self.name, option, paths)
    }
}

/// Build the command line for `name` with `option` and `paths`.
///
/// Paths containing whitespace are wrapped in double quotes, which both `cmd` and POSIX
/// shells accept. No line terminator is appended.
pub fn compose_command<P: AsRef<Path>>(name: &str, option: &str, paths: &[P]) -> String {
    let mut command = format!("{} {}", name, option);
    for path in paths {
        command.push(' ');
        command.push_str(&quote_path(path.as_ref()));
    }
    command
}

fn quote_path(path: &Path) -> String {
    let text = path.to_string_lossy();
    if text.chars().any(char::is_whitespace) {
        format!("\"{}\"", text)
    } else {
        text.into_owned()
    }
}

/// Ordered, immutable-after-construction mapping from template name to template.
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    templates: Vec<CommandTemplate>,
}

impl CommandTable {
    /// Build a table from `templates`, rejecting duplicate names.
    pub fn from_templates(
        templates: impl IntoIterator<Item = CommandTemplate>,
    ) -> anyhow::Result<Self> {
        let mut table = Self::default();
        for template in templates {
            table.insert(template)?;
        }
        Ok(table)
    }

    /// The platform table. Duplicates would be a programming error; they are logged and skipped.
    pub fn builtin() -> Self {
        let mut table = Self::default();
        for template in platform_templates() {
            if let Err(e) = table.insert(template.clone()) {
                tracing::error!("Skipping built-in template: {:#}", e);
            }
        }
        table
    }

    fn insert(&mut self, template: CommandTemplate) -> anyhow::Result<()> {
        if self.get(template.name).is_some() {
            bail!("duplicate command template '{}'", template.name);
        }
        self.templates.push(template);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&CommandTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandTemplate> {
        self.templates.iter()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.templates.iter().map(|t| t.name).collect()
    }
}

#[cfg(windows)]
fn platform_templates() -> &'static [CommandTemplate] {
    WINDOWS_TEMPLATES
}

#[cfg(not(windows))]
fn platform_templates() -> &'static [CommandTemplate] {
    POSIX_TEMPLATES
}

pub const WINDOWS_TEMPLATES: &[CommandTemplate] = &[
    CommandTemplate::new(
        "dir",
        "List the contents of the current directory",
        &["/A", "/B", "/S", "/W"],
        0,
    ),
    CommandTemplate::new("ipconfig", "Show IP configuration", &["/all", "/renew"], 0),
    CommandTemplate::new("tasklist", "List running processes", &["", "/V", "/SVC"], 0),
    CommandTemplate::new("netstat", "Show network connections", &["-a", "-n", "-an"], 0),
    CommandTemplate::new("cd", "Change the current directory", &["/D", ""], 1),
    CommandTemplate::new("tree", "Show the folder structure of a path", &["", "/F", "/A"], 1),
    CommandTemplate::new("type", "Print the contents of a file", &[""], 1),
    CommandTemplate::new("rmdir", "Remove a directory", &["", "/S", "/S /Q"], 1),
    CommandTemplate::new("copy", "Copy files to another location", &["", "/Y", "/V"], 2),
    CommandTemplate::new("move", "Move files to another location", &["", "/Y"], 2),
    CommandTemplate::new(
        "xcopy",
        "Copy a folder including its subdirectories",
        &["/E /I", "/S /I", "/E /I /Y"],
        2,
    ),
];

pub const POSIX_TEMPLATES: &[CommandTemplate] = &[
    CommandTemplate::new(
        "ls",
        "List the contents of the current directory",
        &["-l", "-a", "-la", "-lh"],
        0,
    ),
    CommandTemplate::new("ip", "Show network configuration", &["addr", "route", "link"], 0),
    CommandTemplate::new("ps", "List running processes", &["", "aux", "-ef"], 0),
    CommandTemplate::new("df", "Show free disk space", &["-h", "-T"], 0),
    CommandTemplate::new("cd", "Change the current directory", &["", "-P"], 1),
    CommandTemplate::new("du", "Show disk usage of a path", &["-sh", "-h"], 1),
    CommandTemplate::new("cat", "Print the contents of a file", &["", "-n"], 1),
    CommandTemplate::new("rm", "Remove a file or directory", &["-i", "-ri", "-r"], 1),
    CommandTemplate::new("cp", "Copy files to another location", &["", "-r", "-rv"], 2),
    CommandTemplate::new("mv", "Move files to another location", &["", "-v", "-n"], 2),
];
