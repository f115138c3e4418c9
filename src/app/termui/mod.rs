//! Desktop user interface of guiterm.
//!
//! The window is split into three areas:
//!
//! - a left sidebar ([`command_sidebar::CommandSidebar`]) listing the command templates, and
//!   after a template is chosen, its option dropdown, path pickers and execute button
//! - the terminal display ([`terminal_view::TerminalView`]) with the merged shell output and a
//!   single-line command input below it
//! - a menu bar and status bar around them
//!
//! Floating windows ([`folder_picker::FolderPicker`], [`help_window::HelpWindow`]) implement
//! [`window_focus::FocusableWindow`] so a newly opened one is raised above the others.
//!
//! [`app::TerminalApp`] owns all of it together with the shell process and drives everything
//! from `eframe::App::update`.

pub mod app;
pub mod command_sidebar;
pub mod folder_picker;
pub mod help_window;
pub mod menu;
pub mod terminal_view;
pub mod window_focus;

pub use app::TerminalApp;
pub use command_sidebar::{CommandSidebar, SidebarAction};
pub use folder_picker::{FolderPicker, FolderPickerStatus};
pub use help_window::HelpWindow;
pub use terminal_view::TerminalView;
pub use window_focus::{FocusableWindow, SimpleShowParams, WindowFocusManager};
