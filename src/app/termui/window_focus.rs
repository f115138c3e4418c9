//! Window Focus Management
//!
//! Floating windows (folder picker, help) implement [`FocusableWindow`] so the app can
//! render them uniformly and raise a freshly opened one above the others.

use eframe::egui;

/// Trait for floating windows that can be brought to the foreground
pub trait FocusableWindow {
    /// Parameters required for the show method
    type ShowParams;

    /// Unique identifier for this window
    fn window_id(&self) -> &'static str;

    /// Whether this window is currently open/visible
    fn is_open(&self) -> bool;

    /// Render the window. When `bring_to_front` is true the window is drawn with
    /// `egui::Order::Foreground`.
    fn show_with_focus(
        &mut self,
        ctx: &egui::Context,
        params: Self::ShowParams,
        bring_to_front: bool,
    );
}

/// Parameters for windows that need nothing beyond the context
pub type SimpleShowParams = ();

/// Tracks which window should be raised on the next frame
#[derive(Debug, Default)]
pub struct WindowFocusManager {
    bring_to_front_window: Option<String>,
}

impl WindowFocusManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_focus(&mut self, window_id: impl Into<String>) {
        self.bring_to_front_window = Some(window_id.into());
    }

    pub fn should_bring_to_front(&self, window_id: &str) -> bool {
        self.bring_to_front_window.as_deref() == Some(window_id)
    }

    pub fn clear_bring_to_front(&mut self, window_id: &str) {
        if self.should_bring_to_front(window_id) {
            self.bring_to_front_window = None;
        }
    }

    /// Show `window` if it is open, consuming a pending focus request for it.
    pub fn show<W>(&mut self, window: &mut W, ctx: &egui::Context, params: W::ShowParams)
    where
        W: FocusableWindow,
    {
        if !window.is_open() {
            return;
        }
        let window_id = window.window_id();
        let bring_to_front = self.should_bring_to_front(window_id);
        if bring_to_front {
            self.clear_bring_to_front(window_id);
        }
        window.show_with_focus(ctx, params, bring_to_front);
    }
}
