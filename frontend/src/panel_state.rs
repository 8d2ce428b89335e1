use gloo_console::error;
use gloo_utils::window;
use workout_tracker_lib::{FormSurface, ListEntry, ListSurface};

/// What the sidebar should currently show. The coordinator drives it, the
/// root component reads it when rendering.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PanelState {
    form_visible: bool,
    // Bumped on every request so the form refocuses even while already open
    focus_requests: u32,
    // Bumped on every reset so the form remounts with empty fields
    form_generation: u32,
    entries: Vec<ListEntry>,
}

impl PanelState {
    pub fn form_visible(&self) -> bool {
        self.form_visible
    }

    pub fn focus_requests(&self) -> u32 {
        self.focus_requests
    }

    pub fn form_generation(&self) -> u32 {
        self.form_generation
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }
}

impl FormSurface for PanelState {
    fn show(&mut self) {
        self.form_visible = true;
    }

    fn focus_first_field(&mut self) {
        self.focus_requests = self.focus_requests.wrapping_add(1);
    }

    fn reset_and_hide(&mut self) {
        self.form_visible = false;
        self.form_generation = self.form_generation.wrapping_add(1);
    }

    fn show_message(&mut self, message: &str) {
        if let Err(err) = window().alert_with_message(message) {
            error!("Failed to show alert", err);
        }
    }
}

impl ListSurface for PanelState {
    fn append_entry(&mut self, entry: ListEntry) {
        // Newest first, right under the form
        self.entries.insert(0, entry);
    }
}
