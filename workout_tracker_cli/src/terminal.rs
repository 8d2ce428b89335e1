use workout_tracker_lib::{Coordinates, FormSurface, ListEntry, ListSurface, MapRenderer};

/// Prints map operations instead of drawing them.
#[derive(Debug, Default)]
pub struct TerminalMap {
    pub view: Option<(Coordinates, f64)>,
    pub markers: Vec<(Coordinates, String)>,
}

impl MapRenderer for TerminalMap {
    fn set_view(&mut self, at: Coordinates, zoom: f64) {
        println!("map: view at {at} (zoom {zoom})");
        self.view = Some((at, zoom));
    }

    fn add_marker(&mut self, at: Coordinates, label: &str) {
        println!("map: marker at {at}: {label}");
        self.markers.push((at, label.to_owned()));
    }

    fn recenter(&mut self, at: Coordinates) {
        let zoom = self.view.map(|(_, zoom)| zoom).unwrap_or_default();
        println!("map: centered on {at}");
        self.view = Some((at, zoom));
    }
}

#[derive(Debug, Default)]
pub struct TerminalPanel {
    pub form_open: bool,
    pub messages: Vec<String>,
    pub entries: Vec<ListEntry>,
}

impl FormSurface for TerminalPanel {
    fn show(&mut self) {
        self.form_open = true;
    }

    fn focus_first_field(&mut self) {
        println!("form: enter 'submit <running|cycling> <km> <min> <cadence|elevation>'");
    }

    fn reset_and_hide(&mut self) {
        self.form_open = false;
    }

    fn show_message(&mut self, message: &str) {
        println!("!! {message}");
        self.messages.push(message.to_owned());
    }
}

impl ListSurface for TerminalPanel {
    fn append_entry(&mut self, entry: ListEntry) {
        println!("{}", format_entry(&entry));
        self.entries.push(entry);
    }
}

pub fn format_entry(entry: &ListEntry) -> String {
    format!(
        "[{}] {} {} | {} km | {} min | {} {} | {} {}",
        entry.id,
        entry.icon(),
        entry.title,
        entry.distance_km,
        entry.duration_min,
        entry.metric_text(),
        entry.metric_unit,
        entry.detail_text(),
        entry.detail_unit,
    )
}
