use serde::{Deserialize, Serialize};

pub const DEFAULT_ZOOM: f64 = 13.;
pub const MAX_ZOOM: f64 = 19.;
pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str = "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors, \
    Tiles style by <a href=\"https://www.hotosm.org/\" target=\"_blank\">Humanitarian OpenStreetMap Team</a> \
    hosted by <a href=\"https://openstreetmap.fr/\" target=\"_blank\">OpenStreetMap France</a>";

/// How the map view is set up once a position is known.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MapConfig {
    pub default_zoom: f64,
    pub max_zoom: f64,
    pub tile_url: String,
    pub attribution: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_zoom: DEFAULT_ZOOM,
            max_zoom: MAX_ZOOM,
            tile_url: TILE_URL.into(),
            attribution: TILE_ATTRIBUTION.into(),
        }
    }
}

impl MapConfig {
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.default_zoom = zoom.clamp(0., self.max_zoom);
        self
    }
}
