use gloo_console::info;
use gloo_utils::document;
use leaflet::{LatLng, Map, MapOptions, Marker, MouseEvent, Popup, PopupOptions, TileLayer, TileLayerOptions};
use wasm_bindgen::{JsCast, UnwrapThrowExt};
use web_sys::{HtmlElement, Node};
use workout_tracker_lib::{config::MapConfig, Coordinates, MapRenderer};
use yew::prelude::*;

/// The Leaflet map, living in a detached div that the root component mounts.
///
/// Tiles are only loaded once a first view has been set, so a failed position
/// lookup leaves an empty container.
pub struct LeafletMap {
    map: Map,
    container: HtmlElement,
    markers: Vec<Marker>,
    config: MapConfig,
    initialised: bool,
}

impl LeafletMap {
    pub fn new(config: MapConfig, on_click: Callback<Coordinates>) -> Self {
        let container: HtmlElement = document()
            .create_element("div")
            .expect_throw("could not create map container")
            .unchecked_into();
        container.set_class_name("map");

        let map = Map::new_with_element(&container, &MapOptions::default());
        map.on_mouse_click(Box::new(move |event: MouseEvent| {
            let at = event.lat_lng();
            on_click.emit(Coordinates::new(at.lat(), at.lng()));
        }));

        Self {
            map,
            container,
            markers: Vec::new(),
            config,
            initialised: false,
        }
    }

    pub fn render(&self) -> Html {
        let node: &Node = &self.container.clone().into();
        Html::VRef(node.clone())
    }

    pub fn invalidate_size(&self) {
        if self.initialised {
            self.map.invalidate_size(false);
        }
    }

    fn add_tile_layer(&self) {
        let opts = TileLayerOptions::new();
        opts.set_max_zoom(self.config.max_zoom);
        opts.set_attribution(self.config.attribution.clone());
        opts.set_update_when_idle(true);
        TileLayer::new_options(&self.config.tile_url, &opts).add_to(&self.map);
    }
}

impl MapRenderer for LeafletMap {
    fn set_view(&mut self, at: Coordinates, zoom: f64) {
        if !self.initialised {
            self.map.set_max_zoom(self.config.max_zoom);
            self.add_tile_layer();
            self.initialised = true;
        }

        self.map.set_view(&LatLng::new(at.lat, at.lng), zoom);
    }

    fn add_marker(&mut self, at: Coordinates, label: &str) {
        info!(format!("Adding marker '{}' at {}", label, at));

        let popup_opts = PopupOptions::default();
        popup_opts.set_max_width(250.);
        popup_opts.set_min_width(100.);
        popup_opts.set_auto_close(false);
        popup_opts.set_close_on_click(false);
        let popup = Popup::new(&popup_opts, None);
        popup.set_content(&label.into());

        let marker = Marker::new(&LatLng::new(at.lat, at.lng));
        marker.add_to(&self.map);
        marker.bind_popup(&popup);
        marker.open_popup();

        self.markers.push(marker);
    }

    fn recenter(&mut self, at: Coordinates) {
        // Keep whatever zoom the user picked
        let zoom = self.map.get_zoom();
        self.map.set_view(&LatLng::new(at.lat, at.lng), zoom);
    }
}
