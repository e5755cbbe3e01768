use gloo_console::{error, info};
use gloo_utils::document;
use leaflet::{LatLng, Layer, Map, MapOptions, Marker, MarkerOptions, Popup, PopupOptions, TileLayer, TileLayerOptions};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    js_sys::{Array, Function, Object, Reflect},
    Element, HtmlElement, Node,
};
use workout_tracker_lib::{render::MarkerStyle, Coords, MapWidget};
use yew::prelude::*;

/// Leaflet map living in a detached `div` that the root component mounts.
pub struct LeafletMap {
    map: Map,
    container: HtmlElement,
    on_click: Callback<Coords>,
}

impl LeafletMap {
    pub fn new(on_click: Callback<Coords>) -> Self {
        let container: Element = document().create_element("div").expect("document can create a div");
        let container: HtmlElement = container.dyn_into().expect("div is an HtmlElement");
        container.set_class_name("map");

        let map = Map::new_with_element(&container, &MapOptions::default());

        Self { map, container, on_click }
    }

    pub fn container(&self) -> &HtmlElement {
        &self.container
    }
}

pub fn render_container(container: &HtmlElement) -> Html {
    let node: &Node = container.as_ref();
    Html::VRef(node.clone())
}

fn call_method(target: &JsValue, name: &str, args: &[JsValue]) -> Result<JsValue, JsValue> {
    let method: Function = Reflect::get(target, &JsValue::from_str(name))?.dyn_into()?;
    method.apply(target, &args.iter().collect::<Array>())
}

fn event_coords(event: &JsValue) -> Option<Coords> {
    let lat_lng = Reflect::get(event, &"latlng".into()).ok()?;
    let lat = Reflect::get(&lat_lng, &"lat".into()).ok()?.as_f64()?;
    let lng = Reflect::get(&lat_lng, &"lng".into()).ok()?.as_f64()?;
    Some(Coords(lat, lng))
}

fn animated_pan() -> Result<Object, JsValue> {
    let pan = Object::new();
    Reflect::set(&pan, &"duration".into(), &1.into())?;

    let options = Object::new();
    Reflect::set(&options, &"animate".into(), &true.into())?;
    Reflect::set(&options, &"pan".into(), &pan)?;
    Ok(options)
}

impl MapWidget for LeafletMap {
    fn show_at(&mut self, center: Coords, zoom: f64) {
        self.map.invalidate_size(false);
        self.map.set_view(&LatLng::new(center.lat(), center.lng()), zoom);
    }

    fn add_tile_layer(&mut self, url_template: &str, attribution: &str) {
        let opts = TileLayerOptions::new();
        if let Err(err) = Reflect::set(&opts, &"attribution".into(), &attribution.into()) {
            error!(format!("Could not set attribution: {err:?}"));
        }
        TileLayer::new_options(url_template, &opts).add_to(&self.map);
    }

    fn listen_for_clicks(&mut self) {
        let on_click = self.on_click.clone();
        let handler = Closure::<dyn Fn(JsValue)>::new(move |event: JsValue| match event_coords(&event) {
            Some(coords) => on_click.emit(coords),
            None => error!("Map click without a position"),
        });

        let map: &JsValue = self.map.as_ref();
        if let Err(err) = call_method(map, "on", &["click".into(), handler.as_ref().clone()]) {
            error!(format!("Could not listen for map clicks: {err:?}"));
        }
        // Lives as long as the map.
        handler.forget();
    }

    fn place_marker(&mut self, coords: Coords, content: &str, style: &MarkerStyle) {
        let marker_opts = MarkerOptions::default();
        marker_opts.set_opacity(style.opacity);
        let marker = Marker::new_with_options(&LatLng::new(coords.lat(), coords.lng()), &marker_opts);

        let popup_opts = PopupOptions::default();
        popup_opts.set_max_width(style.max_width);
        popup_opts.set_min_width(style.min_width);
        popup_opts.set_auto_close(style.auto_close);
        popup_opts.set_close_on_click(style.close_on_click);
        popup_opts.set_class_name(style.class_name.clone());
        let popup = Popup::new(&popup_opts, None);
        popup.set_content(&content.into());

        marker.add_to(&self.map);
        marker.bind_popup(&popup).open_popup();
    }

    fn center(&mut self, coords: Coords, zoom: f64, animate: bool) {
        let lat_lng = LatLng::new(coords.lat(), coords.lng());
        if !animate {
            self.map.set_view(&lat_lng, zoom);
            return;
        }

        let map: &JsValue = self.map.as_ref();
        let moved = animated_pan()
            .and_then(|options| call_method(map, "setView", &[lat_lng.into(), zoom.into(), options.into()]));
        if let Err(err) = moved {
            error!(format!("Animated move failed: {err:?}"));
            self.map.set_view(&LatLng::new(coords.lat(), coords.lng()), zoom);
        } else {
            info!(format!("Centered on {}, {}", coords.lat(), coords.lng()));
        }
    }
}
