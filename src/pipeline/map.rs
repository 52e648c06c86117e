use crate::error::ArtifactError;
use crate::types::track::Track;

pub const DEFAULT_ZOOM: u8 = 12;

const LEAFLET_VERSION: &str = "1.9.4";
const TILE_URL: &str = "https://api.mapbox.com/styles/v1/mapbox/streets-v11/tiles/{z}/{x}/{y}";
const ROUTE_COLOR: &str = "blue";
const ROUTE_WEIGHT: f64 = 2.5;
const ROUTE_OPACITY: f64 = 1.0;

/// Builds a standalone Leaflet document showing the route over Mapbox tiles.
pub fn render_map_html(track: &Track, tile_token: &str) -> Result<String, ArtifactError> {
    let (center_lat, center_lon) = track.center();
    let route: Vec<[f64; 2]> = track.points().iter().map(|p| [p.lat, p.lon]).collect();

    let route_json = serde_json::to_string(&route)?;
    let center_json = serde_json::to_string(&[center_lat, center_lon])?;
    let tiles_json = serde_json::to_string(&format!("{}?access_token={}", TILE_URL, tile_token))?;

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8"/>
  <meta name="viewport" content="width=device-width, initial-scale=1.0"/>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@{version}/dist/leaflet.css"/>
  <script src="https://unpkg.com/leaflet@{version}/dist/leaflet.js"></script>
  <style>html, body, #map {{ width: 100%; height: 100%; margin: 0; padding: 0; }}</style>
</head>
<body>
  <div id="map"></div>
  <script>
    var map = L.map("map", {{ center: {center}, zoom: {zoom} }});
    L.tileLayer({tiles}, {{ attribution: "Mapbox", tileSize: 512, zoomOffset: -1 }}).addTo(map);
    L.polyline({route}, {{ color: "{color}", weight: {weight}, opacity: {opacity} }}).addTo(map);
  </script>
</body>
</html>
"#,
        version = LEAFLET_VERSION,
        center = center_json,
        zoom = DEFAULT_ZOOM,
        tiles = tiles_json,
        route = route_json,
        color = ROUTE_COLOR,
        weight = ROUTE_WEIGHT,
        opacity = ROUTE_OPACITY,
    ))
}
