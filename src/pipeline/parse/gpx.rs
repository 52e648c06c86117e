use crate::error::ParseError;
use crate::types::track::RawPoint;
use chrono::{DateTime, NaiveDateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

pub fn parse_gpx(bytes: &[u8]) -> Result<Vec<RawPoint>, ParseError> {
    let mut reader = Reader::from_reader(bytes);
    reader.trim_text(true);

    let mut points = Vec::new();
    let mut current_point: Option<RawPoint> = None;
    let mut current_element = String::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = local_name(&e)?;
                if name == "trkpt" {
                    current_point = Some(read_coordinates(&e)?);
                } else if current_point.is_some() {
                    current_element = name;
                }
            }
            Ok(Event::Empty(e)) => {
                // <trkpt lat=".." lon=".."/> carries no children
                if local_name(&e)? == "trkpt" {
                    points.push(read_coordinates(&e)?);
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(point) = current_point.as_mut() {
                    let text = e
                        .unescape()
                        .map_err(|e| ParseError::InvalidGpx(e.to_string()))?;
                    read_value(point, &current_element, &text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(point) = current_point.as_mut() {
                    let raw = e.into_inner();
                    let text = std::str::from_utf8(&raw)
                        .map_err(|e| ParseError::InvalidGpx(e.to_string()))?;
                    read_value(point, &current_element, text);
                }
            }
            Ok(Event::End(e)) => {
                let name = e.local_name();
                if name.as_ref() == b"trkpt" {
                    if let Some(point) = current_point.take() {
                        points.push(point);
                    }
                }
                current_element.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::InvalidGpx(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    if current_point.is_some() {
        return Err(ParseError::InvalidGpx("unterminated trkpt element".to_string()));
    }

    if points.is_empty() {
        return Err(ParseError::EmptyFile);
    }

    Ok(points)
}

fn read_value(point: &mut RawPoint, element: &str, text: &str) {
    let text = text.trim();
    match element {
        "ele" => point.elevation = text.parse::<f64>().ok().filter(|e| e.is_finite()),
        "time" => point.time = parse_time(text),
        _ => {}
    }
}

fn local_name(e: &BytesStart<'_>) -> Result<String, ParseError> {
    let name = e.local_name();
    std::str::from_utf8(name.as_ref())
        .map(str::to_string)
        .map_err(|e| ParseError::InvalidGpx(e.to_string()))
}

fn read_coordinates(e: &BytesStart<'_>) -> Result<RawPoint, ParseError> {
    let mut point = RawPoint::default();

    for attr in e.attributes() {
        let attr = attr.map_err(|e| ParseError::InvalidGpx(e.to_string()))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| ParseError::InvalidGpx(e.to_string()))?;
        let value = std::str::from_utf8(&attr.value)
            .map_err(|e| ParseError::InvalidGpx(e.to_string()))?;

        match key {
            "lat" => point.lat = Some(parse_coordinate(key, value)?),
            "lon" => point.lon = Some(parse_coordinate(key, value)?),
            _ => {}
        }
    }

    Ok(point)
}

fn parse_coordinate(key: &str, value: &str) -> Result<f64, ParseError> {
    value
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidGpx(format!("invalid {} attribute: {:?}", key, value)))
}

/// Offset-less timestamps are taken as UTC.
fn parse_time(text: &str) -> Option<DateTime<Utc>> {
    text.parse::<DateTime<Utc>>()
        .or_else(|_| DateTime::parse_from_rfc3339(text).map(|t| t.with_timezone(&Utc)))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|t| t.and_utc())
        })
}
