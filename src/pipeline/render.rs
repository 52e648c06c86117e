use crate::error::RenderError;

pub const HISTOGRAM_BINS: usize = 30;

const MARGIN_LEFT: f64 = 72.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 56.0;
const TARGET_TICKS: f64 = 6.0;
const MAX_TICKS: usize = 64;
const FONT_FAMILY: &str = "DejaVu Sans, sans-serif";

const ELEVATION_COLOR: &str = "#808080";
const ELEVATION_FILL_OPACITY: f64 = 0.5;
const HISTOGRAM_COLOR: &str = "#0000FF";
const HISTOGRAM_OPACITY: f64 = 0.7;
const GRID_COLOR: &str = "#B0B0B0";

#[derive(Debug, Clone, Copy)]
pub struct PlotSize {
    pub width: u32,
    pub height: u32,
}

impl Default for PlotSize {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `counts.len() + 1` bin edges, ascending.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

/// Data-space range mapped onto the plot area.
#[derive(Debug, Clone, Copy)]
struct Axis {
    min: f64,
    max: f64,
    step: f64,
}

impl Axis {
    fn nice(min: f64, max: f64) -> Result<Self, RenderError> {
        if !(max - min).is_finite() {
            return Err(RenderError::SvgError(format!(
                "Axis range {} to {} is too wide to plot",
                min, max
            )));
        }
        let (min, max) = if (max - min).abs() <= f64::EPSILON {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        };
        let step = nice_step((max - min) / TARGET_TICKS);
        let axis = Self {
            min: (min / step).floor() * step,
            max: (max / step).ceil() * step,
            step,
        };
        let span = axis.max - axis.min;
        if !span.is_finite() || span <= 0.0 || span / step > MAX_TICKS as f64 {
            return Err(RenderError::SvgError(format!(
                "Cannot build axis for range {} to {}",
                min, max
            )));
        }
        Ok(axis)
    }

    fn ticks(&self) -> Vec<f64> {
        let count = (((self.max - self.min) / self.step).round() as usize).min(MAX_TICKS);
        (0..=count).map(|i| self.min + i as f64 * self.step).collect()
    }

    fn label(&self, value: f64) -> String {
        let decimals = if self.step >= 1.0 {
            0
        } else {
            (-self.step.log10()).ceil() as usize
        };
        // avoid "-0"
        let value = if value.abs() < self.step * 1e-6 { 0.0 } else { value };
        format!("{:.*}", decimals, value)
    }
}

struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    x: Axis,
    y: Axis,
}

impl Frame {
    fn new(size: PlotSize, x: Axis, y: Axis) -> Result<Self, RenderError> {
        let width = size.width as f64 - MARGIN_LEFT - MARGIN_RIGHT;
        let height = size.height as f64 - MARGIN_TOP - MARGIN_BOTTOM;
        if width <= 0.0 || height <= 0.0 {
            return Err(RenderError::SvgError("Invalid viewport size".to_string()));
        }
        Ok(Self {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width,
            height,
            x,
            y,
        })
    }

    fn px(&self, x: f64) -> f64 {
        self.left + (x - self.x.min) / (self.x.max - self.x.min) * self.width
    }

    fn py(&self, y: f64) -> f64 {
        self.top + self.height - (y - self.y.min) / (self.y.max - self.y.min) * self.height
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }
}

pub fn render_elevation_svg(
    distances_km: &[f64],
    elevations_m: &[f64],
    size: PlotSize,
) -> Result<String, RenderError> {
    if distances_km.is_empty() || distances_km.len() != elevations_m.len() {
        return Err(RenderError::MissingData("elevation"));
    }
    if distances_km.iter().chain(elevations_m).any(|v| !v.is_finite()) {
        return Err(RenderError::SvgError("Non-finite elevation sample".to_string()));
    }

    let (x_min, x_max) = bounds(distances_km);
    let (e_min, e_max) = bounds(elevations_m);
    // the area is filled down to zero, so zero must be visible
    let frame = Frame::new(
        size,
        Axis::nice(x_min, x_max)?,
        Axis::nice(e_min.min(0.0), e_max.max(0.0))?,
    )?;

    let coords: Vec<(f64, f64)> = distances_km
        .iter()
        .zip(elevations_m)
        .map(|(x, y)| (frame.px(*x), frame.py(*y)))
        .collect();

    let line = build_polyline_path(&coords);
    let baseline = frame.py(0.0);
    let area = format!(
        "{} L {:.2} {:.2} L {:.2} {:.2} Z",
        line,
        coords[coords.len() - 1].0,
        baseline,
        coords[0].0,
        baseline
    );

    let body = format!(
        r#"<path d="{}" fill="{}" fill-opacity="{:.2}" stroke="none"/>
  <path d="{}" fill="none" stroke="{}" stroke-width="1.5" stroke-linejoin="round"/>"#,
        area, ELEVATION_COLOR, ELEVATION_FILL_OPACITY, line, ELEVATION_COLOR
    );

    Ok(wrap_plot(
        size,
        &frame,
        &body,
        "Distance (km)",
        "Elevation (m)",
        Some("Elevation Profile"),
    ))
}

pub fn render_histogram_svg(histogram: &Histogram, size: PlotSize) -> Result<String, RenderError> {
    if histogram.counts.is_empty() || histogram.edges.len() != histogram.counts.len() + 1 {
        return Err(RenderError::SvgError("Malformed histogram".to_string()));
    }

    let max_count = histogram.counts.iter().copied().max().unwrap_or(0).max(1);
    let lo = histogram.edges[0];
    let hi = histogram.edges[histogram.edges.len() - 1];
    let frame = Frame::new(size, Axis::nice(lo, hi)?, Axis::nice(0.0, max_count as f64)?)?;

    let mut bars = String::new();
    for (i, count) in histogram.counts.iter().copied().enumerate() {
        if count == 0 {
            continue;
        }
        let x0 = frame.px(histogram.edges[i]);
        let x1 = frame.px(histogram.edges[i + 1]);
        let y = frame.py(count as f64);
        bars.push_str(&format!(
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" fill-opacity="{:.2}"/>"#,
            x0,
            y,
            (x1 - x0).max(0.5),
            frame.bottom() - y,
            HISTOGRAM_COLOR,
            HISTOGRAM_OPACITY
        ));
    }

    Ok(wrap_plot(size, &frame, &bars, "Speed (km/h)", "Frequency", None))
}

/// Equal-width bins over the sample range; the last bin includes its upper edge.
pub fn histogram(values: &[f64], bins: usize) -> Option<Histogram> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return None;
    }

    let (mut lo, mut hi) = bounds(&finite);
    if !(hi - lo).is_finite() {
        return None;
    }
    if hi - lo <= f64::EPSILON {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let edges = (0..=bins).map(|i| lo + i as f64 * width).collect();
    let mut counts = vec![0usize; bins];
    for value in finite {
        let idx = (((value - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    Some(Histogram { edges, counts })
}

fn wrap_plot(
    size: PlotSize,
    frame: &Frame,
    body: &str,
    x_label: &str,
    y_label: &str,
    title: Option<&str>,
) -> String {
    let mut grid = String::new();
    let mut labels = String::new();

    for tick in frame.x.ticks() {
        let x = frame.px(tick);
        grid.push_str(&format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="0.8"/>"#,
            x, frame.top, x, frame.bottom(), GRID_COLOR
        ));
        labels.push_str(&format!(
            r##"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="11" text-anchor="middle" fill="#000000">{}</text>"##,
            x,
            frame.bottom() + 16.0,
            FONT_FAMILY,
            frame.x.label(tick)
        ));
    }
    for tick in frame.y.ticks() {
        let y = frame.py(tick);
        grid.push_str(&format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="0.8"/>"#,
            frame.left, y, frame.right(), y, GRID_COLOR
        ));
        labels.push_str(&format!(
            r##"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="11" text-anchor="end" fill="#000000">{}</text>"##,
            frame.left - 6.0,
            y + 4.0,
            FONT_FAMILY,
            frame.y.label(tick)
        ));
    }

    let title = title
        .map(|t| {
            format!(
                r##"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="14" text-anchor="middle" fill="#000000">{}</text>"##,
                frame.left + frame.width / 2.0,
                frame.top - 14.0,
                FONT_FAMILY,
                t
            )
        })
        .unwrap_or_default();

    let y_label_x = 18.0;
    let y_label_y = frame.top + frame.height / 2.0;

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
  <g>{grid}</g>
  <defs><clipPath id="plotArea"><rect x="{l:.2}" y="{t:.2}" width="{pw:.2}" height="{ph:.2}"/></clipPath></defs>
  <g clip-path="url(#plotArea)">
  {body}
  </g>
  <rect x="{l:.2}" y="{t:.2}" width="{pw:.2}" height="{ph:.2}" fill="none" stroke="#000000" stroke-width="1"/>
  {labels}
  <text x="{xlx:.2}" y="{xly:.2}" font-family="{font}" font-size="12" text-anchor="middle" fill="#000000">{x_label}</text>
  <text x="{ylx:.2}" y="{yly:.2}" font-family="{font}" font-size="12" text-anchor="middle" fill="#000000" transform="rotate(-90 {ylx:.2} {yly:.2})">{y_label}</text>
  {title}
</svg>"##,
        w = size.width,
        h = size.height,
        grid = grid,
        l = frame.left,
        t = frame.top,
        pw = frame.width,
        ph = frame.height,
        body = body,
        labels = labels,
        xlx = frame.left + frame.width / 2.0,
        xly = frame.bottom() + 40.0,
        font = FONT_FAMILY,
        x_label = x_label,
        ylx = y_label_x,
        yly = y_label_y,
        y_label = y_label,
        title = title,
    )
}

fn bounds(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (min, max)
}

fn nice_step(raw: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn build_polyline_path(points: &[(f64, f64)]) -> String {
    points.iter().enumerate().fold(String::new(), |mut s, (i, (x, y))| {
        if i == 0 {
            s.push_str(&format!("M {:.2} {:.2}", x, y));
        } else {
            s.push_str(&format!(" L {:.2} {:.2}", x, y));
        }
        s
    })
}
