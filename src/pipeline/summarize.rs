use crate::types::track::{Track, TripSummary};

pub fn summarize(track: &Track) -> TripSummary {
    let total_distance_m: f64 = track.segments().iter().map(|s| s.distance_m).sum();

    let speeds: Vec<f64> = track.segments().iter().filter_map(|s| s.speed_mps).collect();
    let average_speed_kmh = if track.is_time_aware() && !speeds.is_empty() {
        let mean = speeds.iter().sum::<f64>() / speeds.len() as f64;
        Some(round2(mean * 3.6))
    } else {
        None
    };

    let total_elevation_gain_m: f64 = track
        .points()
        .windows(2)
        .map(|pair| (pair[1].elevation - pair[0].elevation).max(0.0))
        .sum();

    TripSummary {
        total_distance_km: round2(total_distance_m / 1000.0),
        average_speed_kmh,
        total_elevation_gain_m: round2(total_elevation_gain_m),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::build::build_track;
    use crate::types::track::RawPoint;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round2(1.234_9), 1.23);
        assert_eq!(round2(1.235_1), 1.24);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn average_speed_is_mean_of_segment_speeds() {
        let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap();
        let raw = vec![
            RawPoint::new(0.0, 0.0).with_time(t0),
            RawPoint::new(0.0, 0.001).with_time(t0 + Duration::seconds(10)),
            RawPoint::new(0.0, 0.002).with_time(t0 + Duration::seconds(30)),
        ];
        let track = build_track(&raw).expect("track");
        let d = track.segments()[0].distance_m;
        let expected = ((d / 10.0 + d / 20.0) / 2.0) * 3.6;

        let summary = summarize(&track);
        let avg = summary.average_speed_kmh.expect("average speed");
        assert!((avg - round2(expected)).abs() < 1e-9);
    }

    #[test]
    fn undefined_speeds_are_ignored_in_the_mean() {
        let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap();
        let raw = vec![
            RawPoint::new(0.0, 0.0).with_time(t0),
            RawPoint::new(0.0, 0.001).with_time(t0),
            RawPoint::new(0.0, 0.002).with_time(t0 + Duration::seconds(10)),
        ];
        let track = build_track(&raw).expect("track");
        let d = track.segments()[1].distance_m;

        let summary = summarize(&track);
        assert_eq!(summary.average_speed_kmh, Some(round2(d / 10.0 * 3.6)));
    }

    #[test]
    fn only_zero_duration_segments_give_no_average() {
        let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 8, 0, 0).unwrap();
        let raw = vec![
            RawPoint::new(0.0, 0.0).with_time(t0),
            RawPoint::new(0.0, 0.001).with_time(t0),
        ];
        let summary = summarize(&build_track(&raw).expect("track"));
        assert_eq!(summary.average_speed_kmh, None);
    }

    #[test]
    fn gain_only_counts_climbs() {
        let raw = vec![
            RawPoint::new(0.0, 0.0).with_elevation(100.0),
            RawPoint::new(0.0, 0.001).with_elevation(110.5),
            RawPoint::new(0.0, 0.002).with_elevation(90.0),
            RawPoint::new(0.0, 0.003).with_elevation(95.25),
        ];
        let summary = summarize(&build_track(&raw).expect("track"));
        assert_eq!(summary.total_elevation_gain_m, 15.75);
    }
}
