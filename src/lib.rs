pub mod config;
pub mod error;
pub mod pipeline;
pub mod routes;
pub mod state;
pub mod types;

pub use pipeline::{
    analyze, build_track, render_elevation_profile, render_map, render_speed_distribution, summarize,
};
