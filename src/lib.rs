//! star-hex: Hexagonal Star Charts
//!
//! A library and CLI tool that draws the night sky above any named place at
//! a local time, as a hexagon-clipped stereographic chart.
//!
//! ## Features
//!
//! - Geocoding through Photon or Nominatim, timezone lookup from embedded
//!   boundaries
//! - Hipparcos stars with proper motion and parallax, Stellarium
//!   constellation lines
//! - Static PNG charts and looping GIF animations
//!
//! ## Quick Start
//!
//! ```no_run
//! use star_hex::chart::hexagon::Hexagon;
//! use star_hex::chart::render::{render_png, ChartStyle};
//! use star_hex::chart::ChartLayout;
//! use star_hex::{Config, Resolver};
//! use std::path::Path;
//!
//! let config = Config::default();
//! let mut resolver = Resolver::from_config(&config)?;
//!
//! let view = resolver.resolve("Juneau, AK", "2023-11-01 15:00")?;
//! println!("{} stars projected", view.stars.len());
//!
//! let layout = ChartLayout::from_view(&view, 250.0).clipped_to(&Hexagon::unit());
//! render_png(Path::new("juneau.png"), &layout, &ChartStyle::from_config(&config))?;
//! # Ok::<(), star_hex::Error>(())
//! ```

pub mod chart;
pub mod cli;
pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod geo;
pub mod sky;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use geo::GeoLocation;
pub use sky::{Resolver, SkyView};
