//! Tilewall core — client SDK for a tiled visualisation-wall service.
//!
//! A `Space` mirrors one display wall: its pixel geometry, logical grid,
//! and the rectangular `Section`s placed on it, each hosting one of six app
//! variants (maps, images, html, videos, networks, charts). The SDK drives
//! the wall's REST control surface, serializes layouts to the wall's JSON
//! file format, and ships a small static-file server for exposing local
//! images to the wall.

pub mod apps;
pub mod client;
pub mod config;
pub mod error;
pub mod section;
pub mod server;
pub mod space;
pub mod videos;

pub use apps::AppKind;
pub use config::{Geometry, PortMap, WallConfig};
pub use error::WallError;
pub use section::{Frame, Section};
pub use server::ShareServer;
pub use space::{ChartSpec, MapPosition, NetworkData, SetDataNotice, Space};
