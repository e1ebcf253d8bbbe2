//! Core library for the weather chatbot skill.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Projection of coordinates onto the KMA forecast grid
//! - Aggregation of raw forecast observations into chat text
//! - Geocoding and forecast clients behind provider traits
//! - Skill request/response payloads
//!
//! It is used by `weatherbot-server`, but can also be reused by other binaries.

pub mod config;
pub mod error;
pub mod forecast;
pub mod grid;
pub mod model;
pub mod provider;
pub mod service;
pub mod skill;

pub use config::{ApiKeys, Config};
pub use error::WeatherError;
pub use forecast::aggregate;
pub use grid::project;
pub use model::{Coordinate, GridCell, Observation};
pub use provider::{ForecastSource, LocationResolver};
pub use service::WeatherService;
pub use skill::{SkillRequest, SkillResponse};
