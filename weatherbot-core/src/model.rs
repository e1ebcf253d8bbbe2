use serde::{Deserialize, Serialize};

use crate::error::{Result, WeatherError};

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinate {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Build from the string-encoded `x`/`y` pair the geocoder returns.
    pub fn parse(x: &str, y: &str) -> Result<Self> {
        let longitude = x
            .trim()
            .parse::<f64>()
            .map_err(|_| WeatherError::CoordinateParse {
                axis: "longitude",
                value: x.to_string(),
            })?;
        let latitude = y
            .trim()
            .parse::<f64>()
            .map_err(|_| WeatherError::CoordinateParse {
                axis: "latitude",
                value: y.to_string(),
            })?;

        Ok(Self {
            longitude,
            latitude,
        })
    }
}

/// Cell address in the 5 km forecast grid (`nx`, `ny` in the forecast API).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}

/// One forecast reading for a single category at a single forecast time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(rename = "fcstTime")]
    pub time: String,
    pub category: String,
    #[serde(rename = "fcstValue")]
    pub value: String,
}

impl Observation {
    pub fn new(
        time: impl Into<String>,
        category: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            time: time.into(),
            category: category.into(),
            value: value.into(),
        }
    }
}
