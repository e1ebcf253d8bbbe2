//! Lambert conformal conic projection onto the KMA 5 km forecast grid.

use std::f64::consts::PI;

use crate::model::{Coordinate, GridCell};

/// Earth radius in km.
const RE: f64 = 6371.00877;
/// Grid spacing in km.
const GRID: f64 = 5.0;
const SLAT1: f64 = 30.0;
const SLAT2: f64 = 60.0;
const OLON: f64 = 126.0;
const OLAT: f64 = 38.0;
/// Reference point in grid units.
const XO: f64 = 210.0 / GRID;
const YO: f64 = 675.0 / GRID;

const DEGRAD: f64 = PI / 180.0;

/// Map longitude/latitude in degrees to the grid cell containing them.
///
/// Both axes are rounded up, matching the cell boundary convention the
/// forecast API uses for `nx`/`ny`.
pub fn project(longitude: f64, latitude: f64) -> GridCell {
    let re = RE / GRID;
    let slat1 = SLAT1 * DEGRAD;
    let slat2 = SLAT2 * DEGRAD;
    let olon = OLON * DEGRAD;
    let olat = OLAT * DEGRAD;

    let sn = (slat1.cos() / slat2.cos()).ln()
        / ((PI * 0.25 + slat2 * 0.5).tan() / (PI * 0.25 + slat1 * 0.5).tan()).ln();
    let sf = (PI * 0.25 + slat1 * 0.5).tan().powf(sn) * slat1.cos() / sn;
    let ro = re * sf / (PI * 0.25 + olat * 0.5).tan().powf(sn);
    let ra = re * sf / (PI * 0.25 + latitude * DEGRAD * 0.5).tan().powf(sn);

    let mut theta = longitude * DEGRAD - olon;
    if theta > PI {
        theta -= 2.0 * PI;
    }
    if theta < -PI {
        theta += 2.0 * PI;
    }
    theta *= sn;

    let x = ra * theta.sin() + XO;
    let y = ro - ra * theta.cos() + YO;

    GridCell {
        x: x.ceil() as i32,
        y: y.ceil() as i32,
    }
}

impl From<Coordinate> for GridCell {
    fn from(c: Coordinate) -> Self {
        project(c.longitude, c.latitude)
    }
}
