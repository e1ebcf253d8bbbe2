//! Turns raw ultra-short-range forecast observations into chat text.

use std::collections::{BTreeMap, HashMap};

use crate::{
    error::{Result, WeatherError},
    model::Observation,
};

pub const TEMPERATURE: &str = "T1H";
pub const HUMIDITY: &str = "REH";
pub const PRECIPITATION: &str = "RN1";
pub const WIND_SPEED: &str = "WSD";
pub const SKY: &str = "SKY";
pub const PRECIPITATION_TYPE: &str = "PTY";

const NO_PRECIPITATION: &str = "강수없음";

/// All categories reported for one forecast time, keyed by category code.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ForecastSlot<'a> {
    values: HashMap<&'a str, &'a str>,
}

impl<'a> ForecastSlot<'a> {
    /// Raw value for a category, or `""` when the slot lacks it.
    pub fn get(&self, category: &str) -> &'a str {
        self.values.get(category).copied().unwrap_or("")
    }

    fn render(&self, time: &str) -> String {
        format!(
            "{} 날씨\n하늘상태: {}\n강수형태: {}\n기온: {}℃\n습도: {}%\n강수량: {}\n풍속: {}m/s",
            time_label(time),
            sky_label(self.get(SKY)),
            precipitation_type_label(self.get(PRECIPITATION_TYPE)),
            self.get(TEMPERATURE),
            self.get(HUMIDITY),
            precipitation_amount(self.get(PRECIPITATION)),
            self.get(WIND_SPEED),
        )
    }
}

/// Group observations by forecast time. Iteration order is ascending time.
pub fn group_by_time(observations: &[Observation]) -> BTreeMap<&str, ForecastSlot<'_>> {
    let mut slots: BTreeMap<&str, ForecastSlot<'_>> = BTreeMap::new();
    for obs in observations {
        slots
            .entry(obs.time.as_str())
            .or_default()
            .values
            .insert(obs.category.as_str(), obs.value.as_str());
    }
    slots
}

/// Render a multi-slot report, one block per forecast time, oldest first.
pub fn aggregate(observations: &[Observation]) -> Result<String> {
    if observations.is_empty() {
        return Err(WeatherError::EmptyForecast);
    }

    let blocks: Vec<String> = group_by_time(observations)
        .iter()
        .map(|(time, slot)| slot.render(time))
        .collect();

    Ok(blocks.join("\n\n"))
}

pub fn sky_label(code: &str) -> &'static str {
    match code {
        "1" => "☀️ 맑음",
        "3" => "⛅ 구름많음",
        "4" => "☁️ 흐림",
        _ => "",
    }
}

pub fn precipitation_type_label(code: &str) -> &'static str {
    match code {
        "0" => "☀️ 맑음",
        "1" => "🌧️ 비",
        "2" => "🌧️ 🌨️ 비/눈",
        "3" => "🌨️ 눈",
        "5" => "🌧️ 빗방울",
        "6" => "🌧️ 🌨️ 빗방울눈날림",
        "7" => "🌨️ 눈날림",
        _ => "",
    }
}

/// `RN1` reports "no rain" several different ways.
pub fn precipitation_amount(value: &str) -> String {
    match value {
        NO_PRECIPITATION | "-" | "0" | "null" => NO_PRECIPITATION.to_string(),
        other => format!("{other}mm"),
    }
}

/// "0630" -> "06:00". The ultra-short-range forecast is hourly.
pub fn time_label(time: &str) -> String {
    let hour = time.get(..2).unwrap_or(time);
    format!("{hour}:00")
}
