use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Coordinates resolved by the geocoder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions, reshaped from the forecast upstream.
///
/// Every field is optional: anything the upstream omits stays absent here,
/// it is never defaulted to zero. Consumers decide how to render "unknown".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// 1 for day, 0 for night.
    pub is_day: Option<u8>,
    /// Air temperature, °C.
    pub temperature: Option<f64>,
    /// Wind speed, km/h.
    pub windspeed: Option<f64>,
    /// Relative humidity, %.
    pub relative_humidity: Option<f64>,
    /// Cloud cover, 0–100 %.
    pub cloud_cover: Option<f64>,
    /// Rain over the last interval, mm.
    pub rain: Option<f64>,
    /// Showers over the last interval, mm.
    pub showers: Option<f64>,
    /// Snowfall over the last interval, cm.
    pub snowfall: Option<f64>,
}

/// Per-day forecast, as parallel arrays index-aligned by day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyWeather {
    pub temperature_max: Vec<Option<f64>>,
    pub temperature_min: Vec<Option<f64>>,
    pub wind_speed_10m_max: Vec<Option<f64>>,
    /// ISO dates, one per entry of the arrays above.
    pub date: Vec<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_weather_serializes_absent_fields_as_null() {
        let conditions = CurrentWeather {
            is_day: Some(0),
            temperature: Some(5.0),
            windspeed: Some(10.0),
            relative_humidity: Some(80.0),
            cloud_cover: Some(15.0),
            rain: None,
            showers: None,
            snowfall: None,
        };

        let json = serde_json::to_value(&conditions).expect("serializes");
        assert_eq!(json["temperature"], serde_json::json!(5.0));
        assert!(json["rain"].is_null());
        assert!(json.get("snowfall").is_some());
    }

    #[test]
    fn daily_weather_dates_are_iso() {
        let daily = DailyWeather {
            temperature_max: vec![Some(21.3)],
            temperature_min: vec![Some(12.1)],
            wind_speed_10m_max: vec![Some(18.0)],
            date: vec![NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date")],
        };

        let json = serde_json::to_value(&daily).expect("serializes");
        assert_eq!(json["date"][0], "2025-03-14");
    }
}
