//! Pure classification of raw weather fields into display categories.
//!
//! Every function here is total: absent or out-of-range input degrades to a
//! defined category, never an error. The snow-over-rain display tie-break
//! belongs to callers; snow presence and rain intensity are exposed
//! independently so callers can apply it.

use std::fmt;

use crate::model::CurrentWeather;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Day,
    Night,
}

impl TimeOfDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Day => "Day",
            TimeOfDay::Night => "Night",
        }
    }
}

/// Rain intensity bands, ordered from dry to heaviest.
///
/// Band edges are half-open on the lower bound across the whole range, so
/// the bands cover every non-negative intensity with no gaps or overlaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precipitation {
    NotRaining,
    Slight,
    Moderate,
    Heavy,
    VeryHeavy,
}

impl Precipitation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Precipitation::NotRaining => "not raining",
            Precipitation::Slight => "slightly",
            Precipitation::Moderate => "moderately",
            Precipitation::Heavy => "heavily",
            Precipitation::VeryHeavy => "very heavily",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudCover {
    Clear,
    PartiallyCloudy,
    MostlyCloudy,
    Overcast,
    Unavailable,
}

impl CloudCover {
    pub fn as_str(&self) -> &'static str {
        match self {
            CloudCover::Clear => "Clear",
            CloudCover::PartiallyCloudy => "Partially cloudy",
            CloudCover::MostlyCloudy => "Mostly cloudy",
            CloudCover::Overcast => "Overcast",
            CloudCover::Unavailable => "unavailable",
        }
    }
}

/// `Some(1)` is day; anything else, including absent, is night.
pub fn time_of_day(is_day: Option<u8>) -> TimeOfDay {
    match is_day {
        Some(1) => TimeOfDay::Day,
        _ => TimeOfDay::Night,
    }
}

/// Band the combined rain/showers intensity; absent readings count as 0.
pub fn precipitation_intensity(rain: Option<f64>, showers: Option<f64>) -> Precipitation {
    let intensity = rain.unwrap_or(0.0).max(showers.unwrap_or(0.0));

    if intensity < 0.1 {
        Precipitation::NotRaining
    } else if intensity < 0.2 {
        Precipitation::Slight
    } else if intensity < 0.5 {
        Precipitation::Moderate
    } else if intensity < 1.0 {
        Precipitation::Heavy
    } else {
        Precipitation::VeryHeavy
    }
}

/// Any positive snowfall reading counts as snowing.
pub fn is_snowing(snowfall: Option<f64>) -> bool {
    snowfall.unwrap_or(0.0) > 0.0
}

/// Band a cloud-cover percentage. 20 and 40 belong to "Partially cloudy",
/// 70 to "Mostly cloudy". Readings outside 0–100 (or absent, or NaN) are
/// "unavailable".
pub fn cloud_cover(pct: Option<f64>) -> CloudCover {
    let Some(pct) = pct else {
        return CloudCover::Unavailable;
    };

    if !(0.0..=100.0).contains(&pct) {
        CloudCover::Unavailable
    } else if pct < 20.0 {
        CloudCover::Clear
    } else if pct <= 40.0 {
        CloudCover::PartiallyCloudy
    } else if pct <= 70.0 {
        CloudCover::MostlyCloudy
    } else {
        CloudCover::Overcast
    }
}

/// All four classification signals for one set of conditions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConditionsSummary {
    pub time_of_day: TimeOfDay,
    pub precipitation: Precipitation,
    pub snowing: bool,
    pub cloud_cover: CloudCover,
}

impl ConditionsSummary {
    pub fn of(conditions: &CurrentWeather) -> Self {
        Self {
            time_of_day: time_of_day(conditions.is_day),
            precipitation: precipitation_intensity(conditions.rain, conditions.showers),
            snowing: is_snowing(conditions.snowfall),
            cloud_cover: cloud_cover(conditions.cloud_cover),
        }
    }
}

impl fmt::Display for ConditionsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, raining: {}",
            self.time_of_day.as_str(),
            self.cloud_cover.as_str(),
            self.precipitation.as_str(),
        )?;
        if self.snowing {
            f.write_str(", snowing")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_only_for_exactly_one() {
        assert_eq!(time_of_day(Some(1)), TimeOfDay::Day);
        assert_eq!(time_of_day(Some(0)), TimeOfDay::Night);
        assert_eq!(time_of_day(Some(2)), TimeOfDay::Night);
        assert_eq!(time_of_day(None), TimeOfDay::Night);
    }

    #[test]
    fn precipitation_band_edges() {
        assert_eq!(precipitation_intensity(Some(0.0), None), Precipitation::NotRaining);
        assert_eq!(precipitation_intensity(Some(0.09), None), Precipitation::NotRaining);
        assert_eq!(precipitation_intensity(Some(0.1), None), Precipitation::Slight);
        assert_eq!(precipitation_intensity(Some(0.19), None), Precipitation::Slight);
        assert_eq!(precipitation_intensity(Some(0.2), None), Precipitation::Moderate);
        assert_eq!(precipitation_intensity(Some(0.49), None), Precipitation::Moderate);
        assert_eq!(precipitation_intensity(Some(0.5), None), Precipitation::Heavy);
        assert_eq!(precipitation_intensity(Some(0.99), None), Precipitation::Heavy);
        assert_eq!(precipitation_intensity(Some(1.0), None), Precipitation::VeryHeavy);
        assert_eq!(precipitation_intensity(Some(12.5), None), Precipitation::VeryHeavy);
    }

    #[test]
    fn precipitation_takes_max_of_rain_and_showers() {
        assert_eq!(precipitation_intensity(Some(0.05), Some(0.3)), Precipitation::Moderate);
        assert_eq!(precipitation_intensity(Some(0.7), Some(0.1)), Precipitation::Heavy);
        assert_eq!(precipitation_intensity(None, Some(1.2)), Precipitation::VeryHeavy);
    }

    #[test]
    fn precipitation_absent_is_not_raining() {
        assert_eq!(precipitation_intensity(None, None), Precipitation::NotRaining);
    }

    #[test]
    fn precipitation_monotonic_in_intensity() {
        let samples = [0.0, 0.05, 0.1, 0.15, 0.2, 0.3, 0.5, 0.8, 1.0, 2.0, 50.0];
        let bands: Vec<_> = samples
            .iter()
            .map(|&mm| precipitation_intensity(Some(mm), None))
            .collect();
        assert!(bands.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn snow_requires_positive_reading() {
        assert!(is_snowing(Some(0.1)));
        assert!(!is_snowing(Some(0.0)));
        assert!(!is_snowing(None));
    }

    #[test]
    fn cloud_cover_boundaries() {
        assert_eq!(cloud_cover(Some(0.0)), CloudCover::Clear);
        assert_eq!(cloud_cover(Some(19.9)), CloudCover::Clear);
        assert_eq!(cloud_cover(Some(20.0)), CloudCover::PartiallyCloudy);
        assert_eq!(cloud_cover(Some(40.0)), CloudCover::PartiallyCloudy);
        assert_eq!(cloud_cover(Some(40.0001)), CloudCover::MostlyCloudy);
        assert_eq!(cloud_cover(Some(70.0)), CloudCover::MostlyCloudy);
        assert_eq!(cloud_cover(Some(70.1)), CloudCover::Overcast);
        assert_eq!(cloud_cover(Some(100.0)), CloudCover::Overcast);
    }

    #[test]
    fn cloud_cover_out_of_range_is_unavailable() {
        assert_eq!(cloud_cover(Some(101.0)), CloudCover::Unavailable);
        assert_eq!(cloud_cover(Some(-0.1)), CloudCover::Unavailable);
        assert_eq!(cloud_cover(Some(f64::NAN)), CloudCover::Unavailable);
        assert_eq!(cloud_cover(None), CloudCover::Unavailable);
    }

    #[test]
    fn summary_exposes_rain_and_snow_independently() {
        let conditions = CurrentWeather {
            is_day: Some(0),
            temperature: Some(-1.0),
            windspeed: Some(5.0),
            relative_humidity: Some(90.0),
            cloud_cover: Some(85.0),
            rain: Some(0.3),
            showers: None,
            snowfall: Some(1.2),
        };

        let summary = ConditionsSummary::of(&conditions);
        assert_eq!(summary.time_of_day, TimeOfDay::Night);
        assert_eq!(summary.precipitation, Precipitation::Moderate);
        assert!(summary.snowing);
        assert_eq!(summary.cloud_cover, CloudCover::Overcast);
        assert_eq!(summary.to_string(), "Night, Overcast, raining: moderately, snowing");
    }
}
