//! OpenWeatherMap payloads to [`CurrentWeather`], [`HourlyForecast`] and
//! [`ForecastDay`].
//!
//! Daily aggregation groups the 3-hourly samples by SAST calendar date, looks
//! at the first six dates, drops any on or before today, and keeps at most
//! five. Icon and description are each the most frequent value for the day;
//! ties go to whichever value appeared first.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate};
use saportal_core::{clock, CurrentWeather, ForecastDay, HourlyForecast};

use crate::error::UpstreamError;
use crate::text::{ms_to_kmh, round_whole, title_case};
use crate::types::{ApiCondition, CurrentWeatherResponse, ForecastResponse, ForecastSample};

const PROVIDER: &str = "OpenWeatherMap";

/// Samples shown in the hourly strip (24 hours at 3-hour spacing).
pub const HOURLY_SAMPLES: usize = 8;
/// Calendar dates considered for the daily outlook, today included.
const CANDIDATE_DAYS: usize = 6;
pub const MAX_FORECAST_DAYS: usize = 5;
/// OpenWeatherMap omits `visibility` when it is at its 10 km ceiling.
const DEFAULT_VISIBILITY_M: f64 = 10_000.0;

fn condition(weather: &[ApiCondition]) -> Result<&ApiCondition, UpstreamError> {
    weather.first().ok_or(UpstreamError::MissingField {
        provider: PROVIDER,
        field: "weather[0]",
    })
}

fn local_time(secs: i64, field: &'static str) -> Result<DateTime<FixedOffset>, UpstreamError> {
    clock::from_unix(secs).ok_or(UpstreamError::MissingField {
        provider: PROVIDER,
        field,
    })
}

/// Normalizes the `/weather` response. `now` stamps the record.
///
/// # Errors
///
/// Returns [`UpstreamError::MissingField`] if the response has no weather
/// condition or a sunrise/sunset outside the representable range.
pub fn normalize_current(
    current: &CurrentWeatherResponse,
    now: DateTime<FixedOffset>,
) -> Result<CurrentWeather, UpstreamError> {
    let cond = condition(&current.weather)?;
    let sunrise = local_time(current.sys.sunrise, "sys.sunrise")?;
    let sunset = local_time(current.sys.sunset, "sys.sunset")?;

    Ok(CurrentWeather {
        temp: round_whole(current.main.temp),
        feels_like: round_whole(current.main.feels_like),
        humidity: round_whole(current.main.humidity),
        pressure: round_whole(current.main.pressure),
        wind_speed: ms_to_kmh(current.wind.speed),
        wind_deg: round_whole(current.wind.deg.unwrap_or(0.0)),
        description: title_case(&cond.description),
        icon: cond.icon.clone(),
        visibility: current.visibility.unwrap_or(DEFAULT_VISIBILITY_M) / 1000.0,
        clouds: round_whole(current.clouds.as_ref().map_or(0.0, |c| c.all)),
        sunrise: sunrise.format("%H:%M").to_string(),
        sunset: sunset.format("%H:%M").to_string(),
        timestamp: now.to_rfc3339(),
    })
}

/// The first [`HOURLY_SAMPLES`] forecast samples with `"3 PM"` style labels.
///
/// # Errors
///
/// Returns [`UpstreamError::MissingField`] if a sample has no weather
/// condition or an out-of-range timestamp.
pub fn normalize_hourly(forecast: &ForecastResponse) -> Result<Vec<HourlyForecast>, UpstreamError> {
    forecast
        .list
        .iter()
        .take(HOURLY_SAMPLES)
        .map(|sample| {
            let cond = condition(&sample.weather)?;
            let at = local_time(sample.dt, "list.dt")?;
            Ok(HourlyForecast {
                time: at.format("%-I %p").to_string(),
                temp: round_whole(sample.main.temp),
                feels_like: round_whole(sample.main.feels_like),
                description: title_case(&cond.description),
                icon: cond.icon.clone(),
                humidity: round_whole(sample.main.humidity),
                wind_speed: ms_to_kmh(sample.wind.speed),
                pop: round_whole(sample.pop.unwrap_or(0.0) * 100.0),
                clouds: round_whole(sample.clouds.as_ref().map_or(0.0, |c| c.all)),
            })
        })
        .collect()
}

#[derive(Default)]
struct DayBucket<'a> {
    temps: Vec<f64>,
    icons: Vec<&'a str>,
    descriptions: Vec<&'a str>,
}

/// Most frequent value; on a tie the earliest-seen value wins.
fn mode<'a>(values: &[&'a str]) -> Option<&'a str> {
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    for &value in values {
        match counts.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }
    let mut best: Option<(&'a str, usize)> = None;
    for (value, count) in counts {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Aggregates 3-hourly samples into at most [`MAX_FORECAST_DAYS`] future days.
///
/// # Errors
///
/// Returns [`UpstreamError::MissingField`] if a sample has no weather
/// condition or an out-of-range timestamp.
pub fn normalize_daily(
    forecast: &ForecastResponse,
    today: NaiveDate,
) -> Result<Vec<ForecastDay>, UpstreamError> {
    let mut days: BTreeMap<NaiveDate, DayBucket<'_>> = BTreeMap::new();
    for sample in &forecast.list {
        bucket_sample(&mut days, sample)?;
    }

    let mut out = Vec::with_capacity(MAX_FORECAST_DAYS);
    for (date, bucket) in days.into_iter().take(CANDIDATE_DAYS) {
        if date <= today {
            continue;
        }
        #[allow(clippy::cast_precision_loss)]
        let avg = bucket.temps.iter().sum::<f64>() / bucket.temps.len() as f64;
        let min = bucket.temps.iter().copied().fold(f64::INFINITY, f64::min);
        let max = bucket.temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        out.push(ForecastDay {
            date: date.format("%Y-%m-%d").to_string(),
            day_name: date.format("%a").to_string(),
            month_day: date.format("%b %d").to_string(),
            temp_avg: round_whole(avg),
            temp_min: round_whole(min),
            temp_max: round_whole(max),
            dominant_icon: mode(&bucket.icons).unwrap_or_default().to_string(),
            dominant_description: title_case(mode(&bucket.descriptions).unwrap_or_default()),
        });
        if out.len() == MAX_FORECAST_DAYS {
            break;
        }
    }
    Ok(out)
}

fn bucket_sample<'a>(
    days: &mut BTreeMap<NaiveDate, DayBucket<'a>>,
    sample: &'a ForecastSample,
) -> Result<(), UpstreamError> {
    let cond = condition(&sample.weather)?;
    let date = local_time(sample.dt, "list.dt")?.date_naive();
    let bucket = days.entry(date).or_default();
    bucket.temps.push(sample.main.temp);
    bucket.icons.push(&cond.icon);
    bucket.descriptions.push(&cond.description);
    Ok(())
}
