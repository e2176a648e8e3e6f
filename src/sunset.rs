//! Approximate sunset estimate for a fixed observer.
//!
//! Illustrative accuracy only: day-of-year → solar declination → hour angle,
//! with a flat one-hour daylight-saving shift inside a fixed window.

use crate::clock;
use crate::config::{MonthDay, ObserverLocation};
use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Length of the golden-hour blocking window that ends at sunset.
pub const GOLDEN_WINDOW_MINUTES: i64 = 20;

const AXIAL_TILT_DEG: f64 = 23.44;

/// `[start, end)` interval reserved for golden-hour photography.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunsetWindow {
    #[serde(with = "clock::hhmm")]
    pub start: NaiveTime,
    #[serde(with = "clock::hhmm")]
    pub end: NaiveTime,
}

impl SunsetWindow {
    pub fn ending_at(sunset: NaiveTime) -> Self {
        let end = clock::to_minutes(sunset);
        Self {
            start: clock::from_minutes(end - GOLDEN_WINDOW_MINUTES),
            end: sunset,
        }
    }

    pub fn start_minutes(&self) -> i64 {
        clock::to_minutes(self.end) - GOLDEN_WINDOW_MINUTES
    }

    pub fn end_minutes(&self) -> i64 {
        clock::to_minutes(self.end)
    }

    /// True when `[start, start + duration)` intersects the window.
    pub fn overlaps(&self, start: i64, duration: i64) -> bool {
        start < self.end_minutes() && start + duration > self.start_minutes()
    }
}

pub fn is_daylight_saving(date: NaiveDate, location: &ObserverLocation) -> bool {
    let day = MonthDay::new(date.month(), date.day());
    day >= location.dst_start && day <= location.dst_end
}

/// Sunset as minutes after local midnight, before rounding.
fn sunset_minutes(date: NaiveDate, location: &ObserverLocation) -> f64 {
    let day_of_year = f64::from(date.ordinal());
    let declination = AXIAL_TILT_DEG.to_radians() * (2.0 * PI * (284.0 + day_of_year) / 365.0).sin();
    let latitude = location.latitude_deg.to_radians();
    let cos_hour_angle = (-latitude.tan() * declination.tan()).clamp(-1.0, 1.0);
    let hour_angle_deg = cos_hour_angle.acos().to_degrees();

    let mut minutes = location.solar_noon_minutes as f64 + hour_angle_deg / 15.0 * 60.0;
    if is_daylight_saving(date, location) {
        minutes += 60.0;
    }
    minutes
}

pub fn estimate_sunset(date: Option<NaiveDate>, location: &ObserverLocation) -> Option<NaiveTime> {
    let date = date?;
    let minutes = sunset_minutes(date, location).round() as i64;
    Some(clock::from_minutes(minutes.clamp(0, clock::MINUTES_PER_DAY - 1)))
}

pub fn sunset_window(date: Option<NaiveDate>, location: &ObserverLocation) -> Option<SunsetWindow> {
    estimate_sunset(date, location).map(SunsetWindow::ending_at)
}
