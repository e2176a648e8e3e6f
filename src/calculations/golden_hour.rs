use super::forward_pass::Program;
use crate::sunset::SunsetWindow;
use serde::{Deserialize, Serialize};

/// Which part of the day the golden-hour window lands in. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoldenHourZone {
    /// Sunset comes before the ceremony starts.
    Early,
    Dinner,
    Dancing,
    Scheduled,
}

impl GoldenHourZone {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoldenHourZone::Early => "early",
            GoldenHourZone::Dinner => "dinner",
            GoldenHourZone::Dancing => "dancing",
            GoldenHourZone::Scheduled => "scheduled",
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, GoldenHourZone::Early)
    }

    pub fn message(&self) -> &'static str {
        match self {
            GoldenHourZone::Early => {
                "Sunset is before the ceremony; consider an earlier ceremony time for golden hour portraits."
            }
            GoldenHourZone::Dinner => "Golden hour falls during dinner; plan to step out between courses.",
            GoldenHourZone::Dancing => "Golden hour falls after dancing starts.",
            GoldenHourZone::Scheduled => "Golden hour portraits are scheduled.",
        }
    }
}

pub fn classify(window: &SunsetWindow, anchor: i64, program: &Program) -> GoldenHourZone {
    let start = window.start_minutes();
    if window.end_minutes() <= anchor {
        GoldenHourZone::Early
    } else if start >= program.meal_start && start < program.meal_end {
        GoldenHourZone::Dinner
    } else if program.dancing_start.is_some_and(|dancing| start >= dancing) {
        GoldenHourZone::Dancing
    } else {
        GoldenHourZone::Scheduled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn program() -> Program {
        Program {
            placements: Vec::new(),
            cocktail_start: 17 * 60,
            meal_start: 18 * 60 + 15,
            meal_end: 19 * 60 + 30,
            dancing_start: Some(20 * 60),
        }
    }

    fn window(h: u32, m: u32) -> SunsetWindow {
        SunsetWindow::ending_at(NaiveTime::from_hms_opt(h, m, 0).unwrap())
    }

    #[test]
    fn zones_follow_the_evening() {
        let anchor = 16 * 60;
        assert_eq!(classify(&window(15, 50), anchor, &program()), GoldenHourZone::Early);
        assert_eq!(classify(&window(16, 0), anchor, &program()), GoldenHourZone::Early);
        assert_eq!(classify(&window(17, 40), anchor, &program()), GoldenHourZone::Scheduled);
        assert_eq!(classify(&window(18, 50), anchor, &program()), GoldenHourZone::Dinner);
        assert_eq!(classify(&window(19, 55), anchor, &program()), GoldenHourZone::Scheduled);
        assert_eq!(classify(&window(20, 30), anchor, &program()), GoldenHourZone::Dancing);
    }

    #[test]
    fn no_dancing_means_no_dancing_zone() {
        let mut p = program();
        p.dancing_start = None;
        assert_eq!(classify(&window(21, 0), 16 * 60, &p), GoldenHourZone::Scheduled);
        assert!(GoldenHourZone::Early.is_warning());
        assert!(!GoldenHourZone::Dinner.is_warning());
    }
}
