use super::{Placement, Resolver};
use crate::catalog::{
    AFTER_CEREMONY_ORDER, ActivityId, COCKTAIL_PHOTO_ORDER, RECEPTION_OPENING_ORDER, RITUAL_ORDER,
};
use crate::clock;
use crate::settings::RitualPlacement;
use crate::sunset::SunsetWindow;
use tracing::debug;

/// Landmarks of the program after the anchor, used for zone tagging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub placements: Vec<Placement>,
    pub cocktail_start: i64,
    pub meal_start: i64,
    pub meal_end: i64,
    pub dancing_start: Option<i64>,
}

pub struct ForwardPass<'r, 'a> {
    resolver: &'r Resolver<'a>,
    window: Option<SunsetWindow>,
}

impl<'r, 'a> ForwardPass<'r, 'a> {
    pub fn new(resolver: &'r Resolver<'a>, window: Option<SunsetWindow>) -> Self {
        Self { resolver, window }
    }

    pub fn execute(&self, anchor: i64) -> Program {
        let resolver = self.resolver;
        let mut placements = Vec::new();
        let mut cursor = anchor;

        if resolver.is_active(ActivityId::Ceremony) {
            placements.push(Placement {
                id: ActivityId::Ceremony,
                start: anchor,
            });
            cursor += resolver.duration(ActivityId::Ceremony);
        }
        cursor = self.sequence(AFTER_CEREMONY_ORDER, cursor, &mut placements);

        let cocktail_start = cursor;
        if resolver.is_active(ActivityId::CocktailHour) {
            placements.push(Placement {
                id: ActivityId::CocktailHour,
                start: cocktail_start,
            });
        }
        let cocktail_end = cocktail_start + resolver.duration(ActivityId::CocktailHour);

        let photos_end = if resolver.settings().first_look {
            cocktail_start
        } else {
            self.cocktail_photos(cocktail_start, &mut placements)
        };
        if let Some(window) = self.window {
            if resolver.is_active(ActivityId::GoldenHourPhotos) {
                placements.push(Placement {
                    id: ActivityId::GoldenHourPhotos,
                    start: window.start_minutes(),
                });
            }
        }

        cursor = cocktail_end.max(photos_end);
        cursor = self.sequence(RECEPTION_OPENING_ORDER, cursor, &mut placements);

        let (before, after): (Vec<ActivityId>, Vec<ActivityId>) = resolver
            .active_in(RITUAL_ORDER)
            .partition(|id| resolver.settings().placement_for(*id) == RitualPlacement::Before);

        let before_total: i64 = before.iter().map(|id| resolver.duration(*id)).sum();
        let meal_start = cursor + before_total;
        self.sequence(&before, cursor, &mut placements);

        if resolver.is_active(ActivityId::Dinner) {
            placements.push(Placement {
                id: ActivityId::Dinner,
                start: meal_start,
            });
        }
        let meal_end = meal_start + resolver.duration(ActivityId::Dinner);
        cursor = self.sequence(&after, meal_end, &mut placements);

        let dancing_start = resolver.is_active(ActivityId::OpenDancing).then_some(cursor);
        if let Some(start) = dancing_start {
            placements.push(Placement {
                id: ActivityId::OpenDancing,
                start,
            });
        }

        self.late_night(anchor, &mut placements);

        Program {
            placements,
            cocktail_start,
            meal_start,
            meal_end,
            dancing_start,
        }
    }

    /// Places active members back to back from `start`; returns the end.
    fn sequence(&self, order: &[ActivityId], start: i64, placements: &mut Vec<Placement>) -> i64 {
        let mut cursor = start;
        for id in self.resolver.active_in(order) {
            placements.push(Placement { id, start: cursor });
            cursor += self.resolver.duration(id);
        }
        cursor
    }

    /// Cocktail-window photography. The sunset window is an exclusion zone:
    /// a session that would overlap it starts at the window end instead, and
    /// the rest of the scan continues from there.
    fn cocktail_photos(&self, start: i64, placements: &mut Vec<Placement>) -> i64 {
        let mut cursor = start;
        for id in self.resolver.active_in(COCKTAIL_PHOTO_ORDER) {
            let duration = self.resolver.duration(id);
            let mut begin = cursor;
            if let Some(window) = self.window {
                if window.overlaps(begin, duration) {
                    debug!(
                        activity = %id,
                        from = %clock::format_hhmm(clock::from_minutes(begin)),
                        to = %clock::format_hhmm(window.end),
                        "photo session moved past the sunset window"
                    );
                    begin = window.end_minutes();
                }
            }
            placements.push(Placement { id, start: begin });
            cursor = begin + duration;
        }
        cursor
    }

    /// Closing activities hang off the end-of-event anchor, not the chain.
    fn late_night(&self, anchor: i64, placements: &mut Vec<Placement>) {
        let config = self.resolver.config();
        let mut end = clock::to_minutes(self.resolver.settings().end_time);
        if end <= anchor {
            // an end time at or before the ceremony means past midnight
            end += clock::MINUTES_PER_DAY;
        }
        let offsets = [
            (ActivityId::LastDance, config.last_dance_offset_minutes),
            (ActivityId::PrivateLastDance, config.private_last_dance_offset_minutes),
            (ActivityId::GrandExit, config.grand_exit_offset_minutes),
        ];
        for (id, offset) in offsets {
            if self.resolver.is_active(id) {
                placements.push(Placement {
                    id,
                    start: end - i64::from(offset),
                });
            }
        }
    }
}
