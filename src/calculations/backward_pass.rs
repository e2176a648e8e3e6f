//! Lead-in before the ceremony anchor.
//!
//! Sizing runs backward: every included pre-ceremony activity plus the fixed
//! allowances is summed and subtracted from the anchor, giving the start of
//! the first preparation activity. Positions are then assigned by walking
//! forward from that start through the same step list, so the walk always
//! lands exactly on the anchor.

use super::{Placement, Resolver};
use crate::catalog::{
    ActivityId, PRE_CEREMONY_PHOTO_ORDER, PREPARATION_ORDER, PRIVATE_MOMENT_ORDER,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LeadStep {
    /// Advances the running clock by its duration.
    Sequential(ActivityId),
    /// Starts with its sibling, clock unchanged.
    Concurrent { id: ActivityId, sibling: ActivityId },
    /// Zero-length marker at the current clock.
    Marker(ActivityId),
    Gap(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadIn {
    pub total_minutes: i64,
    pub preparation_start: i64,
    pub placements: Vec<Placement>,
}

pub struct BackwardPass<'r, 'a> {
    resolver: &'r Resolver<'a>,
}

impl<'r, 'a> BackwardPass<'r, 'a> {
    pub fn new(resolver: &'r Resolver<'a>) -> Self {
        Self { resolver }
    }

    pub fn execute(&self, anchor: i64) -> LeadIn {
        let steps = self.steps();
        let total_minutes: i64 = steps.iter().map(|step| self.advance(step)).sum();
        let preparation_start = anchor - total_minutes;

        let mut clock = preparation_start;
        let mut placements: Vec<Placement> = Vec::new();
        for step in &steps {
            match *step {
                LeadStep::Sequential(id) | LeadStep::Marker(id) => {
                    placements.push(Placement { id, start: clock });
                }
                LeadStep::Concurrent { id, sibling } => {
                    let start = placements
                        .iter()
                        .find(|p| p.id == sibling)
                        .map(|p| p.start)
                        .unwrap_or(clock);
                    placements.push(Placement { id, start });
                }
                LeadStep::Gap(_) => {}
            }
            clock += self.advance(step);
        }

        LeadIn {
            total_minutes,
            preparation_start,
            placements,
        }
    }

    fn advance(&self, step: &LeadStep) -> i64 {
        match *step {
            LeadStep::Sequential(id) => self.resolver.duration(id),
            LeadStep::Concurrent { .. } | LeadStep::Marker(_) => 0,
            LeadStep::Gap(minutes) => minutes,
        }
    }

    fn steps(&self) -> Vec<LeadStep> {
        let resolver = self.resolver;
        let config = resolver.config();
        let mut steps = Vec::new();

        for id in resolver.active_in(PREPARATION_ORDER) {
            match resolver.concurrent_sibling(id) {
                Some(sibling) => steps.push(LeadStep::Concurrent { id, sibling }),
                None => steps.push(LeadStep::Sequential(id)),
            }
        }
        steps.push(LeadStep::Gap(i64::from(config.buffer_break_minutes)));

        if resolver.settings().first_look {
            // private-moment entries are conditional on this path already
            steps.extend(resolver.active_in(PRIVATE_MOMENT_ORDER).map(LeadStep::Sequential));
            steps.extend(resolver.active_in(PRE_CEREMONY_PHOTO_ORDER).map(LeadStep::Sequential));
        }

        if resolver.is_active(ActivityId::TravelToCeremony) {
            steps.push(LeadStep::Sequential(ActivityId::TravelToCeremony));
        }
        if resolver.is_active(ActivityId::GuestArrival) {
            steps.push(LeadStep::Marker(ActivityId::GuestArrival));
        }
        steps.push(LeadStep::Gap(i64::from(config.base_allowance_minutes)));
        steps
    }
}
