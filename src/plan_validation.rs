use crate::adhoc::AdHocKind;
use crate::clock::MINUTES_PER_DAY;
use crate::persistence::{PersistenceError, PersistenceResult};
use crate::plan::PlanDocument;
use std::collections::HashSet;

const MAX_DURATION_MINUTES: u32 = MINUTES_PER_DAY as u32;

/// Structural checks applied to every document a store reads or writes.
pub fn validate_plan(document: &PlanDocument) -> PersistenceResult<()> {
    for (id, entry) in document.entries.iter() {
        if entry.duration > MAX_DURATION_MINUTES {
            return Err(PersistenceError::InvalidData(format!(
                "activity {id} has duration {} (max {MAX_DURATION_MINUTES})",
                entry.duration
            )));
        }
    }

    let settings = &document.settings;
    for id in settings.concurrency.keys() {
        if !id.definition().can_be_concurrent() {
            return Err(PersistenceError::InvalidData(format!(
                "activity {id} cannot be marked concurrent"
            )));
        }
    }
    for id in settings.ritual_overrides.keys() {
        if !id.definition().can_choose_timing {
            return Err(PersistenceError::InvalidData(format!(
                "activity {id} is not a ritual and cannot carry a placement override"
            )));
        }
    }

    let ad_hoc = &document.ad_hoc;
    let mut seen_ids = HashSet::with_capacity(ad_hoc.len());
    for entry in ad_hoc.iter() {
        if !seen_ids.insert(entry.id) {
            return Err(PersistenceError::InvalidData(format!(
                "duplicate ad hoc id {}",
                entry.id
            )));
        }
        if entry.duration > MAX_DURATION_MINUTES {
            return Err(PersistenceError::InvalidData(format!(
                "ad hoc entry {} has duration {}",
                entry.id, entry.duration
            )));
        }
    }
    for shuttle in &ad_hoc.shuttles {
        if !shuttle.kind.is_shuttle() || shuttle.duration != 0 {
            return Err(PersistenceError::InvalidData(format!(
                "shuttle {} must be an arrival or departure with zero duration",
                shuttle.id
            )));
        }
    }
    if let Some(entry) = ad_hoc.custom.iter().find(|e| e.kind != AdHocKind::Custom) {
        return Err(PersistenceError::InvalidData(format!(
            "custom entry {} has kind {:?}",
            entry.id, entry.kind
        )));
    }
    Ok(())
}
