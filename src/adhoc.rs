use crate::clock;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdHocKind {
    ShuttleArrival,
    ShuttleDeparture,
    Custom,
}

impl AdHocKind {
    pub fn is_shuttle(&self) -> bool {
        matches!(self, AdHocKind::ShuttleArrival | AdHocKind::ShuttleDeparture)
    }

    pub fn icon(&self) -> &'static str {
        match self {
            AdHocKind::ShuttleArrival => "🚐",
            AdHocKind::ShuttleDeparture => "🚐",
            AdHocKind::Custom => "📝",
        }
    }
}

/// User-entered, time-stamped item that the engine never moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdHocEntry {
    pub id: u32,
    pub kind: AdHocKind,
    #[serde(with = "clock::hhmm")]
    pub time: NaiveTime,
    pub label: String,
    /// Minutes; always 0 for shuttles.
    pub duration: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdHocLists {
    next_id: u32,
    pub shuttles: Vec<AdHocEntry>,
    pub custom: Vec<AdHocEntry>,
}

impl AdHocLists {
    fn allocate_id(&mut self) -> u32 {
        let after_existing = self.iter().map(|entry| entry.id + 1).max().unwrap_or(1);
        let id = after_existing.max(self.next_id);
        self.next_id = id + 1;
        id
    }

    pub fn add_shuttle(&mut self, kind: AdHocKind, time: NaiveTime, label: impl Into<String>) -> u32 {
        let kind = if kind.is_shuttle() {
            kind
        } else {
            AdHocKind::ShuttleArrival
        };
        let id = self.allocate_id();
        self.shuttles.push(AdHocEntry {
            id,
            kind,
            time,
            label: label.into(),
            duration: 0,
        });
        id
    }

    pub fn add_custom(&mut self, time: NaiveTime, label: impl Into<String>, duration: u32) -> u32 {
        let id = self.allocate_id();
        self.custom.push(AdHocEntry {
            id,
            kind: AdHocKind::Custom,
            time,
            label: label.into(),
            duration,
        });
        id
    }

    /// Removes the entry with `id` from whichever list holds it.
    pub fn remove(&mut self, id: u32) -> Option<AdHocEntry> {
        if let Some(idx) = self.shuttles.iter().position(|e| e.id == id) {
            return Some(self.shuttles.remove(idx));
        }
        if let Some(idx) = self.custom.iter().position(|e| e.id == id) {
            return Some(self.custom.remove(idx));
        }
        None
    }

    pub fn get(&self, id: u32) -> Option<&AdHocEntry> {
        self.iter().find(|entry| entry.id == id)
    }

    /// Shuttles first, then custom entries, each in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &AdHocEntry> {
        self.shuttles.iter().chain(self.custom.iter())
    }

    pub fn len(&self) -> usize {
        self.shuttles.len() + self.custom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn ids_are_unique_and_never_reused() {
        let mut lists = AdHocLists::default();
        let a = lists.add_shuttle(AdHocKind::ShuttleArrival, t(15, 0), "Hotel loop");
        let b = lists.add_custom(t(20, 0), "Photo booth opens", 90);
        assert_ne!(a, b);
        assert!(lists.remove(b).is_some());
        let c = lists.add_custom(t(20, 30), "Sparklers handed out", 10);
        assert!(c > b);
        assert_eq!(lists.len(), 2);
    }

    #[test]
    fn shuttles_are_zero_length() {
        let mut lists = AdHocLists::default();
        let id = lists.add_shuttle(AdHocKind::Custom, t(23, 0), "Last shuttle");
        let entry = lists.get(id).unwrap();
        assert_eq!(entry.duration, 0);
        assert!(entry.kind.is_shuttle());
    }

    #[test]
    fn remove_missing_is_none() {
        let mut lists = AdHocLists::default();
        assert!(lists.remove(42).is_none());
        assert!(lists.is_empty());
    }
}
