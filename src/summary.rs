//! Day-at-a-glance view: computed activities and ad hoc entries merged into a
//! single time-ordered list.

use crate::adhoc::{AdHocKind, AdHocLists};
use crate::calculations::effective_duration;
use crate::catalog::ActivityId;
use crate::clock;
use crate::entry::ScheduleState;
use crate::settings::Settings;
use chrono::NaiveTime;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SummarySource {
    Activity { id: ActivityId },
    AdHoc { id: u32, kind: AdHocKind },
}

impl SummarySource {
    pub fn describe(&self) -> String {
        match self {
            SummarySource::Activity { id } => id.to_string(),
            SummarySource::AdHoc { id, kind } => match kind {
                AdHocKind::ShuttleArrival => format!("shuttle-in#{id}"),
                AdHocKind::ShuttleDeparture => format!("shuttle-out#{id}"),
                AdHocKind::Custom => format!("custom#{id}"),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryItem {
    #[serde(with = "clock::hhmm")]
    pub time: NaiveTime,
    pub icon: String,
    pub label: String,
    pub duration: u32,
    pub source: SummarySource,
}

/// Active entries with a time (catalog order), then shuttles, then custom
/// entries, stably sorted by time of day.
pub fn build_summary(state: &ScheduleState, settings: &Settings, ad_hoc: &AdHocLists) -> Vec<SummaryItem> {
    let mut items: Vec<SummaryItem> = state
        .iter()
        .filter_map(|(id, _)| {
            let time = state.visible_time(id, settings)?;
            let def = id.definition();
            Some(SummaryItem {
                time,
                icon: def.icon.to_string(),
                label: def.name.to_string(),
                duration: u32::try_from(effective_duration(state, settings, id)).unwrap_or(0),
                source: SummarySource::Activity { id },
            })
        })
        .collect();

    items.extend(ad_hoc.iter().map(|entry| SummaryItem {
        time: entry.time,
        icon: entry.kind.icon().to_string(),
        label: entry.label.clone(),
        duration: entry.duration,
        source: SummarySource::AdHoc {
            id: entry.id,
            kind: entry.kind,
        },
    }));

    // sort_by_key is stable; equal times keep insertion order
    items.sort_by_key(|item| item.time);
    items
}

pub fn summary_to_dataframe(items: &[SummaryItem]) -> PolarsResult<DataFrame> {
    let times: Vec<String> = items.iter().map(|i| clock::format_hhmm(i.time)).collect();
    let icons: Vec<&str> = items.iter().map(|i| i.icon.as_str()).collect();
    let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
    let durations: Vec<i64> = items.iter().map(|i| i64::from(i.duration)).collect();
    let sources: Vec<String> = items.iter().map(|i| i.source.describe()).collect();

    DataFrame::new(vec![
        Series::new(PlSmallStr::from_static("time"), times).into_column(),
        Series::new(PlSmallStr::from_static("icon"), icons).into_column(),
        Series::new(PlSmallStr::from_static("label"), labels).into_column(),
        Series::new(PlSmallStr::from_static("duration_minutes"), durations).into_column(),
        Series::new(PlSmallStr::from_static("source"), sources).into_column(),
    ])
}

/// Per-activity table in catalog order, excluded rows included.
pub fn activities_to_dataframe(state: &ScheduleState, settings: &Settings) -> PolarsResult<DataFrame> {
    let mut ids = Vec::with_capacity(state.len());
    let mut sections = Vec::with_capacity(state.len());
    let mut included = Vec::with_capacity(state.len());
    let mut durations = Vec::with_capacity(state.len());
    let mut times = Vec::with_capacity(state.len());
    let mut manual = Vec::with_capacity(state.len());
    for (id, entry) in state.iter() {
        ids.push(id.as_str());
        sections.push(id.definition().section.label());
        included.push(entry.included);
        durations.push(effective_duration(state, settings, id));
        times.push(entry.time.map(clock::format_hhmm).unwrap_or_default());
        manual.push(entry.manual_time);
    }

    DataFrame::new(vec![
        Series::new(PlSmallStr::from_static("activity"), ids).into_column(),
        Series::new(PlSmallStr::from_static("section"), sections).into_column(),
        Series::new(PlSmallStr::from_static("included"), included).into_column(),
        Series::new(PlSmallStr::from_static("duration_minutes"), durations).into_column(),
        Series::new(PlSmallStr::from_static("time"), times).into_column(),
        Series::new(PlSmallStr::from_static("manual"), manual).into_column(),
    ])
}

fn cell(column: &Column, row_idx: usize) -> String {
    match column.get(row_idx) {
        Ok(AnyValue::Null) | Err(_) => String::new(),
        Ok(AnyValue::Int64(v)) => v.to_string(),
        Ok(AnyValue::Boolean(v)) => String::from(if v { "yes" } else { "" }),
        Ok(AnyValue::String(s)) => s.to_string(),
        Ok(other) => other.to_string(),
    }
}

/// Renders a frame as a boxed plain-text table.
pub fn render_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let mut widths: Vec<usize> = names.iter().map(|n| n.chars().count()).collect();
    for (ci, col) in columns.iter().enumerate() {
        for row_idx in 0..df.height() {
            widths[ci] = widths[ci].max(cell(col, row_idx).chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    push_row(&mut out, &names, &widths);
    out.push_str(&sep);
    out.push('\n');
    for row_idx in 0..df.height() {
        let row: Vec<String> = columns.iter().map(|col| cell(col, row_idx)).collect();
        push_row(&mut out, &row, &widths);
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    out.push('|');
    for (value, width) in cells.iter().zip(widths) {
        out.push(' ');
        out.push_str(value);
        out.push_str(&" ".repeat(width.saturating_sub(value.chars().count())));
        out.push_str(" |");
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataframe_has_one_row_per_item() {
        let items = vec![SummaryItem {
            time: NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
            icon: "💒".into(),
            label: "Ceremony".into(),
            duration: 30,
            source: SummarySource::Activity {
                id: ActivityId::Ceremony,
            },
        }];
        let df = summary_to_dataframe(&items).unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(df.width(), 5);
        let table = render_text_table(&df);
        assert!(table.contains("| 16:00 "));
        assert!(table.contains("ceremony"));
    }

    #[test]
    fn empty_summary_renders_header_only() {
        let df = summary_to_dataframe(&[]).unwrap();
        let table = render_text_table(&df);
        assert_eq!(table.lines().count(), 4);
        assert!(table.contains("duration_minutes"));
    }
}
