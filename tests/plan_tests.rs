use chrono::{NaiveDate, NaiveTime};
use event_timeline::{
    ActivityId, AdHocKind, EngineConfig, EventPlan, GoldenHourZone, MealService, PlanError, RitualPlacement,
    SummarySource,
};

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[test]
fn new_plan_is_computed_immediately() {
    let plan = EventPlan::default();
    assert_eq!(plan.state().time_of(ActivityId::Ceremony), Some(t(16, 0)));
    assert_eq!(plan.last_refresh().preparation_start, t(12, 20));
    assert_eq!(plan.sunset(), None);
    assert_eq!(plan.golden_hour_zone(), None);
}

#[test]
fn moving_the_ceremony_shifts_the_whole_day() {
    let mut plan = EventPlan::default();
    let summary = plan.set_ceremony_time(t(17, 0));
    assert_eq!(summary.preparation_start, t(13, 20));
    assert_eq!(plan.state().time_of(ActivityId::Dinner), Some(t(18, 40)));
    assert_eq!(plan.settings().ceremony_time, t(17, 0));
}

#[test]
fn pinning_the_ceremony_moves_the_anchor() {
    let mut plan = EventPlan::default();
    plan.set_manual_time(ActivityId::Ceremony, t(15, 30));
    assert_eq!(plan.settings().ceremony_time, t(15, 30));
    assert!(!plan.entry(ActivityId::Ceremony).unwrap().manual_time);
    assert_eq!(plan.state().time_of(ActivityId::CocktailHour), Some(t(16, 0)));
}

#[test]
fn manual_time_then_auto_returns_to_computed() {
    let mut plan = EventPlan::default();
    let summary = plan.set_manual_time(ActivityId::Dinner, t(19, 0));
    assert_eq!(summary.manual_count, 1);
    plan.set_ceremony_time(t(15, 0));
    assert_eq!(plan.state().time_of(ActivityId::Dinner), Some(t(19, 0)));

    let summary = plan.clear_manual_time(ActivityId::Dinner);
    assert_eq!(summary.manual_count, 0);
    assert_eq!(plan.state().time_of(ActivityId::Dinner), Some(t(16, 40)));
}

#[test]
fn meal_service_and_rituals_reflow_after_dinner() {
    let mut plan = EventPlan::default();
    plan.set_included(ActivityId::OpenDancing, true);
    plan.set_included(ActivityId::Toasts, true);
    plan.set_meal_service(MealService::Buffet);
    // dinner 17:40-18:40, toasts after
    assert_eq!(plan.state().time_of(ActivityId::Toasts), Some(t(18, 40)));
    assert_eq!(plan.state().time_of(ActivityId::OpenDancing), Some(t(19, 0)));

    plan.set_default_ritual_placement(RitualPlacement::Before);
    assert_eq!(plan.state().time_of(ActivityId::Toasts), Some(t(17, 40)));
    assert_eq!(plan.state().time_of(ActivityId::Dinner), Some(t(18, 0)));
}

#[test]
fn ritual_and_concurrency_edits_are_checked() {
    let mut plan = EventPlan::default();
    assert_eq!(
        plan.set_ritual_placement(ActivityId::Dinner, RitualPlacement::Before),
        Err(PlanError::NotARitual(ActivityId::Dinner))
    );
    assert_eq!(
        plan.set_concurrent(ActivityId::GettingDressed, true),
        Err(PlanError::NotConcurrent(ActivityId::GettingDressed))
    );

    plan.set_included(ActivityId::DetailPhotos, true);
    let before = plan.last_refresh().preparation_start;
    let after = plan.set_concurrent(ActivityId::DetailPhotos, true).unwrap();
    assert_eq!(after.preparation_start, t(12, 20));
    assert_eq!(before, t(12, 0));
    assert!(plan.settings().is_concurrent(ActivityId::DetailPhotos));

    plan.set_concurrent(ActivityId::DetailPhotos, false).unwrap();
    assert!(plan.settings().concurrency.is_empty());
}

#[test]
fn event_date_drives_sunset_and_zone() {
    let mut plan = EventPlan::default();
    plan.set_included(ActivityId::GoldenHourPhotos, true);
    let summary = plan.set_event_date(NaiveDate::from_ymd_opt(2026, 12, 19));
    assert_eq!(plan.sunset(), Some(t(16, 35)));
    assert_eq!(summary.golden_hour_zone, Some(GoldenHourZone::Scheduled));
    assert_eq!(plan.state().time_of(ActivityId::GoldenHourPhotos), Some(t(16, 15)));

    plan.set_ceremony_time(t(17, 0));
    assert_eq!(plan.golden_hour_zone(), Some(GoldenHourZone::Early));
    assert!(plan.last_refresh().to_cli_summary().contains("golden_hour=early"));
}

#[test]
fn summary_merges_ad_hoc_entries_by_time() {
    let mut plan = EventPlan::default();
    let shuttle = plan.add_shuttle(AdHocKind::ShuttleArrival, t(15, 0), "Hotel shuttle");
    let custom = plan.add_custom(t(16, 0), "Sparkler handout", 10);

    let items = plan.summary();
    let times: Vec<NaiveTime> = items.iter().map(|i| i.time).collect();
    let mut sorted = times.clone();
    sorted.sort();
    assert_eq!(times, sorted);

    let at_four: Vec<SummarySource> = items.iter().filter(|i| i.time == t(16, 0)).map(|i| i.source).collect();
    assert_eq!(
        at_four,
        vec![
            SummarySource::Activity {
                id: ActivityId::Ceremony
            },
            SummarySource::AdHoc {
                id: custom,
                kind: AdHocKind::Custom
            },
        ]
    );
    assert!(items.iter().any(|i| i.label == "Hotel shuttle" && i.duration == 0));

    plan.remove_ad_hoc(shuttle).unwrap();
    assert_eq!(plan.remove_ad_hoc(shuttle), Err(PlanError::AdHocNotFound(shuttle)));
    assert_eq!(plan.ad_hoc().len(), 1);
}

#[test]
fn excluded_activities_drop_out_of_summary() {
    let mut plan = EventPlan::default();
    plan.set_included(ActivityId::CocktailHour, false);
    assert!(
        !plan
            .summary()
            .iter()
            .any(|i| i.source == SummarySource::Activity { id: ActivityId::CocktailHour })
    );
    assert_eq!(plan.state().time_of(ActivityId::CocktailHour), Some(t(16, 30)));
}

#[test]
fn custom_config_changes_allowances() {
    let config = EngineConfig {
        base_allowance_minutes: 30,
        buffer_break_minutes: 10,
        ..EngineConfig::default()
    };
    let plan = EventPlan::new(config);
    // 150 prep + 10 + 30
    assert_eq!(plan.last_refresh().preparation_start, t(12, 50));
    assert_eq!(plan.state().time_of(ActivityId::GuestArrival), Some(t(15, 30)));
}

#[test]
fn activities_off_the_selected_path_leave_the_summary() {
    let mut plan = EventPlan::default();
    plan.set_included(ActivityId::FirstLook, true);
    plan.set_included(ActivityId::TravelToCeremony, true);
    let on_path = plan.set_off_site(true).scheduled_count;
    let shown = |plan: &EventPlan, id: ActivityId| {
        plan.summary()
            .iter()
            .any(|i| i.source == SummarySource::Activity { id })
    };
    assert!(shown(&plan, ActivityId::FirstLook));
    assert!(shown(&plan, ActivityId::TravelToCeremony));

    plan.set_first_look(false);
    let summary = plan.set_off_site(false);
    assert!(!shown(&plan, ActivityId::FirstLook));
    assert!(!shown(&plan, ActivityId::TravelToCeremony));
    assert_eq!(summary.scheduled_count, on_path - 2);

    // still included, time kept for when the path switches back
    let first_look = plan.entry(ActivityId::FirstLook).unwrap();
    assert!(first_look.included);
    assert!(first_look.time.is_some());
    assert_eq!(plan.state().visible_time(ActivityId::FirstLook, plan.settings()), None);
}

#[test]
fn default_ritual_placement_prunes_matching_overrides() {
    let mut plan = EventPlan::default();
    plan.set_ritual_placement(ActivityId::Toasts, RitualPlacement::Before).unwrap();
    plan.set_ritual_placement(ActivityId::CakeCutting, RitualPlacement::Before).unwrap();
    assert_eq!(plan.settings().ritual_overrides.len(), 2);

    plan.set_default_ritual_placement(RitualPlacement::Before);
    assert!(plan.settings().ritual_overrides.is_empty());
    assert_eq!(plan.settings().placement_for(ActivityId::Toasts), RitualPlacement::Before);
    assert_eq!(plan.settings().placement_for(ActivityId::FirstDance), RitualPlacement::Before);
}
