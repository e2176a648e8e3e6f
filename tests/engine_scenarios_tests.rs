use chrono::NaiveTime;
use event_timeline::{
    ActivityId, EngineConfig, GoldenHourZone, RecomputeEngine, RitualPlacement, ScheduleState, Settings, recompute,
};

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn only(ids: &[ActivityId]) -> ScheduleState {
    let mut state = ScheduleState::initialize();
    for id in ActivityId::ALL {
        state.get_mut(id).unwrap().included = ids.contains(&id);
    }
    state
}

#[test]
fn first_look_lead_in_lands_on_anchor() {
    let mut state = only(&[ActivityId::Ceremony, ActivityId::CouplePortraits]);
    state.get_mut(ActivityId::Ceremony).unwrap().duration = 25;
    let settings = Settings::default();
    let config = EngineConfig::default();

    let outcome = RecomputeEngine::new(&config).run(&state, &settings, None);
    assert_eq!(outcome.preparation_start, t(14, 20));
    assert_eq!(outcome.state.time_of(ActivityId::Ceremony), Some(t(16, 0)));
    assert_eq!(outcome.state.time_of(ActivityId::CouplePortraits), Some(t(14, 45)));
    assert_eq!(outcome.golden_hour_zone, None);
    assert!(outcome.sunset_window.is_none());
}

#[test]
fn cocktail_portraits_shift_past_sunset_window() {
    let mut state = only(&[ActivityId::Ceremony, ActivityId::CocktailHour, ActivityId::CouplePortraits]);
    state.get_mut(ActivityId::Ceremony).unwrap().duration = 30;
    let settings = Settings {
        ceremony_time: t(18, 30),
        first_look: false,
        ..Settings::default()
    };

    let next = recompute(&state, &settings, Some(t(19, 30)));
    assert_eq!(next.time_of(ActivityId::CocktailHour), Some(t(19, 0)));
    assert_eq!(next.time_of(ActivityId::CouplePortraits), Some(t(19, 30)));
}

#[test]
fn cocktail_photos_before_window_stay_put() {
    let state = only(&[
        ActivityId::Ceremony,
        ActivityId::CocktailHour,
        ActivityId::FamilyPhotos,
        ActivityId::CouplePortraits,
    ]);
    let settings = Settings {
        first_look: false,
        ..Settings::default()
    };

    // family 16:30-16:50, couple 16:50-17:05, window 18:40-19:00
    let next = recompute(&state, &settings, Some(t(19, 0)));
    assert_eq!(next.time_of(ActivityId::FamilyPhotos), Some(t(16, 30)));
    assert_eq!(next.time_of(ActivityId::CouplePortraits), Some(t(16, 50)));
}

#[test]
fn late_night_hangs_off_end_time() {
    let state = only(&[
        ActivityId::Ceremony,
        ActivityId::LastDance,
        ActivityId::PrivateLastDance,
        ActivityId::GrandExit,
    ]);
    let settings = Settings::default();

    let next = recompute(&state, &settings, None);
    assert_eq!(next.time_of(ActivityId::LastDance), Some(t(21, 50)));
    assert_eq!(next.time_of(ActivityId::PrivateLastDance), Some(t(21, 55)));
    assert_eq!(next.time_of(ActivityId::GrandExit), Some(t(22, 0)));
}

#[test]
fn end_time_after_midnight_wraps() {
    let state = only(&[ActivityId::Ceremony, ActivityId::LastDance]);
    let settings = Settings {
        end_time: t(0, 30),
        ..Settings::default()
    };

    let next = recompute(&state, &settings, None);
    assert_eq!(next.time_of(ActivityId::LastDance), Some(t(0, 20)));
}

#[test]
fn default_day_flows_from_preparation_to_dinner() {
    let state = ScheduleState::initialize();
    let settings = Settings::default();
    let config = EngineConfig::default();

    let outcome = RecomputeEngine::new(&config).run(&state, &settings, None);
    let next = &outcome.state;
    assert_eq!(outcome.preparation_start, t(12, 20));
    assert_eq!(next.time_of(ActivityId::HairMakeup), Some(t(12, 20)));
    assert_eq!(next.time_of(ActivityId::GettingDressed), Some(t(14, 20)));
    assert_eq!(next.time_of(ActivityId::GuestArrival), Some(t(15, 15)));
    assert_eq!(next.time_of(ActivityId::Ceremony), Some(t(16, 0)));
    assert_eq!(next.time_of(ActivityId::CocktailHour), Some(t(16, 30)));
    assert_eq!(next.time_of(ActivityId::GrandEntrance), Some(t(17, 30)));
    assert_eq!(next.time_of(ActivityId::Dinner), Some(t(17, 40)));
    assert_eq!(next.time_of(ActivityId::FirstLook), None);
}

#[test]
fn rituals_split_around_the_meal() {
    let mut state = ScheduleState::initialize();
    for id in [
        ActivityId::Toasts,
        ActivityId::FirstDance,
        ActivityId::CakeCutting,
        ActivityId::OpenDancing,
    ] {
        state.get_mut(id).unwrap().included = true;
    }
    let mut settings = Settings::default();
    settings.set_ritual_placement(ActivityId::Toasts, RitualPlacement::Before);

    let next = recompute(&state, &settings, None);
    assert_eq!(next.time_of(ActivityId::Toasts), Some(t(17, 40)));
    assert_eq!(next.time_of(ActivityId::Dinner), Some(t(18, 0)));
    assert_eq!(next.time_of(ActivityId::FirstDance), Some(t(19, 15)));
    assert_eq!(next.time_of(ActivityId::CakeCutting), Some(t(19, 20)));
    assert_eq!(next.time_of(ActivityId::OpenDancing), Some(t(19, 30)));
}

#[test]
fn meal_service_sets_dinner_length() {
    let mut state = ScheduleState::initialize();
    state.get_mut(ActivityId::OpenDancing).unwrap().included = true;
    let settings = Settings {
        meal_service: event_timeline::MealService::Stations,
        ..Settings::default()
    };

    let next = recompute(&state, &settings, None);
    // dinner 17:40 + 90
    assert_eq!(next.time_of(ActivityId::OpenDancing), Some(t(19, 10)));
}

#[test]
fn manual_override_keeps_time_and_duration_still_counts() {
    let mut state = ScheduleState::initialize();
    state.get_mut(ActivityId::OpenDancing).unwrap().included = true;
    {
        let entrance = state.get_mut(ActivityId::GrandEntrance).unwrap();
        entrance.time = Some(t(18, 5));
        entrance.manual_time = true;
    }

    let next = recompute(&state, &Settings::default(), None);
    assert_eq!(next.time_of(ActivityId::GrandEntrance), Some(t(18, 5)));
    assert_eq!(next.time_of(ActivityId::Dinner), Some(t(17, 40)));
    assert_eq!(next.time_of(ActivityId::OpenDancing), Some(t(18, 55)));
}

#[test]
fn excluded_activity_keeps_its_last_time() {
    let state = ScheduleState::initialize();
    let settings = Settings::default();
    let mut next = recompute(&state, &settings, None);
    assert_eq!(next.time_of(ActivityId::CocktailHour), Some(t(16, 30)));

    next.get_mut(ActivityId::CocktailHour).unwrap().included = false;
    let later = recompute(&next, &settings, None);
    assert_eq!(later.time_of(ActivityId::CocktailHour), Some(t(16, 30)));
    assert_eq!(later.visible_time(ActivityId::CocktailHour, &settings), None);
    assert_eq!(later.time_of(ActivityId::GrandEntrance), Some(t(16, 30)));
}

#[test]
fn concurrent_preparation_shortens_lead_in() {
    let mut state = ScheduleState::initialize();
    state.get_mut(ActivityId::PartnerGettingReady).unwrap().included = true;
    let mut settings = Settings::default();
    let config = EngineConfig::default();

    let sequential = RecomputeEngine::new(&config).run(&state, &settings, None);
    assert_eq!(sequential.preparation_start, t(11, 20));

    settings.set_concurrent(ActivityId::PartnerGettingReady, true);
    let concurrent = RecomputeEngine::new(&config).run(&state, &settings, None);
    assert_eq!(concurrent.preparation_start, t(12, 20));
    assert_eq!(
        concurrent.state.time_of(ActivityId::PartnerGettingReady),
        concurrent.state.time_of(ActivityId::HairMakeup)
    );
}

#[test]
fn off_site_adds_both_travel_legs() {
    let mut state = ScheduleState::initialize();
    state.get_mut(ActivityId::TravelToCeremony).unwrap().included = true;
    state.get_mut(ActivityId::TravelToReception).unwrap().included = true;
    let settings = Settings {
        off_site_ceremony: true,
        ..Settings::default()
    };

    let next = recompute(&state, &settings, None);
    assert_eq!(next.time_of(ActivityId::TravelToCeremony), Some(t(14, 45)));
    assert_eq!(next.time_of(ActivityId::TravelToReception), Some(t(16, 30)));
    assert_eq!(next.time_of(ActivityId::CocktailHour), Some(t(17, 0)));

    let on_site = recompute(&state, &Settings::default(), None);
    assert_eq!(on_site.time_of(ActivityId::CocktailHour), Some(t(16, 30)));
}

#[test]
fn golden_hour_photos_sit_at_window_start_and_zone_is_tagged() {
    let mut state = ScheduleState::initialize();
    state.get_mut(ActivityId::GoldenHourPhotos).unwrap().included = true;
    let config = EngineConfig::default();

    // dinner 17:40-18:55; window 18:05-18:25
    let outcome = RecomputeEngine::new(&config).run(&state, &Settings::default(), Some(t(18, 25)));
    assert_eq!(outcome.state.time_of(ActivityId::GoldenHourPhotos), Some(t(18, 5)));
    assert_eq!(outcome.golden_hour_zone, Some(GoldenHourZone::Dinner));

    let early = RecomputeEngine::new(&config).run(&state, &Settings::default(), Some(t(15, 50)));
    assert_eq!(early.golden_hour_zone, Some(GoldenHourZone::Early));
    assert!(early.golden_hour_zone.unwrap().is_warning());
}
