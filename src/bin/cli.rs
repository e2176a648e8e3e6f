use std::io::{self, Write};
use std::str::FromStr;

use chrono::NaiveDate;
use event_timeline::persistence::{merge_entries_from_csv, save_entries_to_csv};
use event_timeline::plan::parse_time;
use event_timeline::summary::{activities_to_dataframe, render_text_table, summary_to_dataframe};
use event_timeline::{
    ActivityId, AdHocKind, EngineConfig, EventPlan, MealService, RefreshSummary, RitualPlacement, clock,
    init_logging, load_plan_from_json, save_plan_to_json, save_summary_to_csv,
};

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               Show every activity\n  summary                            Day at a glance\n  settings                           Show settings as JSON\n  include <activity>                 Include an activity\n  exclude <activity>                 Exclude an activity\n  dur     <activity> <minutes>       Set duration\n  time    <activity> <HH:MM>         Pin a manual time\n  auto    <activity>                 Return an activity to computed time\n  notes   <activity> <text...>       Set notes (rest of line)\n  ceremony <HH:MM>                   Set ceremony time\n  end     <HH:MM>                    Set end of event\n  date    <YYYY-MM-DD|none>          Set event date (drives sunset)\n  offsite <on|off>                   Ceremony at a separate venue\n  firstlook <on|off>                 Photos before the ceremony\n  meal    <plated|buffet|family_style|stations>\n  rituals <before|after>             Default ritual placement\n  ritual  <activity> <before|after>  Per-ritual placement\n  concurrent <activity> <on|off>     Share start with sibling\n  shuttle <in|out> <HH:MM> <label...>\n  custom  <HH:MM> <minutes> <label...>\n  remove  <id>                       Remove shuttle or custom entry\n  sunset                             Sunset and golden hour\n  save json <path> | load json <path>\n  export csv <path>                  Write the summary as CSV\n  export entries <path> | import entries <path>\n  quit|exit                          Exit"
    );
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Some(true),
        "off" | "false" | "no" => Some(false),
        _ => None,
    }
}

fn show_activities(plan: &EventPlan) {
    match activities_to_dataframe(plan.state(), plan.settings()) {
        Ok(df) => println!("{}", render_text_table(&df)),
        Err(e) => println!("Render error: {}", e),
    }
}

fn show_summary(plan: &EventPlan) {
    match summary_to_dataframe(&plan.summary()) {
        Ok(df) => println!("{}", render_text_table(&df)),
        Err(e) => println!("Render error: {}", e),
    }
}

fn report(summary: &RefreshSummary) {
    println!("Refreshed ({})", summary.to_cli_summary());
}

fn main() {
    if let Err(e) = init_logging(0) {
        eprintln!("logging disabled: {e}");
    }
    let config = match EngineConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {e}; using defaults");
            EngineConfig::default()
        }
    };
    let mut plan = EventPlan::new(config);

    println!("Event Timeline (CLI) - type 'help' for commands\n");
    show_summary(&plan);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => show_activities(&plan),
            "summary" => show_summary(&plan),
            "settings" => match serde_json::to_string_pretty(plan.settings()) {
                Ok(json) => println!("{json}"),
                Err(e) => println!("Error: {}", e),
            },
            "include" | "exclude" | "auto" => {
                let Some(raw) = parts.next() else {
                    println!("Usage: {} <activity>", cmd);
                    continue;
                };
                let id = match ActivityId::from_str(raw) { Ok(v) => v, Err(e) => { println!("Error: {}", e); continue; } };
                let summary = match cmd {
                    "include" => plan.set_included(id, true),
                    "exclude" => plan.set_included(id, false),
                    _ => plan.clear_manual_time(id),
                };
                report(&summary);
            }
            "dur" => {
                match (parts.next(), parts.next()) {
                    (Some(id_s), Some(min_s)) => {
                        let id = match ActivityId::from_str(id_s) { Ok(v) => v, Err(e) => { println!("Error: {}", e); continue; } };
                        let minutes: u32 = match min_s.parse() {
                            Ok(v) if i64::from(v) <= clock::MINUTES_PER_DAY => v,
                            _ => { println!("Invalid minutes"); continue; }
                        };
                        report(&plan.set_duration(id, minutes));
                    }
                    _ => println!("Usage: dur <activity> <minutes>"),
                }
            }
            "time" => {
                match (parts.next(), parts.next()) {
                    (Some(id_s), Some(time_s)) => {
                        let id = match ActivityId::from_str(id_s) { Ok(v) => v, Err(e) => { println!("Error: {}", e); continue; } };
                        let time = match parse_time(time_s) { Ok(v) => v, Err(e) => { println!("Error: {}", e); continue; } };
                        report(&plan.set_manual_time(id, time));
                    }
                    _ => println!("Usage: time <activity> <HH:MM>"),
                }
            }
            "notes" => {
                let id_s = parts.next();
                let rest: Vec<&str> = parts.collect();
                match (id_s, !rest.is_empty()) {
                    (Some(id_s), true) => {
                        let id = match ActivityId::from_str(id_s) { Ok(v) => v, Err(e) => { println!("Error: {}", e); continue; } };
                        plan.set_notes(id, rest.join(" "));
                        println!("Notes set for {}.", id);
                    }
                    _ => println!("Usage: notes <activity> <text...>"),
                }
            }
            "ceremony" | "end" => {
                let Some(time_s) = parts.next() else {
                    println!("Usage: {} <HH:MM>", cmd);
                    continue;
                };
                let time = match parse_time(time_s) { Ok(v) => v, Err(e) => { println!("Error: {}", e); continue; } };
                let summary = if cmd == "ceremony" {
                    plan.set_ceremony_time(time)
                } else {
                    plan.set_end_time(time)
                };
                report(&summary);
            }
            "date" => {
                let date = match parts.next() {
                    Some("none") => None,
                    Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                        Ok(d) => Some(d),
                        Err(_) => { println!("Invalid date (YYYY-MM-DD)"); continue; }
                    },
                    None => { println!("Usage: date <YYYY-MM-DD|none>"); continue; }
                };
                report(&plan.set_event_date(date));
            }
            "offsite" | "firstlook" => {
                let Some(flag) = parts.next().and_then(parse_switch) else {
                    println!("Usage: {} <on|off>", cmd);
                    continue;
                };
                let summary = if cmd == "offsite" {
                    plan.set_off_site(flag)
                } else {
                    plan.set_first_look(flag)
                };
                report(&summary);
            }
            "meal" => {
                let meal = match parts.next().map(MealService::from_str) {
                    Some(Ok(v)) => v,
                    Some(Err(e)) => { println!("Error: {}", e); continue; }
                    None => { println!("Usage: meal <plated|buffet|family_style|stations>"); continue; }
                };
                report(&plan.set_meal_service(meal));
            }
            "rituals" => {
                let placement = match parts.next().map(RitualPlacement::from_str) {
                    Some(Ok(v)) => v,
                    Some(Err(e)) => { println!("Error: {}", e); continue; }
                    None => { println!("Usage: rituals <before|after>"); continue; }
                };
                report(&plan.set_default_ritual_placement(placement));
            }
            "ritual" => {
                match (parts.next(), parts.next()) {
                    (Some(id_s), Some(placement_s)) => {
                        let id = match ActivityId::from_str(id_s) { Ok(v) => v, Err(e) => { println!("Error: {}", e); continue; } };
                        let placement = match RitualPlacement::from_str(placement_s) { Ok(v) => v, Err(e) => { println!("Error: {}", e); continue; } };
                        match plan.set_ritual_placement(id, placement) {
                            Ok(summary) => report(&summary),
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    _ => println!("Usage: ritual <activity> <before|after>"),
                }
            }
            "concurrent" => {
                match (parts.next(), parts.next().and_then(parse_switch)) {
                    (Some(id_s), Some(flag)) => {
                        let id = match ActivityId::from_str(id_s) { Ok(v) => v, Err(e) => { println!("Error: {}", e); continue; } };
                        match plan.set_concurrent(id, flag) {
                            Ok(summary) => report(&summary),
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    _ => println!("Usage: concurrent <activity> <on|off>"),
                }
            }
            "shuttle" => {
                let kind = match parts.next() {
                    Some("in") => AdHocKind::ShuttleArrival,
                    Some("out") => AdHocKind::ShuttleDeparture,
                    _ => { println!("Usage: shuttle <in|out> <HH:MM> <label...>"); continue; }
                };
                let time = match parts.next().map(parse_time) {
                    Some(Ok(v)) => v,
                    _ => { println!("Usage: shuttle <in|out> <HH:MM> <label...>"); continue; }
                };
                let label = parts.collect::<Vec<_>>().join(" ");
                let id = plan.add_shuttle(kind, time, label);
                println!("Added shuttle id={}", id);
            }
            "custom" => {
                let time = match parts.next().map(parse_time) {
                    Some(Ok(v)) => v,
                    _ => { println!("Usage: custom <HH:MM> <minutes> <label...>"); continue; }
                };
                let minutes: u32 = match parts.next().map(str::parse::<u32>) {
                    Some(Ok(v)) if i64::from(v) <= clock::MINUTES_PER_DAY => v,
                    _ => { println!("Usage: custom <HH:MM> <minutes> <label...>"); continue; }
                };
                let label = parts.collect::<Vec<_>>().join(" ");
                let id = plan.add_custom(time, label, minutes);
                println!("Added custom entry id={}", id);
            }
            "remove" => {
                let id: u32 = match parts.next().map(str::parse::<u32>) {
                    Some(Ok(v)) => v,
                    _ => { println!("Usage: remove <id>"); continue; }
                };
                match plan.remove_ad_hoc(id) {
                    Ok(()) => println!("Removed entry {}.", id),
                    Err(e) => println!("Error: {}", e),
                }
            }
            "sunset" => {
                match plan.sunset() {
                    Some(sunset) => {
                        println!("Sunset {}", clock::format_hhmm(sunset));
                        if let Some(zone) = plan.golden_hour_zone() {
                            println!("{}", zone.message());
                        }
                    }
                    None => println!("No event date set."),
                }
            }
            "save" | "load" | "export" | "import" => {
                let target = parts.next();
                let path = parts.next();
                match (cmd, target, path) {
                    ("save", Some("json"), Some(path)) => match save_plan_to_json(plan.document(), path) {
                        Ok(()) => println!("Plan saved to {}", path),
                        Err(e) => println!("Error: {}", e),
                    },
                    ("load", Some("json"), Some(path)) => match load_plan_from_json(path) {
                        Ok(document) => {
                            plan = EventPlan::from_document(document, plan.config().clone());
                            println!("Plan loaded from {}", path);
                            report(plan.last_refresh());
                        }
                        Err(e) => println!("Error: {}", e),
                    },
                    ("export", Some("csv"), Some(path)) => match save_summary_to_csv(&plan.summary(), path) {
                        Ok(()) => println!("Summary exported to {}", path),
                        Err(e) => println!("Error: {}", e),
                    },
                    ("export", Some("entries"), Some(path)) => match save_entries_to_csv(plan.document(), path) {
                        Ok(()) => println!("Activities exported to {}", path),
                        Err(e) => println!("Error: {}", e),
                    },
                    ("import", Some("entries"), Some(path)) => {
                        let mut document = plan.document().clone();
                        match merge_entries_from_csv(&mut document, path) {
                            Ok(rows) => {
                                plan = EventPlan::from_document(document, plan.config().clone());
                                println!("Imported {} activities from {}", rows, path);
                                report(plan.last_refresh());
                            }
                            Err(e) => println!("Error: {}", e),
                        }
                    }
                    _ => println!("Usage: save json <path> | load json <path> | export csv <path> | export entries <path> | import entries <path>"),
                }
            }
            _ => {
                println!("Unknown command. Type 'help'.");
            }
        }
    }
}
