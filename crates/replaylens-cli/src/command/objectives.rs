use replaylens_analysis::{
    damage::boss_display_name,
    timeline::{BossTimeline, ObjectiveCursor, ObjectiveTimeline, format_mmss},
};
use replaylens_minimap::objective_marker;
use replaylens_model::{DestroyedObjective, MatchAnalysis, Team, Tick};
use serde::Serialize;

use crate::{
    args::{ClientArg, MatchSourceArg, SourceOptionArg},
    source,
    util::Output,
};

#[derive(Debug, Clone, clap::Args)]
pub struct ObjectivesArg {
    #[command(flatten)]
    source: MatchSourceArg,

    #[command(flatten)]
    options: SourceOptionArg,

    /// Cursor position in seconds
    #[arg(long, default_value_t = 0)]
    tick: Tick,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct Destruction {
    key: String,
    team: String,
    label: Option<&'static str>,
    destroyed_time_s: u32,
}

#[derive(Debug, Serialize)]
struct AliveBoss {
    entity_index: i32,
    name: String,
    team: u32,
    health: Option<i32>,
    max_health: i32,
}

#[derive(Debug, Serialize)]
struct ObjectivesReport {
    tick: Tick,
    destroyed: Vec<Destruction>,
    cursor: ObjectiveCursor,
    bosses_alive: Vec<AliveBoss>,
}

fn marker_label(objective: &DestroyedObjective) -> Option<&'static str> {
    let team = objective.team.parse().ok()?;
    let id = objective.team_objective_id.parse().ok()?;
    objective_marker(team, id).map(|marker| marker.label)
}

fn build_report(analysis: &MatchAnalysis, tick: Tick) -> ObjectivesReport {
    let timeline = ObjectiveTimeline::new(&analysis.match_info().objectives);
    let destroyed = timeline
        .history(tick)
        .iter()
        .map(|objective| Destruction {
            key: objective.key(),
            team: objective
                .team
                .parse()
                .ok()
                .and_then(Team::from_objective_team)
                .map_or_else(|| objective.team.clone(), |team| team.to_string()),
            label: marker_label(objective),
            destroyed_time_s: objective.destroyed_time_s,
        })
        .collect();

    let bosses = BossTimeline::new(&analysis.parsed_match_data.bosses);
    let bosses_alive = bosses
        .alive_at(tick)
        .map(|boss| AliveBoss {
            entity_index: boss.entity_index,
            name: boss_display_name(boss),
            team: boss.team,
            health: bosses.health_at(boss, tick),
            max_health: boss.max_health,
        })
        .collect();

    ObjectivesReport {
        tick,
        destroyed,
        cursor: timeline.cursor(tick),
        bosses_alive,
    }
}

pub fn run(client: &ClientArg, arg: &ObjectivesArg) -> anyhow::Result<()> {
    let loaded = source::load(client, &arg.source, &arg.options)?;
    let report = build_report(&loaded.analysis, arg.tick);
    if arg.json {
        return Output::stdout().write_json(&report);
    }

    println!("Objectives at {}", format_mmss(report.tick));
    println!();
    println!("  Destroyed ({}):", report.destroyed.len());
    for (i, row) in report.destroyed.iter().enumerate() {
        let active = if report.cursor.index == Some(i) {
            ">"
        } else {
            " "
        };

        println!(
            " {active} {:>6}  {:<9} {:<24} {}",
            format_mmss(usize::try_from(row.destroyed_time_s).unwrap_or(usize::MAX)),
            row.team,
            row.label.unwrap_or("?"),
            row.key,
        );
    }
    println!();
    println!("  Bosses alive ({}):", report.bosses_alive.len());
    for boss in &report.bosses_alive {
        let health = boss
            .health
            .map_or_else(|| "?".to_owned(), |health| health.to_string());
        println!(
            "    {:<40} {:<9} {health:>7}/{}",
            boss.name,
            Team::name_of(boss.team),
            boss.max_health
        );
    }
    Ok(())
}
