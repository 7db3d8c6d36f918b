use std::path::PathBuf;

use anyhow::Context as _;
use replaylens_analysis::{
    damage::{
        DamageContext, DamageDistribution, DamageScope, ObjectiveDamageDistribution, TargetKind,
        aggregate, aggregate_objectives,
    },
    flow::{objective_flow, team_flow},
    timeline::format_mmss,
};
use replaylens_model::{Roster, Team};

use crate::{
    args::{ClientArg, MatchSourceArg, RangeArg, SourceOptionArg, TeamArg},
    source,
    util::{Output, format_damage},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum ScopeArg {
    Player,
    Team,
    Objective,
}

#[derive(Debug, Clone, clap::Args)]
pub struct DamageArg {
    #[command(flatten)]
    source: MatchSourceArg,

    #[command(flatten)]
    options: SourceOptionArg,

    /// Whose damage to aggregate
    #[arg(long, value_enum, default_value = "team")]
    scope: ScopeArg,

    /// Player custom id, for --scope player
    #[arg(long, required_if_eq("scope", "player"))]
    player: Option<String>,

    /// Team, for --scope team and --scope objective
    #[arg(long, value_enum, default_value_t)]
    team: TeamArg,

    #[command(flatten)]
    range: RangeArg,

    /// Emit flow diagram nodes and links as JSON
    #[arg(long)]
    flow: bool,

    /// Emit JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Output file path for JSON (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub fn run(client: &ClientArg, arg: &DamageArg) -> anyhow::Result<()> {
    let loaded = source::load(client, &arg.source, &arg.options)?;
    let roster = loaded.roster();
    let ctx = DamageContext::new(&roster, &loaded.analysis.parsed_match_data);
    let (range, label) = arg.range.resolve(loaded.analysis.total_ticks());
    let team = Team::from(arg.team);

    let scope = match arg.scope {
        ScopeArg::Player => DamageScope::Player(
            arg.player
                .clone()
                .context("--player is required with --scope player")?,
        ),
        ScopeArg::Team => DamageScope::Team(team),
        ScopeArg::Objective => DamageScope::Objective(team),
    };

    if let DamageScope::Objective(team) = scope {
        let dist = aggregate_objectives(&ctx, team, range);
        if arg.flow {
            return Output::save_json(&objective_flow(team, &dist), arg.output.clone());
        }
        if arg.json {
            return Output::save_json(&dist, arg.output.clone());
        }
        println!("{team} damage to enemy objectives, {label}");
        print_objectives(&dist);
        return Ok(());
    }

    let dist = aggregate(&ctx, &scope, range);
    if arg.flow {
        let flow_team = match &scope {
            DamageScope::Player(id) => roster
                .get(id)
                .and_then(|entry| entry.team())
                .unwrap_or(team),
            DamageScope::Team(team) | DamageScope::Objective(team) => *team,
        };
        return Output::save_json(&team_flow(flow_team, &dist), arg.output.clone());
    }
    if arg.json {
        return Output::save_json(&dist, arg.output.clone());
    }
    println!("{}, {label}", scope_title(&scope, &roster));
    print_distribution(&dist);
    Ok(())
}

fn scope_title(scope: &DamageScope, roster: &Roster) -> String {
    match scope {
        DamageScope::Player(id) => match roster.get(id) {
            Some(entry) => format!("Damage by {}", entry.display_name()),
            None => format!("Damage by unknown player {id}"),
        },
        DamageScope::Team(team) => format!("{team} team damage"),
        DamageScope::Objective(team) => format!("{team} damage to enemy objectives"),
    }
}

fn kind_label(kind: TargetKind) -> &'static str {
    match kind {
        TargetKind::Player => "player",
        TargetKind::Boss => "boss",
        TargetKind::LaneCreeps => "lane creeps",
        TargetKind::NeutralCreeps => "neutral creeps",
    }
}

fn print_distribution(dist: &DamageDistribution) {
    if dist.is_empty() {
        println!("  No damage recorded");
        return;
    }
    println!(
        "  {:<36} {:<14} {:>12} {:>7}",
        "Target", "Type", "Damage", "Share"
    );
    println!("  {}", "-".repeat(72));
    for target in &dist.targets {
        println!(
            "  {:<36} {:<14} {:>12} {:>6.1}%",
            target.name,
            kind_label(target.kind),
            format_damage(target.damage),
            target.percentage,
        );
    }
    println!("  {}", "-".repeat(72));
    println!(
        "  {:<36} {:<14} {:>12}",
        "Total",
        "",
        format_damage(dist.total_damage)
    );
}

fn print_objectives(dist: &ObjectiveDamageDistribution) {
    if dist.objective_targets.is_empty() {
        println!("  No objective damage recorded");
        return;
    }
    println!(
        "  {:<36} {:>8} {:>8} {:>12} {:>7}",
        "Objective", "Spawn", "Death", "Damage", "Share"
    );
    println!("  {}", "-".repeat(75));
    for objective in &dist.objective_targets {
        let death = objective
            .death_time
            .map_or_else(|| "-".to_owned(), format_mmss);
        println!(
            "  {:<36} {:>8} {:>8} {:>12} {:>6.1}%",
            objective.target.name,
            format_mmss(objective.spawn_time),
            death,
            format_damage(objective.target.damage),
            objective.target.percentage,
        );
    }
    println!();
    println!(
        "  {:<36} {:<16} {:>12} {:>7}",
        "Player", "Hero", "Damage", "Share"
    );
    println!("  {}", "-".repeat(75));
    for player in &dist.player_contributions {
        println!(
            "  {:<36} {:<16} {:>12} {:>6.1}%",
            player.player_name,
            player.hero_name,
            format_damage(player.damage),
            player.percentage,
        );
    }
    println!("  {}", "-".repeat(75));
    println!(
        "  {:<36} {:<16} {:>12}",
        "Total",
        "",
        format_damage(dist.total_objective_damage)
    );
}
