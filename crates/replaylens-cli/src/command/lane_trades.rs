use replaylens_analysis::damage::{DamageContext, LaneTrades, lane_trades};
use replaylens_model::Team;

use crate::{
    args::{ClientArg, MatchSourceArg, RangeArg, SourceOptionArg},
    source,
    util::{Output, format_damage},
};

#[derive(Debug, Clone, clap::Args)]
pub struct LaneTradesArg {
    #[command(flatten)]
    source: MatchSourceArg,

    #[command(flatten)]
    options: SourceOptionArg,

    /// Lane number as assigned by the parser
    #[arg(long)]
    lane: i32,

    #[command(flatten)]
    range: RangeArg,

    /// Emit JSON instead of a table
    #[arg(long)]
    json: bool,
}

pub fn run(client: &ClientArg, arg: &LaneTradesArg) -> anyhow::Result<()> {
    let loaded = source::load(client, &arg.source, &arg.options)?;
    let roster = loaded.roster();
    let ctx = DamageContext::new(&roster, &loaded.analysis.parsed_match_data);
    let (range, label) = arg.range.resolve(loaded.analysis.total_ticks());

    let trades = lane_trades(&ctx, arg.lane, range);
    if arg.json {
        return Output::stdout().write_json(&trades);
    }
    println!("Lane {} trades, {label}", arg.lane);
    print_trades(&trades);
    Ok(())
}

fn print_trades(trades: &LaneTrades) {
    if trades.npc.is_empty() {
        println!("  No players assigned to this lane");
        return;
    }
    println!(
        "  {:<28} {:<9} {:>12} {:>12} {:>12} {:>12}",
        "Player", "Team", "Creeps", "Guardian", "Neutrals", "Total"
    );
    println!("  {}", "-".repeat(90));
    for row in &trades.npc {
        println!(
            "  {:<28} {:<9} {:>12} {:>12} {:>12} {:>12}",
            format!("{} ({})", row.player_name, row.hero_name),
            Team::name_of(row.team),
            format_damage(row.lane_creeps),
            format_damage(row.guardian),
            format_damage(row.neutrals),
            format_damage(row.total()),
        );
    }
    println!();
    if trades.hero_trades.is_empty() {
        println!("  No damage between lane opponents");
        return;
    }
    println!("  {:<28}    {:<28} {:>12}", "Attacker", "Victim", "Damage");
    println!("  {}", "-".repeat(75));
    for trade in &trades.hero_trades {
        println!(
            "  {:<28} -> {:<28} {:>12}",
            trade.attacker_name,
            trade.victim_name,
            format_damage(trade.damage),
        );
    }
}
