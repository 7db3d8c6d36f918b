use clap::{Parser, Subcommand};

use crate::args::ClientArg;

use self::{
    damage::DamageArg, fetch::FetchArg, lane_trades::LaneTradesArg, lanes::LanesArg,
    objectives::ObjectivesArg, positions::PositionsArg, view::ViewArg,
};

mod damage;
mod fetch;
mod lane_trades;
mod lanes;
mod objectives;
mod positions;
mod view;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(flatten)]
    client: ClientArg,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Fetch a match analysis and save it as JSON
    Fetch(#[clap(flatten)] FetchArg),
    /// Damage distribution of a player, a team or a team's objective damage
    Damage(#[clap(flatten)] DamageArg),
    /// Destroyed structures and living bosses at a tick
    Objectives(#[clap(flatten)] ObjectivesArg),
    /// Lane pressure at a tick
    Lanes(#[clap(flatten)] LanesArg),
    /// Damage exchanged by the players of one lane
    LaneTrades(#[clap(flatten)] LaneTradesArg),
    /// Minimap markers at a tick
    Positions(#[clap(flatten)] PositionsArg),
    /// Interactive replay viewer
    View(#[clap(flatten)] ViewArg),
}

pub fn run() -> anyhow::Result<()> {
    let CommandArgs { client, mode } = CommandArgs::parse();
    match mode {
        Mode::Fetch(arg) => fetch::run(&client, &arg)?,
        Mode::Damage(arg) => damage::run(&client, &arg)?,
        Mode::Objectives(arg) => objectives::run(&client, &arg)?,
        Mode::Lanes(arg) => lanes::run(&client, &arg)?,
        Mode::LaneTrades(arg) => lane_trades::run(&client, &arg)?,
        Mode::Positions(arg) => positions::run(&client, &arg)?,
        Mode::View(arg) => view::run(&client, &arg)?,
    }
    Ok(())
}
