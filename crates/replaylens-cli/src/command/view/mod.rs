use replaylens_tui::{Runtime, ScreenStack};

use crate::{
    args::{ClientArg, MatchSourceArg, SourceOptionArg},
    source,
};

use self::screens::MatchViewerScreen;

mod screens;
mod widgets;

#[derive(Debug, Clone, clap::Args)]
pub struct ViewArg {
    #[command(flatten)]
    source: MatchSourceArg,

    #[command(flatten)]
    options: SourceOptionArg,
}

pub fn run(client: &ClientArg, arg: &ViewArg) -> anyhow::Result<()> {
    let loaded = source::load(client, &arg.source, &arg.options)?;
    log::info!(
        "loaded match {} with {} players",
        loaded.analysis.match_info().match_id,
        loaded.analysis.parsed_match_data.players_data.len()
    );

    let mut app = ScreenStack::new(Box::new(MatchViewerScreen::new(loaded)));
    Runtime::new().run(&mut app)?;

    Ok(())
}
