use std::path::PathBuf;

use replaylens_client::FetchOptions;

use crate::{args::ClientArg, source, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub struct FetchArg {
    /// Match id to fetch
    #[arg(long)]
    match_id: u64,

    /// Output file path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Serve cached data when the backend cannot be reached
    #[arg(long)]
    allow_stale: bool,
}

pub fn run(client: &ClientArg, arg: &FetchArg) -> anyhow::Result<()> {
    let FetchArg {
        match_id,
        output,
        allow_stale,
    } = arg;

    let options = FetchOptions {
        allow_stale_on_error: *allow_stale,
    };
    let loaded = source::fetch(client, *match_id, options, false)?;

    let mut output = Output::from_output_path(output.clone())?;
    log::info!("saving match {match_id} to {}", output.display_path());
    output.write_json(&loaded.analysis)?;
    Ok(())
}
