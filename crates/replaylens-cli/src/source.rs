use std::{path::Path, thread};

use anyhow::Context;
use replaylens_client::{
    AnalysisClient, CacheStorage, FetchError, FetchOptions, FileStorage, MatchCache,
    MemoryStorage, ReqwestTransport, Transport,
};
use replaylens_model::{Hero, HeroCatalog, MatchAnalysis, Roster};

use crate::{
    args::{ClientArg, MatchSourceArg, SourceOptionArg},
    util,
};

/// A match snapshot and the hero metadata it is displayed with.
#[derive(Debug)]
pub struct LoadedMatch {
    pub analysis: MatchAnalysis,
    pub heroes: HeroCatalog,
}

impl LoadedMatch {
    pub fn roster(&self) -> Roster {
        Roster::new(&self.analysis.parsed_match_data.players_data, &self.heroes)
    }
}

pub fn load(
    client: &ClientArg,
    source: &MatchSourceArg,
    options: &SourceOptionArg,
) -> anyhow::Result<LoadedMatch> {
    match (&source.file, source.match_id) {
        (Some(path), _) => load_file(path, options.heroes_file.as_deref()),
        (None, Some(match_id)) => fetch(client, match_id, fetch_options(options), true),
        (None, None) => anyhow::bail!("either --file or --match-id is required"),
    }
}

pub fn fetch_options(options: &SourceOptionArg) -> FetchOptions {
    FetchOptions {
        allow_stale_on_error: options.allow_stale,
    }
}

fn load_file(path: &Path, heroes_file: Option<&Path>) -> anyhow::Result<LoadedMatch> {
    log::info!("loading match analysis from {}", path.display());
    let value: serde_json::Value = util::read_json_file("match analysis", path)?;
    let analysis = MatchAnalysis::from_value(value)
        .with_context(|| format!("Invalid match analysis: {}", path.display()))?;

    let heroes = match heroes_file {
        Some(path) => HeroCatalog::new(util::read_json_file::<Vec<Hero>, _>("heroes", path)?),
        None => HeroCatalog::default(),
    };
    Ok(LoadedMatch { analysis, heroes })
}

/// Fetches a match through the configured cache, and the hero list alongside it.
pub fn fetch(
    client: &ClientArg,
    match_id: u64,
    options: FetchOptions,
    with_heroes: bool,
) -> anyhow::Result<LoadedMatch> {
    let transport = ReqwestTransport::new().context("Failed to build HTTP client")?;
    let api = AnalysisClient::new(transport, &client.backend_url, &client.heroes_url);
    match &client.cache_dir {
        Some(dir) => {
            let cache = MatchCache::new(FileStorage::new(dir));
            fetch_with(&api, cache, match_id, options, with_heroes)
        }
        None => {
            let cache = MatchCache::new(MemoryStorage::default());
            fetch_with(&api, cache, match_id, options, with_heroes)
        }
    }
}

/// Runs the two fetches on scoped threads.
///
/// A hero failure degrades to an empty catalog; a match failure is reported
/// with its user-facing message.
fn fetch_with<T, S>(
    api: &AnalysisClient<T>,
    mut cache: MatchCache<S>,
    match_id: u64,
    options: FetchOptions,
    with_heroes: bool,
) -> anyhow::Result<LoadedMatch>
where
    T: Transport + Sync,
    S: CacheStorage,
{
    log::info!("fetching match {match_id} from {}", api.match_url(match_id));
    let (analysis, heroes) = thread::scope(|scope| {
        let heroes = with_heroes.then(|| scope.spawn(|| api.fetch_heroes()));
        let analysis = api.fetch_match_analysis(&mut cache, match_id, options);
        let heroes = heroes.map(|handle| {
            handle
                .join()
                .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
        });
        (analysis, heroes)
    });

    let analysis = analysis.map_err(with_user_message)?;
    let heroes = match heroes {
        Some(Ok(heroes)) => HeroCatalog::new(heroes),
        Some(Err(err)) => {
            log::warn!("hero metadata unavailable, showing hero ids: {err}");
            HeroCatalog::default()
        }
        None => HeroCatalog::default(),
    };
    Ok(LoadedMatch { analysis, heroes })
}

fn with_user_message(err: FetchError) -> anyhow::Error {
    let message = err.user_message();
    anyhow::Error::new(err).context(message)
}
