use std::path::PathBuf;

use replaylens_analysis::{damage::TickRange, timeline::TimePhase};
use replaylens_client::{DEFAULT_BACKEND_URL, DEFAULT_HEROES_URL};
use replaylens_model::{Team, Tick};

/// Endpoints and cache location shared by every command.
#[derive(Debug, Clone, clap::Args)]
pub struct ClientArg {
    /// Base URL of the match analysis backend
    #[arg(long, global = true, env = "REPLAYLENS_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    pub backend_url: String,

    /// Hero metadata endpoint
    #[arg(long, global = true, env = "REPLAYLENS_HEROES_URL", default_value = DEFAULT_HEROES_URL)]
    pub heroes_url: String,

    /// Directory of the on-disk match cache (in-memory only when unset)
    #[arg(long, global = true, env = "REPLAYLENS_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,
}

/// Where a command reads its match from.
#[derive(Debug, Clone, clap::Args)]
#[group(required = true, multiple = false, id = "match_source")]
pub struct MatchSourceArg {
    /// Match analysis JSON file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Match id, fetched from the backend
    #[arg(long)]
    pub match_id: Option<u64>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct SourceOptionArg {
    /// Hero metadata JSON file, used with --file
    #[arg(long, requires = "file")]
    pub heroes_file: Option<PathBuf>,

    /// Serve cached data when the backend cannot be reached
    #[arg(long)]
    pub allow_stale: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TeamArg {
    #[default]
    Amber,
    Sapphire,
}

impl From<TeamArg> for Team {
    fn from(arg: TeamArg) -> Self {
        match arg {
            TeamArg::Amber => Team::Amber,
            TeamArg::Sapphire => Team::Sapphire,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum PhaseArg {
    #[default]
    Full,
    Laning,
    Mid,
    Late,
}

impl From<PhaseArg> for TimePhase {
    fn from(arg: PhaseArg) -> Self {
        match arg {
            PhaseArg::Full => TimePhase::Full,
            PhaseArg::Laning => TimePhase::Laning,
            PhaseArg::Mid => TimePhase::Mid,
            PhaseArg::Late => TimePhase::Late,
        }
    }
}

/// Tick window, either a named phase or explicit bounds.
#[derive(Debug, Clone, clap::Args)]
pub struct RangeArg {
    /// Match phase to aggregate over
    #[arg(long, value_enum, default_value_t, conflicts_with_all = ["start", "end"])]
    pub phase: PhaseArg,

    /// First tick of the window (inclusive)
    #[arg(long, requires = "end")]
    pub start: Option<Tick>,

    /// Last tick of the window (inclusive)
    #[arg(long, requires = "start")]
    pub end: Option<Tick>,
}

impl RangeArg {
    /// Resolved window and a label for it.
    pub fn resolve(&self, total_ticks: Tick) -> (TickRange, String) {
        if let (Some(start), Some(end)) = (self.start, self.end) {
            return (TickRange::new(start, end), format!("ticks {start}-{end}"));
        }
        let phase = TimePhase::from(self.phase);
        let label = format!("{phase} ({})", phase.label(total_ticks));
        (phase.range(total_ticks), label)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Probe {
        #[command(flatten)]
        range: RangeArg,
        #[command(flatten)]
        source: MatchSourceArg,
    }

    #[test]
    fn test_phase_defaults_to_full_match() {
        let probe = Probe::try_parse_from(["probe", "--match-id", "1"]).unwrap();
        let (range, label) = probe.range.resolve(300);
        assert_eq!(range, TimePhase::Full.range(300));
        assert_eq!(label, "Full Match (0:00 - 5:00)");
    }

    #[test]
    fn test_explicit_bounds_override_phase() {
        let probe =
            Probe::try_parse_from(["probe", "--match-id", "1", "--start", "10", "--end", "20"])
                .unwrap();
        let (range, label) = probe.range.resolve(300);
        assert_eq!(range, TickRange::new(10, 20));
        assert_eq!(label, "ticks 10-20");
    }

    #[test]
    fn test_phase_and_bounds_conflict() {
        let result = Probe::try_parse_from([
            "probe", "--match-id", "1", "--phase", "late", "--start", "1", "--end", "2",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_exactly_one_match_source() {
        assert!(Probe::try_parse_from(["probe"]).is_err());
        assert!(Probe::try_parse_from(["probe", "--file", "a.json", "--match-id", "1"]).is_err());
        assert!(Probe::try_parse_from(["probe", "--file", "a.json"]).is_ok());
    }
}
