//! Tick-driven analysis over an immutable match snapshot.
//!
//! Every function here is a pure transform of a [`MatchAnalysis`] and a tick
//! cursor or tick range. Callers recompute on each cursor change; nothing is
//! cached or mutated in place.
//!
//! # Overview
//!
//! - [`damage`]: time-windowed damage rollups per player, team and objective,
//!   with victim categorization and percentage-of-total
//! - [`timeline`]: match phases, objective destruction history and boss liveness
//! - [`lane`]: creep wave and lane pressure snapshots, pressure derivation
//! - [`positions`]: per-tick minimap markers for players and bosses
//! - [`flow`]: node/link data for damage flow diagrams
//!
//! # Examples
//!
//! ```
//! use replaylens_analysis::{
//!     damage::{DamageContext, DamageScope, TickRange, aggregate},
//!     timeline::TimePhase,
//! };
//! use replaylens_model::{HeroCatalog, MatchAnalysis, Roster, Team};
//!
//! let analysis = MatchAnalysis::from_json("{}").unwrap();
//! let data = &analysis.parsed_match_data;
//! let roster = Roster::new(&data.players_data, &HeroCatalog::default());
//! let ctx = DamageContext::new(&roster, data);
//!
//! let range = TimePhase::Laning.range(analysis.total_ticks());
//! let dist = aggregate(&ctx, &DamageScope::Team(Team::Amber), range);
//! assert_eq!(dist.total_damage, 0);
//! assert!(dist.targets.is_empty());
//! ```
//!
//! [`MatchAnalysis`]: replaylens_model::MatchAnalysis

pub mod damage;
pub mod flow;
pub mod lane;
pub mod positions;
pub mod timeline;
