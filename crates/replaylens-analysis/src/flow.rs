//! Node/link data for damage flow diagrams.
//!
//! Links reference nodes by name. Node names are unique within a diagram; a
//! repeated name reuses the first node.

use replaylens_model::Team;
use serde::Serialize;

use crate::damage::{DamageDistribution, ObjectiveDamageDistribution, TargetKind, percentage};

pub const AMBER_COLOR: &str = "#FF8C00";
pub const SAPPHIRE_COLOR: &str = "#4169E1";
pub const OBJECTIVE_COLOR: &str = "#8B4513";
pub const NEUTRAL_COLOR: &str = "#888888";

/// Display colour of team `id` (`2` Amber, anything else Sapphire).
#[must_use]
pub fn team_color(id: u32) -> &'static str {
    match Team::from_id(id) {
        Some(Team::Amber) => AMBER_COLOR,
        _ => SAPPHIRE_COLOR,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowNode {
    pub name: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowLink {
    pub source: String,
    pub target: String,
    pub value: i64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FlowDiagram {
    pub nodes: Vec<FlowNode>,
    pub links: Vec<FlowLink>,
}

impl FlowDiagram {
    fn add_node(&mut self, name: String, color: &'static str) {
        if !self.nodes.iter().any(|node| node.name == name) {
            self.nodes.push(FlowNode { name, color });
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Team node flowing into every player and boss target of `dist`.
///
/// The lane creep bucket is left out. Empty when nothing else remains.
#[must_use]
pub fn team_flow(team: Team, dist: &DamageDistribution) -> FlowDiagram {
    let mut diagram = FlowDiagram::default();
    let targets: Vec<_> = dist
        .targets
        .iter()
        .filter(|target| !target.kind.is_lane_creeps())
        .collect();
    if targets.is_empty() {
        return diagram;
    }

    let source = format!("{team} Team");
    diagram.add_node(source.clone(), team_color(team.id()));
    for target in targets {
        let color = match target.kind {
            TargetKind::Player => team_color(target.team.unwrap_or_default()),
            TargetKind::Boss => OBJECTIVE_COLOR,
            TargetKind::LaneCreeps | TargetKind::NeutralCreeps => NEUTRAL_COLOR,
        };
        diagram.add_node(target.name.clone(), color);
        diagram.links.push(FlowLink {
            source: source.clone(),
            target: target.name.clone(),
            value: target.damage,
            percentage: target.percentage,
        });
    }
    diagram
}

/// Players of `team` flowing into the enemy objectives they damaged.
///
/// Empty unless there is at least one contributor and one objective.
#[must_use]
pub fn objective_flow(team: Team, dist: &ObjectiveDamageDistribution) -> FlowDiagram {
    let mut diagram = FlowDiagram::default();
    if dist.player_contributions.is_empty() || dist.objective_targets.is_empty() {
        return diagram;
    }

    let color = team_color(team.id());
    let player_node = |player_id: &str| {
        dist.player_contributions
            .iter()
            .find(|c| c.player_id == player_id)
            .map(|c| format!("{} ({})", c.player_name, c.hero_name))
    };
    for contribution in &dist.player_contributions {
        diagram.add_node(
            format!("{} ({})", contribution.player_name, contribution.hero_name),
            color,
        );
    }
    for objective in &dist.objective_targets {
        diagram.add_node(objective.target.name.clone(), OBJECTIVE_COLOR);
    }
    for entry in &dist.player_objective_damage {
        let Some(source) = player_node(&entry.player_id) else {
            continue;
        };
        if entry.damage > 0 {
            diagram.links.push(FlowLink {
                source,
                target: entry.objective_name.clone(),
                value: entry.damage,
                percentage: percentage(entry.damage, dist.total_objective_damage),
            });
        }
    }
    diagram
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::{
        DamageContext, DamageTarget, TickRange, aggregate_objectives,
        fixtures::{boss, log, match_data, player},
    };

    #[test]
    fn test_team_flow_skips_lane_creeps() {
        let mut enemy = DamageTarget::new("3", "bob (Haze)", TargetKind::Player, 60);
        enemy.team = Some(3);
        let dist = DamageDistribution::from_targets(vec![
            enemy,
            DamageTarget::new("k", "Guardian - Lane 1", TargetKind::Boss, 30),
            DamageTarget::new("lane_creeps", "Lane Creeps", TargetKind::LaneCreeps, 10),
        ]);
        let diagram = team_flow(Team::Amber, &dist);

        let nodes: Vec<_> = diagram
            .nodes
            .iter()
            .map(|n| (n.name.as_str(), n.color))
            .collect();

        assert_eq!(
            nodes,
            [
                ("Amber Team", AMBER_COLOR),
                ("bob (Haze)", SAPPHIRE_COLOR),
                ("Guardian - Lane 1", OBJECTIVE_COLOR),
            ]
        );
        assert_eq!(diagram.links.len(), 2);
        assert_eq!(diagram.links[0].source, "Amber Team");
        assert!((diagram.links[0].percentage - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_creeps_only_flow_is_empty() {
        let dist = DamageDistribution::from_targets(vec![DamageTarget::new(
            "lane_creeps",
            "Lane Creeps",
            TargetKind::LaneCreeps,
            10,
        )]);
        assert!(team_flow(Team::Sapphire, &dist).is_empty());
    }

    #[test]
    fn test_objective_flow_links_players_to_objectives() {
        let (data, roster) = match_data(
            vec![player("1", 2, 1), player("2", 2, 1)],
            vec![
                ("1", log(&[&[("42", 30)]])),
                ("2", log(&[&[("42", 10), ("43", 60)]])),
            ],
            vec![boss(42, 21, 3, 1), boss(43, 22, 3, 2)],
        );
        let ctx = DamageContext::new(&roster, &data);
        let dist = aggregate_objectives(&ctx, Team::Amber, TickRange::new(0, 0));
        let diagram = objective_flow(Team::Amber, &dist);

        assert_eq!(diagram.nodes.len(), 4);
        assert_eq!(diagram.nodes[0].name, "player2 (Haze)");
        assert_eq!(diagram.nodes[0].color, AMBER_COLOR);
        let total: f64 = diagram.links.iter().map(|l| l.percentage).sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert_eq!(diagram.links.len(), 3);
    }

    #[test]
    fn test_objective_flow_without_contributors_is_empty() {
        let diagram = objective_flow(Team::Amber, &ObjectiveDamageDistribution::default());
        assert_eq!(diagram, FlowDiagram::default());
    }
}
