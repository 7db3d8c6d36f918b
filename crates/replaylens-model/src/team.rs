use serde::{Deserialize, Serialize};

/// One of the two playable teams, as numbered by the replay parser.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    derive_more::Display,
)]
#[serde(try_from = "u32", into = "u32")]
pub enum Team {
    #[display("Amber")]
    Amber,
    #[display("Sapphire")]
    Sapphire,
}

impl Team {
    pub const ALL: [Self; 2] = [Self::Amber, Self::Sapphire];

    /// Parser team id (`2` Amber, `3` Sapphire).
    #[must_use]
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            2 => Some(Self::Amber),
            3 => Some(Self::Sapphire),
            _ => None,
        }
    }

    #[must_use]
    pub fn id(self) -> u32 {
        match self {
            Self::Amber => 2,
            Self::Sapphire => 3,
        }
    }

    /// Team index used by the match metadata objectives (`0` Amber, `1` Sapphire).
    #[must_use]
    pub fn from_objective_team(index: u32) -> Option<Self> {
        match index {
            0 => Some(Self::Amber),
            1 => Some(Self::Sapphire),
            _ => None,
        }
    }

    #[must_use]
    pub fn objective_team(self) -> u32 {
        self.id() - 2
    }

    #[must_use]
    pub fn enemy(self) -> Self {
        match self {
            Self::Amber => Self::Sapphire,
            Self::Sapphire => Self::Amber,
        }
    }

    /// Display name for raw team ids. Anything that is not Amber renders as Sapphire.
    #[must_use]
    pub fn name_of(id: u32) -> &'static str {
        if id == 2 { "Amber" } else { "Sapphire" }
    }
}

impl TryFrom<u32> for Team {
    type Error = String;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        Self::from_id(id).ok_or_else(|| format!("unknown team id {id}"))
    }
}

impl From<Team> for u32 {
    fn from(team: Team) -> Self {
        team.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_is_involution() {
        for team in Team::ALL {
            assert_ne!(team.enemy(), team);
            assert_eq!(team.enemy().enemy(), team);
        }
    }

    #[test]
    fn test_ids_round_trip() {
        assert_eq!(Team::from_id(2), Some(Team::Amber));
        assert_eq!(Team::from_id(3), Some(Team::Sapphire));
        assert_eq!(Team::from_id(0), None);
        assert_eq!(Team::Sapphire.objective_team(), 1);
        assert_eq!(Team::from_objective_team(0), Some(Team::Amber));
    }

    #[test]
    fn test_serde_uses_numeric_id() {
        assert_eq!(serde_json::to_string(&Team::Amber).unwrap(), "2");
        let team: Team = serde_json::from_str("3").unwrap();
        assert_eq!(team, Team::Sapphire);
        assert!(serde_json::from_str::<Team>("5").is_err());
    }
}
