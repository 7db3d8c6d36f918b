use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::{PlayerData, Team};

const HERO_CARD_IMAGE: &str = "icon_hero_card_webp";
const MINIMAP_IMAGE: &str = "minimap_image_webp";
const UNKNOWN_HERO: &str = "Unknown";

/// Hero metadata from the assets API.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Hero {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub images: BTreeMap<String, String>,
}

impl Hero {
    #[must_use]
    pub fn card_image(&self) -> Option<&str> {
        self.images.get(HERO_CARD_IMAGE).map(String::as_str)
    }

    #[must_use]
    pub fn minimap_image(&self) -> Option<&str> {
        self.images.get(MINIMAP_IMAGE).map(String::as_str)
    }
}

/// Heroes indexed by id.
#[derive(Debug, Clone, Default)]
pub struct HeroCatalog {
    heroes: HashMap<u32, Hero>,
}

impl HeroCatalog {
    #[must_use]
    pub fn new(heroes: Vec<Hero>) -> Self {
        Self {
            heroes: heroes.into_iter().map(|hero| (hero.id, hero)).collect(),
        }
    }

    #[must_use]
    pub fn get(&self, hero_id: u32) -> Option<&Hero> {
        self.heroes.get(&hero_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }
}

/// A player joined with its hero.
#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub player: PlayerData,
    pub hero: Option<Hero>,
}

impl RosterEntry {
    #[must_use]
    pub fn custom_id(&self) -> &str {
        &self.player.custom_id
    }

    #[must_use]
    pub fn hero_name(&self) -> &str {
        self.hero
            .as_ref()
            .map_or(UNKNOWN_HERO, |hero| hero.name.as_str())
    }

    /// `"{name} ({hero})"`, used wherever a player is a damage target.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.player.name, self.hero_name())
    }

    #[must_use]
    pub fn hero_image(&self) -> Option<&str> {
        self.hero.as_ref().and_then(Hero::card_image)
    }

    #[must_use]
    pub fn team(&self) -> Option<Team> {
        Team::from_id(self.player.team)
    }
}

/// Match players indexed by `custom_id`, preserving roster order.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entries: Vec<RosterEntry>,
    by_custom_id: HashMap<String, usize>,
}

impl Roster {
    #[must_use]
    pub fn new(players: &[PlayerData], heroes: &HeroCatalog) -> Self {
        let entries: Vec<RosterEntry> = players
            .iter()
            .map(|player| RosterEntry {
                player: player.clone(),
                hero: heroes.get(player.hero_id).cloned(),
            })
            .collect();
        let by_custom_id = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.player.custom_id.clone(), i))
            .collect();
        Self {
            entries,
            by_custom_id,
        }
    }

    #[must_use]
    pub fn get(&self, custom_id: &str) -> Option<&RosterEntry> {
        self.by_custom_id.get(custom_id).map(|&i| &self.entries[i])
    }

    #[must_use]
    pub fn contains(&self, custom_id: &str) -> bool {
        self.by_custom_id.contains_key(custom_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RosterEntry> {
        self.entries.iter()
    }

    pub fn team(&self, team: Team) -> impl Iterator<Item = &RosterEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.player.team == team.id())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
