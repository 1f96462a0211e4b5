//! Combat-style attributes raised by spending stat points.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::StatError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatType {
    Health,
    Attack,
    Defense,
    Speed,
    Intelligence,
    Agility,
    Luck,
    Resistance,
    Adaptability,
}

impl StatType {
    pub const ALL: [StatType; 9] = [
        StatType::Health,
        StatType::Attack,
        StatType::Defense,
        StatType::Speed,
        StatType::Intelligence,
        StatType::Agility,
        StatType::Luck,
        StatType::Resistance,
        StatType::Adaptability,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StatType::Health => "health",
            StatType::Attack => "attack",
            StatType::Defense => "defense",
            StatType::Speed => "speed",
            StatType::Intelligence => "intelligence",
            StatType::Agility => "agility",
            StatType::Luck => "luck",
            StatType::Resistance => "resistance",
            StatType::Adaptability => "adaptability",
        }
    }
}

impl FromStr for StatType {
    type Err = StatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        StatType::ALL
            .iter()
            .copied()
            .find(|stat| stat.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| StatError::UnknownStat(s.to_string()))
    }
}

/// Attribute values. Unsigned, so never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub health: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub intelligence: u32,
    pub agility: u32,
    pub luck: u32,
    pub resistance: u32,
    pub adaptability: u32,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            health: 100,
            attack: 10,
            defense: 10,
            speed: 10,
            intelligence: 10,
            agility: 10,
            luck: 5,
            resistance: 10,
            adaptability: 0,
        }
    }
}

impl Attributes {
    pub fn get(&self, stat: StatType) -> u32 {
        match stat {
            StatType::Health => self.health,
            StatType::Attack => self.attack,
            StatType::Defense => self.defense,
            StatType::Speed => self.speed,
            StatType::Intelligence => self.intelligence,
            StatType::Agility => self.agility,
            StatType::Luck => self.luck,
            StatType::Resistance => self.resistance,
            StatType::Adaptability => self.adaptability,
        }
    }

    pub(crate) fn add(&mut self, stat: StatType, points: u32) {
        let slot = match stat {
            StatType::Health => &mut self.health,
            StatType::Attack => &mut self.attack,
            StatType::Defense => &mut self.defense,
            StatType::Speed => &mut self.speed,
            StatType::Intelligence => &mut self.intelligence,
            StatType::Agility => &mut self.agility,
            StatType::Luck => &mut self.luck,
            StatType::Resistance => &mut self.resistance,
            StatType::Adaptability => &mut self.adaptability,
        };
        *slot = slot.saturating_add(points);
    }

    /// Experience multiplier granted by adaptability: `1 + adaptability/100`
    pub fn experience_multiplier(&self) -> f32 {
        1.0 + self.adaptability as f32 / 100.0
    }
}
