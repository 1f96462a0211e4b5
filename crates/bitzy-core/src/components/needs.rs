//! Needs - bounded well-being resources, 0 (depleted) to 100 (satisfied).

use serde::{Deserialize, Serialize};

/// Upper bound of every need
pub const NEED_MAX: f32 = 100.0;

/// Types of needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NeedType {
    Hunger,
    Happiness,
    Energy,
    Hygiene,
    Social,
    Loyalty,
}

impl NeedType {
    /// All needs in display order.
    pub const ALL: [NeedType; 6] = [
        NeedType::Hunger,
        NeedType::Happiness,
        NeedType::Energy,
        NeedType::Hygiene,
        NeedType::Social,
        NeedType::Loyalty,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NeedType::Hunger => "hunger",
            NeedType::Happiness => "happiness",
            NeedType::Energy => "energy",
            NeedType::Hygiene => "hygiene",
            NeedType::Social => "social",
            NeedType::Loyalty => "loyalty",
        }
    }
}

/// Current need levels. Every write goes through [`Needs::set`], which
/// clamps into `[0, NEED_MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Needs {
    hunger: f32,
    happiness: f32,
    energy: f32,
    hygiene: f32,
    social: f32,
    loyalty: f32,
}

impl Default for Needs {
    fn default() -> Self {
        Self {
            hunger: NEED_MAX,
            happiness: NEED_MAX,
            energy: NEED_MAX,
            hygiene: NEED_MAX,
            social: NEED_MAX,
            loyalty: NEED_MAX,
        }
    }
}

impl Needs {
    pub fn hunger(&self) -> f32 {
        self.hunger
    }
    pub fn happiness(&self) -> f32 {
        self.happiness
    }
    pub fn energy(&self) -> f32 {
        self.energy
    }
    pub fn hygiene(&self) -> f32 {
        self.hygiene
    }
    pub fn social(&self) -> f32 {
        self.social
    }
    pub fn loyalty(&self) -> f32 {
        self.loyalty
    }

    pub fn get(&self, need: NeedType) -> f32 {
        match need {
            NeedType::Hunger => self.hunger,
            NeedType::Happiness => self.happiness,
            NeedType::Energy => self.energy,
            NeedType::Hygiene => self.hygiene,
            NeedType::Social => self.social,
            NeedType::Loyalty => self.loyalty,
        }
    }

    /// Set a need, clamped to `[0, NEED_MAX]`. NaN is treated as 0.
    pub fn set(&mut self, need: NeedType, value: f32) {
        let v = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, NEED_MAX)
        };
        let slot = match need {
            NeedType::Hunger => &mut self.hunger,
            NeedType::Happiness => &mut self.happiness,
            NeedType::Energy => &mut self.energy,
            NeedType::Hygiene => &mut self.hygiene,
            NeedType::Social => &mut self.social,
            NeedType::Loyalty => &mut self.loyalty,
        };
        *slot = v;
    }

    /// Add `delta` (may be negative) to a need, clamped.
    pub fn adjust(&mut self, need: NeedType, delta: f32) {
        self.set(need, self.get(need) + delta);
    }

    /// True when hunger or happiness has fallen below `threshold`
    pub fn is_distressed(&self, threshold: f32) -> bool {
        self.hunger < threshold || self.happiness < threshold
    }

    /// Lowest need and its value
    pub fn most_urgent(&self) -> (NeedType, f32) {
        NeedType::ALL
            .iter()
            .map(|&n| (n, self.get(n)))
            .fold((NeedType::Hunger, f32::INFINITY), |best, cur| {
                if cur.1 < best.1 {
                    cur
                } else {
                    best
                }
            })
    }

    /// Every value finite and inside `[0, NEED_MAX]`. Only deserialized
    /// data can violate this.
    pub fn is_valid(&self) -> bool {
        NeedType::ALL.iter().all(|&n| {
            let v = self.get(n);
            v.is_finite() && (0.0..=NEED_MAX).contains(&v)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_start_full() {
        let needs = Needs::default();
        for need in NeedType::ALL {
            assert_eq!(needs.get(need), NEED_MAX);
        }
        assert!(needs.is_valid());
    }

    #[test]
    fn test_set_clamps() {
        let mut needs = Needs::default();
        needs.set(NeedType::Hunger, 150.0);
        assert_eq!(needs.hunger(), 100.0);
        needs.set(NeedType::Hunger, -5.0);
        assert_eq!(needs.hunger(), 0.0);
        needs.set(NeedType::Energy, f32::NAN);
        assert_eq!(needs.energy(), 0.0);
    }

    #[test]
    fn test_adjust() {
        let mut needs = Needs::default();
        needs.adjust(NeedType::Social, -30.0);
        assert_eq!(needs.social(), 70.0);
        needs.adjust(NeedType::Social, 50.0);
        assert_eq!(needs.social(), 100.0);
    }

    #[test]
    fn test_distress_and_most_urgent() {
        let mut needs = Needs::default();
        assert!(!needs.is_distressed(30.0));
        needs.set(NeedType::Happiness, 20.0);
        needs.set(NeedType::Hygiene, 40.0);
        assert!(needs.is_distressed(30.0));
        assert_eq!(needs.most_urgent(), (NeedType::Happiness, 20.0));
    }
}
