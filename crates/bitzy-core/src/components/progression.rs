//! Experience, levels, unspent stat points and specialty axes.

use serde::{Deserialize, Serialize};

/// Evolution points needed for a full evolution bar
pub const EVOLUTION_THRESHOLD: f32 = 1000.0;

/// Upper bound of every specialty axis
pub const SPECIALTY_MAX: f32 = 100.0;

/// The five specialization tracks, in canonical tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialtyAxis {
    Data,
    Security,
    Network,
    Cipher,
    Malware,
}

impl SpecialtyAxis {
    pub const ALL: [SpecialtyAxis; 5] = [
        SpecialtyAxis::Data,
        SpecialtyAxis::Security,
        SpecialtyAxis::Network,
        SpecialtyAxis::Cipher,
        SpecialtyAxis::Malware,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SpecialtyAxis::Data => "data",
            SpecialtyAxis::Security => "security",
            SpecialtyAxis::Network => "network",
            SpecialtyAxis::Cipher => "cipher",
            SpecialtyAxis::Malware => "malware",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Specialty {
    pub data: f32,
    pub security: f32,
    pub network: f32,
    pub cipher: f32,
    pub malware: f32,
}

impl Specialty {
    pub fn get(&self, axis: SpecialtyAxis) -> f32 {
        match axis {
            SpecialtyAxis::Data => self.data,
            SpecialtyAxis::Security => self.security,
            SpecialtyAxis::Network => self.network,
            SpecialtyAxis::Cipher => self.cipher,
            SpecialtyAxis::Malware => self.malware,
        }
    }

    /// Set an axis (clamped to 0–100).
    pub fn set(&mut self, axis: SpecialtyAxis, value: f32) {
        let v = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, SPECIALTY_MAX)
        };
        match axis {
            SpecialtyAxis::Data => self.data = v,
            SpecialtyAxis::Security => self.security = v,
            SpecialtyAxis::Network => self.network = v,
            SpecialtyAxis::Cipher => self.cipher = v,
            SpecialtyAxis::Malware => self.malware = v,
        }
    }

    /// Axis with the strictly greatest value. Ties go to the axis that
    /// comes first in [`SpecialtyAxis::ALL`].
    pub fn dominant(&self) -> SpecialtyAxis {
        let mut best = SpecialtyAxis::ALL[0];
        for axis in SpecialtyAxis::ALL.iter().skip(1) {
            if self.get(*axis) > self.get(best) {
                best = *axis;
            }
        }
        best
    }

    pub fn is_valid(&self) -> bool {
        SpecialtyAxis::ALL.iter().all(|&a| {
            let v = self.get(a);
            v.is_finite() && (0.0..=SPECIALTY_MAX).contains(&v)
        })
    }
}

/// Long-term growth state of the creature
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    pub experience: f32,
    pub level: u32,
    pub evolution_points: f32,
    pub required_exp_for_next_level: u32,
    pub stat_points: u32,
    pub specialty: Specialty,
}

impl Default for Progression {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Progression {
    /// Fresh level-1 progression with the given first threshold
    pub fn new(first_threshold: u32) -> Self {
        Self {
            experience: 0.0,
            level: 1,
            evolution_points: 0.0,
            required_exp_for_next_level: first_threshold.max(1),
            stat_points: 0,
            specialty: Specialty::default(),
        }
    }

    /// Fraction of the evolution bar filled (0.0–1.0)
    pub fn evolution_progress(&self) -> f32 {
        (self.evolution_points / EVOLUTION_THRESHOLD).clamp(0.0, 1.0)
    }

    /// Fraction of the current level's experience bar filled (0.0–1.0)
    pub fn level_progress(&self) -> f32 {
        (self.experience / self.required_exp_for_next_level.max(1) as f32).clamp(0.0, 1.0)
    }

    pub fn is_valid(&self) -> bool {
        self.level >= 1
            && self.required_exp_for_next_level >= 1
            && self.experience.is_finite()
            && self.experience >= 0.0
            && self.evolution_points.is_finite()
            && self.evolution_points >= 0.0
            && self.specialty.is_valid()
    }
}
