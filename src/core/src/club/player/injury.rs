use rand::RngExt;
use rand::rngs::StdRng;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InjurySeverity {
    Minor,
    Moderate,
    Major,
    Severe,
}

// (severity, probability weight)
const SEVERITY_WEIGHTS: [(InjurySeverity, f32); 4] = [
    (InjurySeverity::Minor, 0.60),
    (InjurySeverity::Moderate, 0.25),
    (InjurySeverity::Major, 0.10),
    (InjurySeverity::Severe, 0.05),
];

impl InjurySeverity {
    /// Returns (min_days, max_days) out of action
    pub fn duration_range(&self) -> (u16, u16) {
        match self {
            InjurySeverity::Minor => (3, 7),
            InjurySeverity::Moderate => (8, 21),
            InjurySeverity::Major => (22, 60),
            InjurySeverity::Severe => (61, 180),
        }
    }

    /// Picks a severity from the fixed 60/25/10/5 distribution
    pub fn from_roll(roll: f32) -> InjurySeverity {
        let mut cumulative = 0.0;

        for (severity, weight) in SEVERITY_WEIGHTS {
            cumulative += weight;
            if roll < cumulative {
                return severity;
            }
        }

        InjurySeverity::Severe
    }

    pub fn random(rng: &mut StdRng) -> InjurySeverity {
        Self::from_roll(rng.random::<f32>())
    }

    pub fn random_duration(&self, rng: &mut StdRng) -> u16 {
        let (min, max) = self.duration_range();
        rng.random_range(min..=max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayerInjury {
    pub severity: InjurySeverity,
    pub days_remaining: u16,
}

impl PlayerInjury {
    pub fn random(rng: &mut StdRng) -> Self {
        let severity = InjurySeverity::random(rng);

        PlayerInjury {
            severity,
            days_remaining: severity.random_duration(rng),
        }
    }

    /// Counts down `days`. Returns true once the player is fit again.
    pub fn heal(&mut self, days: u16) -> bool {
        self.days_remaining = self.days_remaining.saturating_sub(days);
        self.days_remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn roll_thresholds_follow_weights() {
        assert_eq!(InjurySeverity::from_roll(0.0), InjurySeverity::Minor);
        assert_eq!(InjurySeverity::from_roll(0.59), InjurySeverity::Minor);
        assert_eq!(InjurySeverity::from_roll(0.61), InjurySeverity::Moderate);
        assert_eq!(InjurySeverity::from_roll(0.86), InjurySeverity::Major);
        assert_eq!(InjurySeverity::from_roll(0.96), InjurySeverity::Severe);
        assert_eq!(InjurySeverity::from_roll(1.0), InjurySeverity::Severe);
    }

    #[test]
    fn durations_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let injury = PlayerInjury::random(&mut rng);
            let (min, max) = injury.severity.duration_range();
            assert!(injury.days_remaining >= min && injury.days_remaining <= max);
        }
    }

    #[test]
    fn distribution_is_dominated_by_minor_injuries() {
        let mut rng = StdRng::seed_from_u64(11);
        let minor = (0..2000)
            .filter(|_| InjurySeverity::random(&mut rng) == InjurySeverity::Minor)
            .count();

        assert!(minor > 1000 && minor < 1400, "minor count {}", minor);
    }

    #[test]
    fn heal_counts_down_and_reports_recovery() {
        let mut injury = PlayerInjury {
            severity: InjurySeverity::Moderate,
            days_remaining: 10,
        };

        assert!(!injury.heal(7));
        assert_eq!(injury.days_remaining, 3);
        assert!(injury.heal(7));
        assert_eq!(injury.days_remaining, 0);
    }
}
