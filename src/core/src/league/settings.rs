use crate::error::{SimulationError, SimulationResult};
use crate::league::WinterBreak;
use crate::r#match::DEFAULT_HOME_ADVANTAGE;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const DEFAULT_SEASON_YEAR: &str = "2024-25";
const DEFAULT_SEED: u64 = 42;
const DEFAULT_TOP_PLAYERS: usize = 10;

/// Knobs for one simulated season. Every field falls back to its default when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonSettings {
    pub season_year: String,
    pub start_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winter_break: Option<WinterBreak>,
    pub seed: u64,
    pub home_advantage: f32,
    /// Let every team switch to the formation that best fits its fit players before each matchweek.
    pub adaptive_formations: bool,
    /// Length of the top scorers / top assisters lists in the summary.
    pub top_players: usize,
}

impl Default for SeasonSettings {
    fn default() -> Self {
        SeasonSettings {
            season_year: DEFAULT_SEASON_YEAR.to_string(),
            start_date: default_start_date(),
            winter_break: None,
            seed: DEFAULT_SEED,
            home_advantage: DEFAULT_HOME_ADVANTAGE,
            adaptive_formations: true,
            top_players: DEFAULT_TOP_PLAYERS,
        }
    }
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 8, 17).unwrap_or_default()
}

impl SeasonSettings {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> SimulationResult<()> {
        if self.home_advantage.is_nan() || self.home_advantage <= 0.0 {
            return Err(SimulationError::Configuration(format!(
                "home advantage must be positive, got {}",
                self.home_advantage
            )));
        }

        if let Some(winter_break) = self.winter_break
            && winter_break.end <= winter_break.start
        {
            return Err(SimulationError::Configuration(format!(
                "winter break must end after it starts ({} - {})",
                winter_break.start, winter_break.end
            )));
        }

        if self.season_year.trim().is_empty() {
            return Err(SimulationError::Configuration(
                "season label must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
