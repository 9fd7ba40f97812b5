//! Derived statistics models.

use serde::{Deserialize, Serialize};

/// Win rate estimate with a 95% confidence interval, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WinRate {
    pub mean: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl std::fmt::Display for WinRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.2}% [{:.2}%, {:.2}%]",
            self.mean, self.lower_bound, self.upper_bound
        )
    }
}

/// Aggregated statistics for one archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckStat {
    /// Archetype name
    pub name: String,

    pub win_rate: WinRate,

    /// Share of the population playing this archetype, in percent
    pub play_rate: f64,

    /// Wins plus losses across all samples
    pub total_matches: u32,

    /// A decklist to drill down into
    pub example_link: Option<String>,

    /// Cards that justified the archetype
    pub heroes: Vec<String>,
}

/// Sort deck stats by play rate, most played first.
pub fn sort_by_play_rate(stats: &mut [DeckStat]) {
    stats.sort_by(|a, b| b.play_rate.total_cmp(&a.play_rate));
}

/// Finishing strength of one archetype across tournaments.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CompetitionScore {
    /// 1.0 = always first place, 0.0 = always last
    pub score: f64,

    /// Number of finishes contributing to the score
    pub number_of_entries: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(name: &str, play_rate: f64) -> DeckStat {
        DeckStat {
            name: name.to_string(),
            win_rate: WinRate::default(),
            play_rate,
            total_matches: 0,
            example_link: None,
            heroes: Vec::new(),
        }
    }

    #[test]
    fn test_sort_by_play_rate() {
        let mut stats = vec![stat("Low", 1.5), stat("High", 20.0), stat("Mid", 7.25)];
        sort_by_play_rate(&mut stats);

        let names: Vec<&str> = stats.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["High", "Mid", "Low"]);
    }

    #[test]
    fn test_win_rate_display() {
        let wr = WinRate {
            mean: 80.0,
            lower_bound: 37.55,
            upper_bound: 96.38,
        };
        assert_eq!(format!("{}", wr), "80.00% [37.55%, 96.38%]");
    }

    #[test]
    fn test_deck_stat_serialization() {
        let s = stat("Izzet Phoenix", 17.63);
        let json = serde_json::to_string(&s).unwrap();
        let deserialized: DeckStat = serde_json::from_str(&json).unwrap();
        assert_eq!(s, deserialized);
    }
}
