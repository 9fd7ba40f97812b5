//! Plain-text tables for the CLI.
//!
//! Every function returns the rendered text so callers decide where it goes.

use std::fmt::Write;

use crate::calculate::{to_percent, CompetitionScoreListing, DeckAnalysis};
use crate::classify::audit::{AmbiguousEntry, UnclassifiedEntry};
use crate::models::{sort_by_play_rate, DeckStat};

pub const EMPTY_DATABASE: &str = "Empty database... Fetch some data first!";

/// Shown when the store has data but nothing is labelled `deck`.
pub fn no_results(deck: &str) -> String {
    format!("No results for '{}' in the selected window.\n", deck)
}

fn name_width<'a>(names: impl Iterator<Item = &'a str>, header: &str) -> usize {
    names.map(str::len).max().unwrap_or(0).max(header.len()) + 3
}

fn push_title(out: &mut String, title: &str) {
    out.push_str(title);
    out.push('\n');
    out.push_str(&"=".repeat(title.len()));
    out.push('\n');
}

/// Archetype table ordered by play rate.
///
/// Rows with fewer than `min_matches` games are dropped; `max_results = 0`
/// shows every remaining row.
pub fn stats_table(stats: &[DeckStat], min_matches: u32, max_results: usize) -> String {
    if stats.is_empty() {
        return format!("{}\n", EMPTY_DATABASE);
    }

    let mut rows: Vec<DeckStat> = stats
        .iter()
        .filter(|s| s.total_matches >= min_matches)
        .cloned()
        .collect();
    sort_by_play_rate(&mut rows);
    if max_results > 0 {
        rows.truncate(max_results);
    }

    let width = name_width(rows.iter().map(|s| s.name.as_str()), "Deck");
    let mut out = String::new();
    push_title(
        &mut out,
        &format!(
            "{:<4}{:<width$}{:<8}{:<8}{:<20}{}",
            "#",
            "Deck",
            "PR%",
            "WR%",
            "95% CI: [L, U]",
            "#matches",
            width = width
        ),
    );

    for (i, stat) in rows.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<4}{:<width$}{:<8.2}{:<8.2}{:<20}{}",
            i + 1,
            stat.name,
            stat.play_rate,
            stat.win_rate.mean,
            format!(
                "[{:.2}%, {:.2}%]",
                stat.win_rate.lower_bound, stat.win_rate.upper_bound
            ),
            stat.total_matches,
            width = width
        );
    }
    out
}

/// Competition scores, best first.
pub fn scores_table(listing: &CompetitionScoreListing) -> String {
    if listing.is_empty() {
        return format!("{}\n", EMPTY_DATABASE);
    }

    let sorted = listing.sorted_by_score();
    let width = name_width(sorted.iter().map(|(name, _)| *name), "Deck");
    let mut out = String::new();
    push_title(
        &mut out,
        &format!(
            "{:<4}{:<width$}{:<8}{:<10}{}",
            "#",
            "Deck",
            "Score",
            "Entries",
            "Share%",
            width = width
        ),
    );

    for (i, (name, score)) in sorted.iter().enumerate() {
        let share = listing.share(name).map(to_percent).unwrap_or(0.0);
        let _ = writeln!(
            out,
            "{:<4}{:<width$}{:<8.3}{:<10}{:.2}",
            i + 1,
            name,
            score.score,
            score.number_of_entries,
            share,
            width = width
        );
    }
    out
}

/// Card choices within one archetype, best win rate first.
pub fn analysis_table(analysis: &DeckAnalysis, min_matches: u32) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}: {}-{} ({} games), win rate {}",
        analysis.deck_name,
        analysis.wins,
        analysis.losses,
        analysis.total_games(),
        analysis.win_rate()
    );
    if analysis.cards.is_empty() {
        out.push_str("No results for this archetype.\n");
        return out;
    }
    out.push('\n');

    let ranked = analysis.ranked_choices(min_matches);
    let labels: Vec<String> = ranked.iter().map(|(choice, _)| choice.to_string()).collect();
    let width = name_width(labels.iter().map(String::as_str), "Card");
    push_title(
        &mut out,
        &format!(
            "{:<width$}{:<8}{:<20}{}",
            "Card",
            "WR%",
            "95% CI: [L, U]",
            "#matches",
            width = width
        ),
    );

    for (label, (_, stats)) in labels.iter().zip(&ranked) {
        let wr = stats.win_rate();
        let _ = writeln!(
            out,
            "{:<width$}{:<8.2}{:<20}{}",
            label,
            wr.mean,
            format!("[{:.2}%, {:.2}%]", wr.lower_bound, wr.upper_bound),
            stats.total_games(),
            width = width
        );
    }
    out
}

/// One line per unclassified deck with its main deck contents.
pub fn unclassified_list(entries: &[UnclassifiedEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let cards: Vec<String> = entry
            .deck
            .main
            .iter()
            .map(|c| format!("{} {}", c.quantity, c.name))
            .collect();
        let _ = writeln!(out, "{} {}: {}", entry.player, entry.link, cards.join(", "));
    }
    let _ = writeln!(out, "{} unclassified decks", entries.len());
    out
}

pub fn ambiguous_list(entries: &[AmbiguousEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "{} {}: {}",
            entry.player,
            entry.link,
            entry.matches.join(" > ")
        );
    }
    let _ = writeln!(out, "{} decks matched by more than one rule", entries.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::CardChoice;
    use crate::models::{Deck, WinRate};

    fn stat(name: &str, play_rate: f64, total_matches: u32) -> DeckStat {
        DeckStat {
            name: name.to_string(),
            win_rate: WinRate {
                mean: 50.0,
                lower_bound: 25.38,
                upper_bound: 74.62,
            },
            play_rate,
            total_matches,
            example_link: None,
            heroes: Vec::new(),
        }
    }

    #[test]
    fn test_stats_table_empty_database() {
        assert_eq!(stats_table(&[], 0, 0), format!("{}\n", EMPTY_DATABASE));
    }

    #[test]
    fn test_no_results_names_the_deck() {
        let text = no_results("Mono-Green Devotion");
        assert_eq!(text, "No results for 'Mono-Green Devotion' in the selected window.\n");
        assert!(!text.contains(EMPTY_DATABASE));
    }

    #[test]
    fn test_stats_table_orders_and_filters() {
        let stats = vec![
            stat("Rakdos Vampires", 20.0, 40),
            stat("Izzet Phoenix", 30.0, 60),
            stat("Atarka Red", 1.5, 3),
        ];
        let table = stats_table(&stats, 10, 0);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("#   Deck"));
        assert!(lines[1].chars().all(|c| c == '='));
        assert!(lines[2].starts_with("1   Izzet Phoenix"));
        assert!(lines[2].contains("30.00"));
        assert!(lines[2].contains("[25.38%, 74.62%]"));
        assert!(lines[2].trim_end().ends_with("60"));
        assert!(lines[3].starts_with("2   Rakdos Vampires"));
        assert!(!table.contains("Atarka Red"));
    }

    #[test]
    fn test_stats_table_max_results() {
        let stats = vec![
            stat("Rakdos Vampires", 20.0, 40),
            stat("Izzet Phoenix", 30.0, 60),
            stat("Atarka Red", 1.5, 3),
        ];
        let table = stats_table(&stats, 0, 1);
        assert_eq!(table.lines().count(), 3);
        assert!(table.contains("Izzet Phoenix"));
    }

    #[test]
    fn test_analysis_table_without_results() {
        let analysis = DeckAnalysis::new("Izzet Phoenix");
        let table = analysis_table(&analysis, 0);
        assert!(table.starts_with("Izzet Phoenix: 0-0 (0 games)"));
        assert!(table.contains("No results"));
    }

    #[test]
    fn test_analysis_table_rows() {
        let mut analysis = DeckAnalysis::new("Izzet Phoenix");
        analysis.wins = 5;
        analysis.losses = 1;
        analysis.cards.insert(
            CardChoice {
                quantity: 4,
                name: "Arclight Phoenix".to_string(),
            },
            crate::calculate::CardChoiceStats {
                wins: 5,
                losses: 1,
                example_link: None,
            },
        );

        let table = analysis_table(&analysis, 0);
        assert!(table.contains("4x Arclight Phoenix"));
        assert!(table.contains("83.33"));
    }

    #[test]
    fn test_audit_lists() {
        let unclassified = vec![UnclassifiedEntry {
            player: "carol".to_string(),
            link: "https://www.mtgo.com/decklist/3#deck_carol".to_string(),
            deck: Deck::new(vec![crate::models::Card::new("Llanowar Elves", 4)], vec![]),
        }];
        let text = unclassified_list(&unclassified);
        assert!(text.contains("carol https://www.mtgo.com/decklist/3#deck_carol: 4 Llanowar Elves"));
        assert!(text.ends_with("1 unclassified decks\n"));

        let ambiguous = vec![AmbiguousEntry {
            player: "alice".to_string(),
            link: "https://www.mtgo.com/decklist/3#deck_alice".to_string(),
            matches: vec!["Rakdos Vampires".to_string(), "Izzet Phoenix".to_string()],
        }];
        assert!(ambiguous_list(&ambiguous).contains("Rakdos Vampires > Izzet Phoenix"));
    }
}
