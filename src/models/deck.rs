//! Deck model and composition queries.

use serde::{Deserialize, Serialize};

use super::{merge_cards, Card};

/// A 75-card deck split into main deck and sideboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    #[serde(default)]
    pub main: Vec<Card>,

    #[serde(default)]
    pub side: Vec<Card>,
}

impl Deck {
    /// Create a deck, collapsing duplicate entries within each zone.
    pub fn new(main: Vec<Card>, side: Vec<Card>) -> Self {
        Self {
            main: merge_cards(main),
            side: merge_cards(side),
        }
    }

    /// Quantity of a card in the main deck.
    pub fn main_count(&self, name: &str) -> u32 {
        zone_count(&self.main, name)
    }

    /// Quantity of a card in the sideboard.
    pub fn side_count(&self, name: &str) -> u32 {
        zone_count(&self.side, name)
    }

    /// Quantity of a card across main deck and sideboard.
    pub fn count(&self, name: &str) -> u32 {
        self.main_count(name) + self.side_count(name)
    }

    /// True if main deck and sideboard together hold at least `n` copies.
    pub fn contains_at_least(&self, n: u32, name: &str) -> bool {
        self.count(name) >= n
    }

    /// True if the main deck alone holds at least three copies.
    ///
    /// The sideboard is not consulted. Rules depend on this.
    pub fn contains_at_least_three(&self, name: &str) -> bool {
        self.main_count(name) >= 3
    }

    /// Number of creature cards in the main deck.
    pub fn maindeck_creatures(&self) -> u32 {
        self.main
            .iter()
            .filter(|c| c.is_creature())
            .map(|c| c.quantity)
            .sum()
    }

    /// Main deck and sideboard merged by name.
    ///
    /// Returns new cards; `main` and `side` are left as they are. Main deck
    /// order comes first, followed by sideboard-only cards.
    pub fn combined(&self) -> Vec<Card> {
        merge_cards(self.main.iter().chain(self.side.iter()).cloned().collect())
    }
}

fn zone_count(zone: &[Card], name: &str) -> u32 {
    zone.iter()
        .filter(|c| c.name == name)
        .map(|c| c.quantity)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn phoenix_deck() -> Deck {
        Deck::new(
            vec![
                Card::creature("Arclight Phoenix", 4),
                Card::creature("Ledger Shredder", 4),
                Card::new("Opt", 4),
                Card::new("Consider", 4),
                Card::new("Temporal Trespass", 2),
            ],
            vec![
                Card::new("Temporal Trespass", 1),
                Card::new("Spell Pierce", 2),
            ],
        )
    }

    #[test]
    fn test_contains_at_least_counts_both_zones() {
        let deck = phoenix_deck();
        assert!(deck.contains_at_least(3, "Temporal Trespass"));
        assert!(!deck.contains_at_least(4, "Temporal Trespass"));
        assert!(deck.contains_at_least(2, "Spell Pierce"));
    }

    #[test]
    fn test_contains_at_least_three_ignores_sideboard() {
        let deck = Deck::new(vec![], vec![Card::new("Rest in Peace", 4)]);

        assert!(!deck.contains_at_least_three("Rest in Peace"));
        assert!(deck.contains_at_least(4, "Rest in Peace"));
    }

    #[test]
    fn test_contains_at_least_three_main_deck() {
        let deck = phoenix_deck();
        assert!(deck.contains_at_least_three("Arclight Phoenix"));
        // 2 main + 1 side is not three in the main deck
        assert!(!deck.contains_at_least_three("Temporal Trespass"));
    }

    #[test]
    fn test_maindeck_creatures() {
        let mut deck = phoenix_deck();
        deck.side.push(Card::creature("Crackling Drake", 3));
        assert_eq!(deck.maindeck_creatures(), 8);
    }

    #[test]
    fn test_combined_merges_by_name() {
        let deck = phoenix_deck();
        let combined = deck.combined();

        let names: Vec<&str> = combined.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Arclight Phoenix",
                "Ledger Shredder",
                "Opt",
                "Consider",
                "Temporal Trespass",
                "Spell Pierce",
            ]
        );
        let trespass = combined
            .iter()
            .find(|c| c.name == "Temporal Trespass")
            .unwrap();
        assert_eq!(trespass.quantity, 3);
    }

    #[test]
    fn test_combined_does_not_mutate_zones() {
        let deck = phoenix_deck();
        let before = deck.clone();

        let _ = deck.combined();
        let _ = deck.combined();

        assert_eq!(deck, before);
        assert_eq!(deck.main_count("Temporal Trespass"), 2);
    }

    #[test]
    fn test_new_merges_duplicate_entries() {
        let deck = Deck::new(
            vec![Card::new("Opt", 2), Card::new("Opt", 2)],
            vec![],
        );
        assert_eq!(deck.main.len(), 1);
        assert!(deck.contains_at_least_three("Opt"));
    }

    #[test]
    fn test_deck_deserializes_without_sideboard() {
        let deck: Deck =
            serde_json::from_str(r#"{"main": [{"name": "Opt", "quantity": 4}]}"#).unwrap();
        assert!(deck.side.is_empty());
        assert_eq!(deck.count("Opt"), 4);
    }
}
