//! Card model.

use serde::{Deserialize, Serialize};

/// Mana cost recorded for cards the source reports without one (split cards).
pub const UNKNOWN_COST: i32 = -1;

/// Card color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
    Colorless,
    Unknown,
}

/// Card type line, reduced to the primary type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Creature,
    Sorcery,
    Instant,
    Land,
    Enchantment,
    Planeswalker,
    Artifact,
    #[default]
    Unknown,
}

impl CardType {
    pub fn is_creature(&self) -> bool {
        matches!(self, CardType::Creature)
    }
}

/// A card entry in one zone (main deck or sideboard) of a deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Card name
    pub name: String,

    /// Converted mana cost, `UNKNOWN_COST` when the source omits it
    #[serde(default = "default_cost")]
    pub cost: i32,

    /// Colors of the card
    #[serde(default = "default_colors")]
    pub colors: Vec<Color>,

    /// Primary card type
    #[serde(rename = "type", default)]
    pub card_type: CardType,

    /// Number of copies in this zone
    pub quantity: u32,
}

fn default_cost() -> i32 {
    UNKNOWN_COST
}

fn default_colors() -> Vec<Color> {
    vec![Color::Unknown]
}

impl Card {
    /// Create a card with unknown cost, color and type.
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            cost: UNKNOWN_COST,
            colors: default_colors(),
            card_type: CardType::Unknown,
            quantity,
        }
    }

    /// Builder method to set the mana cost.
    pub fn with_cost(mut self, cost: i32) -> Self {
        self.cost = cost;
        self
    }

    /// Builder method to set the colors.
    pub fn with_colors(mut self, colors: Vec<Color>) -> Self {
        self.colors = colors;
        self
    }

    /// Builder method to set the card type.
    pub fn with_type(mut self, card_type: CardType) -> Self {
        self.card_type = card_type;
        self
    }

    /// Shorthand for a creature card.
    pub fn creature(name: impl Into<String>, quantity: u32) -> Self {
        Self::new(name, quantity).with_type(CardType::Creature)
    }

    /// Shorthand for a land card.
    pub fn land(name: impl Into<String>, quantity: u32) -> Self {
        Self::new(name, quantity)
            .with_type(CardType::Land)
            .with_cost(0)
            .with_colors(vec![Color::Colorless])
    }

    pub fn is_creature(&self) -> bool {
        self.card_type.is_creature()
    }
}

/// Collapse duplicate entries of the same card into one, summing quantities.
///
/// First-seen order is kept.
pub fn merge_cards(cards: Vec<Card>) -> Vec<Card> {
    let mut merged: Vec<Card> = Vec::with_capacity(cards.len());
    for card in cards {
        match merged.iter_mut().find(|c| c.name == card.name) {
            Some(existing) => existing.quantity += card.quantity,
            None => merged.push(card),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_card_defaults_to_sentinels() {
        let card = Card::new("Fable of the Mirror-Breaker", 4);
        assert_eq!(card.cost, UNKNOWN_COST);
        assert_eq!(card.colors, vec![Color::Unknown]);
        assert_eq!(card.card_type, CardType::Unknown);
    }

    #[test]
    fn test_card_builder() {
        let card = Card::new("Arclight Phoenix", 4)
            .with_cost(4)
            .with_colors(vec![Color::Red])
            .with_type(CardType::Creature);

        assert_eq!(card.cost, 4);
        assert!(card.is_creature());
    }

    #[test]
    fn test_merge_cards_sums_quantities() {
        let merged = merge_cards(vec![
            Card::new("Opt", 2),
            Card::land("Spirebluff Canal", 4),
            Card::new("Opt", 2),
        ]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].name, "Opt");
        assert_eq!(merged[0].quantity, 4);
        assert_eq!(merged[1].name, "Spirebluff Canal");
    }

    #[test]
    fn test_card_deserializes_type_field_and_missing_attributes() {
        let json = r#"{"name": "Claim // Fame", "type": "sorcery", "quantity": 1}"#;
        let card: Card = serde_json::from_str(json).unwrap();

        assert_eq!(card.card_type, CardType::Sorcery);
        assert_eq!(card.cost, UNKNOWN_COST);
        assert_eq!(card.colors, vec![Color::Unknown]);
    }

    #[test]
    fn test_card_serialization() {
        let card = Card::creature("Vein Ripper", 4).with_colors(vec![Color::Black]);
        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains("\"type\":\"creature\""));

        let deserialized: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }
}
