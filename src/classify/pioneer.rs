//! Bundled Pioneer rule set.
//!
//! Rules are listed in priority order. Sub-archetypes come before the broader
//! archetype they refine, and decks sharing key cards are told apart by
//! creature count or by cards they must not play.

use super::{CompositeRule, Condition, RuleDef, RuleSet, SimpleRule};

pub const RULE_SET_NAME: &str = "pioneer";
pub const RULE_SET_VERSION: u32 = 4;

/// The default Pioneer rule set.
pub fn rule_set() -> RuleSet {
    RuleSet::new(RULE_SET_NAME, RULE_SET_VERSION, rules())
}

fn simple(name: &str, cards: &[&str]) -> RuleDef {
    SimpleRule::new(name, cards).into()
}

fn composite(name: &str, heroes: &[&str], condition: Condition) -> RuleDef {
    CompositeRule::new(name, condition).with_heroes(heroes).into()
}

fn rules() -> Vec<RuleDef> {
    vec![
        simple("Rakdos Vampires", &["Vein Ripper", "Sorin, Imperious Bloodlord"]),
        // Creativity shells run a single Worldspine Wurm or Xenagos as the target.
        composite(
            "Izzet Creativity",
            &["Indomitable Creativity"],
            Condition::all(vec![
                Condition::three("Indomitable Creativity"),
                Condition::any(vec![
                    Condition::plays("Worldspine Wurm"),
                    Condition::plays("Xenagos, God of Revels"),
                ]),
            ]),
        ),
        simple("Izzet Phoenix", &["Arclight Phoenix"]),
        composite(
            "Abzan Greasefang",
            &["Greasefang, Okiba Boss", "Parhelion II"],
            Condition::all(vec![
                Condition::three("Greasefang, Okiba Boss"),
                Condition::plays("Parhelion II"),
            ]),
        ),
        simple("Amalia Combo", &["Amalia Benavides Aguirre", "Wildgrowth Walker"]),
        composite(
            "Lotus Field Combo",
            &["Lotus Field", "Hidden Strings"],
            Condition::all(vec![
                Condition::three("Lotus Field"),
                Condition::at_least(2, "Hidden Strings"),
            ]),
        ),
        simple("Enigmatic Incarnation", &["Enigmatic Incarnation"]),
        simple("Boros Convoke", &["Gleeful Demolition", "Knight-Errant of Eos"]),
        simple("Boros Heroic", &["Illuminator Virtuoso", "Favored Hoplite"]),
        simple("Rakdos Sacrifice", &["Mayhem Devil", "Witch's Oven"]),
        simple(
            "Dimir Rogues",
            &["Thieves' Guild Enforcer", "Drown in the Loch"],
        ),
        // Bant Spirits is the Azorius shell plus Collected Company.
        composite(
            "Bant Spirits",
            &["Supreme Phantom", "Collected Company"],
            Condition::all(vec![
                Condition::three("Supreme Phantom"),
                Condition::three("Collected Company"),
            ]),
        ),
        composite(
            "Azorius Spirits",
            &["Supreme Phantom", "Mausoleum Wanderer"],
            Condition::all(vec![
                Condition::three("Supreme Phantom"),
                Condition::three("Mausoleum Wanderer"),
                Condition::not(Condition::plays("Collected Company")),
            ]),
        ),
        simple(
            "Mono-White Humans",
            &["Thalia's Lieutenant", "Thalia, Guardian of Thraben"],
        ),
        composite(
            "Mono-Green Devotion",
            &["Nykthos, Shrine to Nyx", "Old-Growth Troll"],
            Condition::all(vec![
                Condition::three("Llanowar Elves"),
                Condition::three("Elvish Mystic"),
                Condition::plays("Nykthos, Shrine to Nyx"),
            ]),
        ),
        composite(
            "Selesnya Company",
            &["Collected Company"],
            Condition::all(vec![
                Condition::three("Collected Company"),
                Condition::not(Condition::plays("Supreme Phantom")),
                Condition::min_creatures(20),
            ]),
        ),
        // Same Fable + Thoughtseize core, split on creature count.
        composite(
            "Rakdos Midrange",
            &["Fable of the Mirror-Breaker", "Bloodtithe Harvester"],
            Condition::all(vec![
                Condition::three("Fable of the Mirror-Breaker"),
                Condition::three("Thoughtseize"),
                Condition::min_creatures(10),
            ]),
        ),
        composite(
            "Rakdos Control",
            &["Fable of the Mirror-Breaker", "Thoughtseize"],
            Condition::all(vec![
                Condition::three("Fable of the Mirror-Breaker"),
                Condition::three("Thoughtseize"),
                Condition::max_creatures(9),
            ]),
        ),
        composite(
            "Azorius Control",
            &["Memory Deluge", "Supreme Verdict"],
            Condition::all(vec![
                Condition::three("Memory Deluge"),
                Condition::at_least(2, "Supreme Verdict"),
                Condition::max_creatures(6),
            ]),
        ),
        composite(
            "Izzet Control",
            &["Memory Deluge", "Fiery Impulse"],
            Condition::all(vec![
                Condition::three("Memory Deluge"),
                Condition::three("Fiery Impulse"),
                Condition::max_creatures(6),
            ]),
        ),
        simple("Quintorius Combo", &["Quintorius Kand", "Pyre of the World Tree"]),
        simple("Niv to Light", &["Niv-Mizzet Reborn", "Bring to Light"]),
        composite(
            "Mono-Red Aggro",
            &["Monastery Swiftspear", "Kumano Faces Kakkazan"],
            Condition::all(vec![
                Condition::three("Monastery Swiftspear"),
                Condition::three("Kumano Faces Kakkazan"),
                Condition::not(Condition::plays("Bloodtithe Harvester")),
            ]),
        ),
        composite(
            "Rakdos Prowess",
            &["Monastery Swiftspear", "Bloodtithe Harvester"],
            Condition::all(vec![
                Condition::three("Monastery Swiftspear"),
                Condition::three("Bloodtithe Harvester"),
            ]),
        ),
        simple("Golgari Midrange", &["Glissa Sunslayer", "Tear Asunder"]),
        composite(
            "Mono-Black Waste Not",
            &["Waste Not", "Liliana of the Veil"],
            Condition::all(vec![
                Condition::three("Waste Not"),
                Condition::plays("Liliana of the Veil"),
            ]),
        ),
        simple("Atarka Red", &["Atarka's Command", "Burning-Tree Emissary"]),
    ]
}
