//! Free-text action classification
//!
//! Maps a player's raw action description to a coarse kind and intensity.
//! Classification is pure keyword matching over fixed vocabularies; every
//! string classifies, including the empty one.

/// Coarse category of an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Offensive,
    Defensive,
    Special,
    Neutral,
}

/// How hard the action is swung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intensity {
    Weak,
    Normal,
    Strong,
    Devastating,
}

/// Classifier output: what the action is and how hard it hits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionClass {
    pub kind: ActionKind,
    pub intensity: Intensity,
}

/// Attack verbs
const OFFENSIVE_WORDS: &[&str] = &[
    "strike", "punch", "kick", "slash", "stab", "smash", "crush", "blast", "attack", "charge",
    "slam", "throw", "pummel", "batter", "pound", "lunge", "hit",
];

/// Defense and avoidance verbs
const DEFENSIVE_WORDS: &[&str] = &[
    "block", "dodge", "parry", "guard", "shield", "deflect", "evade", "counter", "brace",
    "retreat", "absorb", "withstand",
];

/// Amplifier words that mark an action as a special move
const SPECIAL_WORDS: &[&str] = &[
    "unleash", "summon", "transform", "channel", "invoke", "ultimate", "legendary", "cosmic",
    "forbidden", "ancient", "awaken",
];

/// Generic intensity adjectives
const INTENSITY_WORDS: &[&str] = &[
    "powerful", "devastating", "massive", "mighty", "brutal", "fierce", "overwhelming",
    "tremendous", "furious", "colossal", "relentless",
];

/// Minimum token count below which a plain action reads as weak
const WEAK_TOKEN_LIMIT: usize = 3;

fn matches_vocab(token: &str, vocab: &[&str]) -> bool {
    vocab.iter().any(|word| token.starts_with(word))
}

/// Classify a free-text action string
///
/// Kind tie-break, in order: any special word wins; then offensive count
/// over defensive count; then any defensive word; then neutral.
/// Intensity, in order: devastating on two intensity words or any special
/// word; strong on one intensity word or two offensive words; weak on short
/// input; normal otherwise. The ordering is load-bearing: short vague input
/// lands low, rich vocabulary lands high.
pub fn classify_action(text: &str) -> ActionClass {
    let tokens: Vec<String> = text
        .split_whitespace()
        .map(|t| {
            t.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|t| !t.is_empty())
        .collect();

    let offensive = tokens
        .iter()
        .filter(|t| matches_vocab(t, OFFENSIVE_WORDS))
        .count();
    let defensive = tokens
        .iter()
        .filter(|t| matches_vocab(t, DEFENSIVE_WORDS))
        .count();
    let special = tokens.iter().any(|t| matches_vocab(t, SPECIAL_WORDS));
    let intensity_hits = tokens
        .iter()
        .filter(|t| matches_vocab(t, INTENSITY_WORDS))
        .count();

    let kind = if special {
        ActionKind::Special
    } else if offensive > defensive {
        ActionKind::Offensive
    } else if defensive > 0 {
        ActionKind::Defensive
    } else {
        ActionKind::Neutral
    };

    let intensity = if intensity_hits >= 2 || special {
        Intensity::Devastating
    } else if intensity_hits == 1 || offensive >= 2 {
        Intensity::Strong
    } else if text.split_whitespace().count() < WEAK_TOKEN_LIMIT {
        Intensity::Weak
    } else {
        Intensity::Normal
    };

    ActionClass { kind, intensity }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_neutral_weak() {
        let class = classify_action("");
        assert_eq!(class.kind, ActionKind::Neutral);
        assert_eq!(class.intensity, Intensity::Weak);
    }

    #[test]
    fn test_rich_offensive_phrase_is_devastating() {
        let class = classify_action("strikes with a powerful devastating blow");
        assert!(matches!(
            class.kind,
            ActionKind::Offensive | ActionKind::Special
        ));
        assert_eq!(class.intensity, Intensity::Devastating);
    }

    #[test]
    fn test_special_word_beats_offensive_count() {
        let class = classify_action("punch kick slam and unleash the storm");
        assert_eq!(class.kind, ActionKind::Special);
        assert_eq!(class.intensity, Intensity::Devastating);
    }

    #[test]
    fn test_defensive_phrase() {
        let class = classify_action("raises a shield and braces for the charge impact");
        // One offensive match ("charge") against two defensive matches
        assert_eq!(class.kind, ActionKind::Defensive);
    }

    #[test]
    fn test_short_input_is_weak() {
        let class = classify_action("punches hard");
        assert_eq!(class.kind, ActionKind::Offensive);
        assert_eq!(class.intensity, Intensity::Weak);
    }

    #[test]
    fn test_two_attack_verbs_read_strong() {
        let class = classify_action("punches the foe then slams them into the wall");
        assert_eq!(class.kind, ActionKind::Offensive);
        assert_eq!(class.intensity, Intensity::Strong);
    }

    #[test]
    fn test_single_intensity_word_reads_strong() {
        let class = classify_action("delivers a mighty swing at the head");
        assert_eq!(class.intensity, Intensity::Strong);
    }

    #[test]
    fn test_plain_sentence_is_normal() {
        let class = classify_action("walks slowly around the opponent watching");
        assert_eq!(class.kind, ActionKind::Neutral);
        assert_eq!(class.intensity, Intensity::Normal);
    }

    #[test]
    fn test_case_and_punctuation_ignored() {
        let class = classify_action("UNLEASH the FORBIDDEN flame!");
        assert_eq!(class.kind, ActionKind::Special);
        assert_eq!(class.intensity, Intensity::Devastating);
    }
}
