//! The fixed outcome table and its start-up validation.

use std::collections::BTreeSet;

use codebound_character::domain::player::{Faction, Skill};
use codebound_core::error::DomainError;

use super::stage::{Choice, Ending, Stage};

/// Where an outcome sends the story. Exactly one per outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Continue at a later stage.
    Next(Stage),
    /// End the story.
    Ending(Ending),
}

/// The effect bundle bound to one `(stage, choice)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Text shown to the player and appended to the story trail.
    pub message: &'static str,
    /// Experience awarded.
    pub exp: u32,
    /// Currency change; the balance floors at zero.
    pub gold: i32,
    /// Hit point change; clamped to `1..=max_hp`.
    pub hp: i32,
    /// Item granted, if any.
    pub item: Option<&'static str>,
    /// New location, if any.
    pub location: Option<&'static str>,
    /// Skill increases.
    pub skills: &'static [(Skill, u32)],
    /// Faction standing changes.
    pub reputation: &'static [(Faction, i32)],
    /// Enemy key offered as a follow-on fight, if any.
    pub encounter: Option<&'static str>,
    /// Next stage or ending.
    pub transition: Transition,
}

const BASE: Outcome = Outcome {
    message: "",
    exp: 0,
    gold: 0,
    hp: 0,
    item: None,
    location: None,
    skills: &[],
    reputation: &[],
    encounter: None,
    transition: Transition::Next(Stage::Trials),
};

static AWAKENING: [Outcome; 4] = [
    Outcome {
        message: "You place your trust in Lira. She walks you through your first lessons \
                  in shaping the Source.",
        exp: 20,
        gold: 10,
        location: Some("training_grounds"),
        skills: &[(Skill::Manipulation, 1)],
        reputation: &[(Faction::Codekeepers, 10)],
        ..BASE
    },
    Outcome {
        message: "You question everything. The walls of Nexis flicker, and the system \
                  pushes back against your doubt.",
        exp: 25,
        hp: -10,
        location: Some("training_grounds"),
        skills: &[(Skill::Decryption, 1)],
        reputation: &[(Faction::Resistance, 10)],
        ..BASE
    },
    Outcome {
        message: "You study the three pillars: decryption, manipulation, and \
                  reconstruction.",
        exp: 30,
        location: Some("training_grounds"),
        skills: &[
            (Skill::Decryption, 1),
            (Skill::Manipulation, 1),
            (Skill::Reconstruction, 1),
        ],
        reputation: &[(Faction::Neutral, 5)],
        ..BASE
    },
    Outcome {
        message: "You follow the whispers of corruption deep into the undercode. A \
                  guardian process stirs, and a path to the Sanctum opens.",
        exp: 35,
        item: Some("Corrupted Data Fragment"),
        location: Some("sanctum"),
        reputation: &[(Faction::Resistance, 5), (Faction::Codekeepers, -5)],
        encounter: Some("spider"),
        transition: Transition::Next(Stage::Revelation),
        ..BASE
    },
];

static TRIALS: [Outcome; 4] = [
    Outcome {
        message: "You pour everything into your own advancement and top the trial \
                  rankings.",
        exp: 40,
        gold: 25,
        skills: &[(Skill::Manipulation, 1)],
        reputation: &[(Faction::Codekeepers, 5), (Faction::Resistance, -5)],
        transition: Transition::Next(Stage::Revelation),
        ..BASE
    },
    Outcome {
        message: "You quietly gather recruits who share your doubts. One of them slips \
                  you a key to the restricted sectors.",
        exp: 35,
        item: Some("Rebel Access Key"),
        reputation: &[(Faction::Resistance, 15)],
        transition: Transition::Next(Stage::Revelation),
        ..BASE
    },
    Outcome {
        message: "You use your skills to pull struggling recruits through the \
                  labyrinths. Their gratitude restores you.",
        exp: 35,
        hp: 20,
        skills: &[(Skill::Reconstruction, 1)],
        reputation: &[(Faction::Neutral, 10)],
        transition: Transition::Next(Stage::Revelation),
        ..BASE
    },
    Outcome {
        message: "You subtly corrupt the trial code. A security skeleton process is \
                  dispatched to investigate.",
        exp: 45,
        gold: -10,
        hp: -15,
        reputation: &[(Faction::Codekeepers, -10), (Faction::Resistance, 10)],
        encounter: Some("skeleton"),
        transition: Transition::Next(Stage::Revelation),
        ..BASE
    },
];

static REVELATION: [Outcome; 4] = [
    Outcome {
        message: "You let the power of the Grand Code flow through you and tear loose a \
                  fragment of it.",
        exp: 60,
        item: Some("Fragment of the Grand Code"),
        location: Some("grand_code_chamber"),
        skills: &[(Skill::Manipulation, 2)],
        reputation: &[(Faction::Codekeepers, 20)],
        transition: Transition::Next(Stage::FinalChoice),
        ..BASE
    },
    Outcome {
        message: "You broadcast the truth of the Grand Code across the network. A dark \
                  knight of the Codekeepers moves to silence you.",
        exp: 60,
        location: Some("grand_code_chamber"),
        reputation: &[(Faction::Resistance, 20), (Faction::Codekeepers, -15)],
        encounter: Some("dark_knight"),
        transition: Transition::Next(Stage::FinalChoice),
        ..BASE
    },
    Outcome {
        message: "You search for a third path, rewriting small pieces of the system \
                  without breaking it.",
        exp: 55,
        location: Some("grand_code_chamber"),
        skills: &[(Skill::Reconstruction, 2)],
        reputation: &[(Faction::Neutral, 20)],
        transition: Transition::Next(Stage::FinalChoice),
        ..BASE
    },
    Outcome {
        message: "You strike at the Grand Code itself. The backlash tears through you, \
                  but you learn how its defenses are written.",
        exp: 70,
        hp: -30,
        location: Some("grand_code_chamber"),
        skills: &[(Skill::Decryption, 2)],
        reputation: &[(Faction::Codekeepers, -25)],
        transition: Transition::Next(Stage::FinalChoice),
        ..BASE
    },
];

static FINAL_CHOICE: [Outcome; 4] = [
    Outcome {
        message: "The Grand Code collapses. Humanity wakes, free and uncertain.",
        exp: 100,
        reputation: &[(Faction::Resistance, 25)],
        transition: Transition::Ending(Ending::Collapse),
        ..BASE
    },
    Outcome {
        message: "You seize the Grand Code and rewrite the world in your image.",
        exp: 100,
        gold: 100,
        reputation: &[(Faction::Codekeepers, 25)],
        transition: Transition::Ending(Ending::NewOrder),
        ..BASE
    },
    Outcome {
        message: "You balance control and freedom, leaving the Code intact but \
                  accountable.",
        exp: 100,
        hp: 50,
        reputation: &[(Faction::Neutral, 25)],
        transition: Transition::Ending(Ending::Balance),
        ..BASE
    },
    Outcome {
        message: "You reject every system and step outside the Code entirely.",
        exp: 150,
        item: Some("Unbound Source Code"),
        transition: Transition::Ending(Ending::Anomaly),
        ..BASE
    },
];

/// The outcome bound to `(stage, choice)`. The table is total: every stage
/// declares all four choices.
#[must_use]
pub fn outcome_for(stage: Stage, choice: Choice) -> &'static Outcome {
    let row = match stage {
        Stage::Awakening => &AWAKENING,
        Stage::Trials => &TRIALS,
        Stage::Revelation => &REVELATION,
        Stage::FinalChoice => &FINAL_CHOICE,
    };
    &row[choice.index()]
}

/// Checks the story graph's structural guarantees.
///
/// Every stage must be reachable from the first stage, every `Next` pointer
/// must move strictly forward, every stage must be able to reach an ending,
/// and every encounter must name an enemy accepted by `is_known_enemy`.
///
/// # Errors
///
/// Returns `DomainError::Validation` describing the first violation found.
pub fn validate_story_graph(is_known_enemy: impl Fn(&str) -> bool) -> Result<(), DomainError> {
    for stage in Stage::ALL {
        for choice in Choice::ALL {
            let outcome = outcome_for(stage, choice);
            if let Transition::Next(next) = outcome.transition {
                if next <= stage {
                    return Err(DomainError::validation(format!(
                        "stage {stage} choice {choice} does not advance (points to {next})"
                    )));
                }
            }
            if let Some(enemy) = outcome.encounter {
                if !is_known_enemy(enemy) {
                    return Err(DomainError::validation(format!(
                        "stage {stage} choice {choice} names unknown enemy {enemy}"
                    )));
                }
            }
            if outcome.message.is_empty() {
                return Err(DomainError::validation(format!(
                    "stage {stage} choice {choice} has no message"
                )));
            }
        }
    }

    let mut reachable = BTreeSet::from([Stage::Awakening]);
    let mut frontier = vec![Stage::Awakening];
    while let Some(stage) = frontier.pop() {
        for choice in Choice::ALL {
            if let Transition::Next(next) = outcome_for(stage, choice).transition {
                if reachable.insert(next) {
                    frontier.push(next);
                }
            }
        }
    }
    if let Some(orphan) = Stage::ALL.into_iter().find(|stage| !reachable.contains(stage)) {
        return Err(DomainError::validation(format!(
            "stage {orphan} is unreachable from stage 1"
        )));
    }

    // Stages are visited last-to-first so each `Next` target is already
    // classified when its predecessor is checked.
    let mut ends = BTreeSet::new();
    for stage in Stage::ALL.into_iter().rev() {
        let reaches_end = Choice::ALL.into_iter().any(|choice| {
            match outcome_for(stage, choice).transition {
                Transition::Ending(_) => true,
                Transition::Next(next) => ends.contains(&next),
            }
        });
        if !reaches_end {
            return Err(DomainError::validation(format!(
                "stage {stage} cannot reach an ending"
            )));
        }
        ends.insert(stage);
    }

    Ok(())
}
