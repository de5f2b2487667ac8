//! Stage, choice, and ending identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Marker used on the wire for the terminal stage.
pub const COMPLETE_MARKER: &str = "complete";

/// A node in the narrative graph. Serialized as its stage number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Stage {
    /// Stage 1: waking up in Nexis.
    Awakening,
    /// Stage 2: the recruit trials.
    Trials,
    /// Stage 3: the Sanctum and the Grand Code.
    Revelation,
    /// Stage 4: the decision that ends the story.
    FinalChoice,
}

impl Stage {
    /// Every stage, in story order.
    pub const ALL: [Self; 4] = [
        Self::Awakening,
        Self::Trials,
        Self::Revelation,
        Self::FinalChoice,
    ];

    /// The stage's 1-based number.
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::Awakening => 1,
            Self::Trials => 2,
            Self::Revelation => 3,
            Self::FinalChoice => 4,
        }
    }

    /// Looks a stage up by number.
    #[must_use]
    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|stage| stage.number() == number)
    }

    /// Display title.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Awakening => "The Awakening",
            Self::Trials => "The Trials Begin",
            Self::Revelation => "The Revelation",
            Self::FinalChoice => "The Final Choice",
        }
    }

    /// Scene-setting text shown with the stage's choices.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Awakening => {
                "You wake up in a sterile white room. The air hums with digital energy. \
                 You are in Nexis, the hidden heart of the Source."
            }
            Self::Trials => {
                "You are pitted against other recruits in digital trials. The shifting \
                 labyrinths of code test your abilities."
            }
            Self::Revelation => {
                "Your investigation leads you to the Sanctum, the system's core. Here you \
                 find the Grand Code - the master program governing human consciousness."
            }
            Self::FinalChoice => {
                "You stand before the Grand Code, the fate of reality in your hands. Your \
                 decision will determine the future of humanity."
            }
        }
    }

    /// Button label for `choice` at this stage.
    #[must_use]
    pub fn choice_label(self, choice: Choice) -> &'static str {
        let labels = match self {
            Self::Awakening => [
                "Trust Lira and embrace your role",
                "Question everything about this place",
                "Focus on learning the three pillars",
                "Investigate the whispers of corruption",
            ],
            Self::Trials => [
                "Focus on personal advancement",
                "Build alliances with questioning recruits",
                "Use your skills to help others",
                "Sabotage the trials subtly",
            ],
            Self::Revelation => [
                "Embrace the power of the Grand Code",
                "Expose the truth to all humanity",
                "Seek a third path - subtle reform",
                "Destroy the Grand Code entirely",
            ],
            Self::FinalChoice => [
                "The Collapse - Restore Freedom",
                "The New Order - Seize Control",
                "The Balance - Find Middle Ground",
                "The Anomaly - Reject All Systems",
            ],
        };
        labels[choice.index()]
    }
}

impl From<Stage> for u8 {
    fn from(stage: Stage) -> Self {
        stage.number()
    }
}

impl TryFrom<u8> for Stage {
    type Error = String;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::from_number(number).ok_or_else(|| format!("no such stage: {number}"))
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// A choice key offered at every stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    /// Choice `a`.
    A,
    /// Choice `b`.
    B,
    /// Choice `c`.
    C,
    /// Choice `d`.
    D,
}

impl Choice {
    /// Every choice key.
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Position of the choice within a stage's table.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }

    /// The wire key.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
            Self::D => "d",
        }
    }
}

impl FromStr for Choice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a" => Ok(Self::A),
            "b" => Ok(Self::B),
            "c" => Ok(Self::C),
            "d" => Ok(Self::D),
            other => Err(format!("no such choice: {other}")),
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// How the story ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ending {
    /// The Grand Code falls and freedom returns.
    Collapse,
    /// The player seizes control of the system.
    NewOrder,
    /// A middle ground between control and freedom.
    Balance,
    /// The player rejects every system.
    Anomaly,
}

impl Ending {
    /// Display title.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Collapse => "The Collapse",
            Self::NewOrder => "The New Order",
            Self::Balance => "The Balance",
            Self::Anomaly => "The Anomaly",
        }
    }
}

/// Where the player is in the story: a stage, or the terminal marker.
///
/// Serialized as the stage number or the string `"complete"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StageRepr", into = "StageRepr")]
pub enum CurrentStage {
    /// Waiting for a choice at this stage.
    At(Stage),
    /// The story has ended; only a restart leaves this state.
    Complete,
}

impl Default for CurrentStage {
    fn default() -> Self {
        Self::At(Stage::Awakening)
    }
}

impl CurrentStage {
    /// The active stage, or `None` once complete.
    #[must_use]
    pub fn stage(self) -> Option<Stage> {
        match self {
            Self::At(stage) => Some(stage),
            Self::Complete => None,
        }
    }

    /// Whether the story has ended.
    #[must_use]
    pub fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl fmt::Display for CurrentStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stage() {
            Some(stage) => write!(f, "{stage}"),
            None => f.write_str(COMPLETE_MARKER),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum StageRepr {
    Number(u8),
    Marker(String),
}

impl From<CurrentStage> for StageRepr {
    fn from(current: CurrentStage) -> Self {
        match current.stage() {
            Some(stage) => Self::Number(stage.number()),
            None => Self::Marker(COMPLETE_MARKER.to_owned()),
        }
    }
}

impl TryFrom<StageRepr> for CurrentStage {
    type Error = String;

    fn try_from(repr: StageRepr) -> Result<Self, Self::Error> {
        match repr {
            StageRepr::Number(number) => Stage::try_from(number).map(Self::At),
            StageRepr::Marker(marker) if marker == COMPLETE_MARKER => Ok(Self::Complete),
            StageRepr::Marker(other) => Err(format!("unknown stage marker: {other}")),
        }
    }
}
