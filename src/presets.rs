use crate::mood::{Emotion, MoodSnapshot};
use serde::{Deserialize, Serialize};

/// Canned mood scenarios for driving the scene without a live speech
/// pipeline attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoodPreset {
    /// Neutral baseline, no keywords
    NeutralDrift,
    /// Strong negative sentiment with anger accents
    StormyRant,
    /// Warm positive glow
    GoldenHour,
    /// Positive sentiment with joy bursts
    JoyfulBurst,
    /// Mildly negative, fearful undertone
    Anxious,
    /// Neutral mood, work/tech keyword particles
    TechStandup,
    /// Positive calm with nature keywords
    ForestWalk,
}

impl Default for MoodPreset {
    fn default() -> Self {
        Self::NeutralDrift
    }
}

impl MoodPreset {
    pub fn all() -> Vec<MoodPreset> {
        vec![
            Self::NeutralDrift,
            Self::StormyRant,
            Self::GoldenHour,
            Self::JoyfulBurst,
            Self::Anxious,
            Self::TechStandup,
            Self::ForestWalk,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::NeutralDrift => "Neutral Drift",
            Self::StormyRant => "Stormy Rant",
            Self::GoldenHour => "Golden Hour",
            Self::JoyfulBurst => "Joyful Burst",
            Self::Anxious => "Anxious",
            Self::TechStandup => "Tech Standup",
            Self::ForestWalk => "Forest Walk",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::NeutralDrift => "Soft pastels and slow clouds",
            Self::StormyRant => "Dark turbulence with sharp triangles",
            Self::GoldenHour => "Warm sunset gradients, fast flow",
            Self::JoyfulBurst => "Star showers on a bright palette",
            Self::Anxious => "Violet unease, jittery field",
            Self::TechStandup => "Grid and spark symbols over neutral calm",
            Self::ForestWalk => "Drifting leaves on a warm breeze",
        }
    }

    /// The input snapshot this preset feeds to the scene.
    pub fn snapshot(&self) -> MoodSnapshot {
        match self {
            Self::NeutralDrift => MoodSnapshot::new(0.0, Emotion::Calm, vec![]),
            Self::StormyRant => MoodSnapshot::new(-0.7, Emotion::Anger, vec![]),
            Self::GoldenHour => MoodSnapshot::new(0.6, Emotion::Calm, vec![]),
            Self::JoyfulBurst => MoodSnapshot::new(0.8, Emotion::Joy, vec![]),
            Self::Anxious => MoodSnapshot::new(-0.4, Emotion::Fear, vec![]),
            Self::TechStandup => MoodSnapshot::new(
                0.1,
                Emotion::Calm,
                vec!["sprint meeting".into(), "code review".into()],
            ),
            Self::ForestWalk => MoodSnapshot::new(
                0.5,
                Emotion::Calm,
                vec!["forest trail".into(), "green canopy".into()],
            ),
        }
    }
}
