//! Mood Input Feed for Aura Studio RS
//! Snapshot of the three live inputs plus the channel they arrive on

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use serde::{Deserialize, Serialize};

/// Emotion labels the sentiment backend can produce.
/// Anything it sends outside this set degrades to `Calm`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Emotion {
    Calm,
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
}

impl Default for Emotion {
    fn default() -> Self {
        Self::Calm
    }
}

impl Emotion {
    pub fn all() -> Vec<Emotion> {
        vec![
            Self::Calm,
            Self::Joy,
            Self::Sadness,
            Self::Anger,
            Self::Fear,
            Self::Surprise,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Calm => "calm",
            Self::Joy => "joy",
            Self::Sadness => "sadness",
            Self::Anger => "anger",
            Self::Fear => "fear",
            Self::Surprise => "surprise",
        }
    }

    /// Parse a backend label. Unknown labels fall back to `Calm`, which is
    /// also the behavior the weather mapper wants for them.
    #[allow(dead_code)]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "joy" => Self::Joy,
            "sadness" => Self::Sadness,
            "anger" => Self::Anger,
            "fear" => Self::Fear,
            "surprise" => Self::Surprise,
            _ => Self::Calm,
        }
    }
}

/// One consistent reading of the three inputs, taken at the start of a frame.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MoodSnapshot {
    /// Sentiment score in [-1, 1]. 0.0 until the backend has spoken.
    pub sentiment: f32,
    pub emotion: Emotion,
    pub keywords: Vec<String>,
}

impl MoodSnapshot {
    pub fn new(sentiment: f32, emotion: Emotion, keywords: Vec<String>) -> Self {
        Self {
            sentiment: sentiment.clamp(-1.0, 1.0),
            emotion,
            keywords,
        }
    }
}

/// Handle given to the producing side (speech pipeline, backend poller, UI).
#[derive(Clone)]
pub struct MoodSender {
    tx: Sender<MoodSnapshot>,
}

impl MoodSender {
    /// Non-blocking send. A full channel just drops the update; the scene
    /// keeps rendering from the last snapshot it saw.
    pub fn send(&self, snapshot: MoodSnapshot) {
        match self.tx.try_send(snapshot) {
            Ok(()) | Err(TrySendError::Full(_)) => {}
            Err(TrySendError::Disconnected(_)) => {
                eprintln!("Mood feed receiver dropped; input ignored");
            }
        }
    }
}

/// Consuming side, owned by the app. Drained once per frame.
pub struct MoodFeed {
    rx: Receiver<MoodSnapshot>,
    latest: MoodSnapshot,
}

impl MoodFeed {
    pub fn channel() -> (MoodSender, MoodFeed) {
        let (tx, rx) = bounded(64);
        (
            MoodSender { tx },
            MoodFeed {
                rx,
                latest: MoodSnapshot::default(),
            },
        )
    }

    /// Drain pending updates and return the most recent snapshot. Stopping
    /// the producers simply freezes the returned value.
    pub fn poll(&mut self) -> &MoodSnapshot {
        while let Ok(snapshot) = self.rx.try_recv() {
            self.latest = snapshot;
        }
        &self.latest
    }

    #[allow(dead_code)]
    pub fn latest(&self) -> &MoodSnapshot {
        &self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_labels_degrade_to_calm() {
        assert_eq!(Emotion::from_label("anger"), Emotion::Anger);
        assert_eq!(Emotion::from_label("  JOY "), Emotion::Joy);
        assert_eq!(Emotion::from_label("ennui"), Emotion::Calm);
        assert_eq!(Emotion::from_label(""), Emotion::Calm);
    }

    #[test]
    fn feed_keeps_last_snapshot_when_idle() {
        let (tx, mut feed) = MoodFeed::channel();
        assert_eq!(feed.poll().sentiment, 0.0);

        tx.send(MoodSnapshot::new(0.7, Emotion::Joy, vec!["sun".into()]));
        tx.send(MoodSnapshot::new(-0.5, Emotion::Anger, vec![]));
        let snap = feed.poll().clone();
        assert_eq!(snap.sentiment, -0.5);
        assert_eq!(snap.emotion, Emotion::Anger);

        // No new input: the feed replays the last snapshot indefinitely.
        assert_eq!(feed.poll().sentiment, -0.5);
    }

    #[test]
    fn sentiment_is_clamped_to_unit_range() {
        let snap = MoodSnapshot::new(3.0, Emotion::Calm, vec![]);
        assert_eq!(snap.sentiment, 1.0);
    }
}
