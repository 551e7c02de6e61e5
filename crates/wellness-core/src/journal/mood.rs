//! Mood and sentiment annotation.
//!
//! The hosted analysis service sits behind [`MoodAnalyzer`]; the crate ships
//! a word-list implementation that works offline.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::WellnessResult;

const POSITIVE_THRESHOLD: Decimal = dec!(0.25);
const NEGATIVE_THRESHOLD: Decimal = dec!(-0.25);
const MAX_KEYWORDS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Joyful,
    Grateful,
    Calm,
    Neutral,
    Anxious,
    Sad,
    Angry,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Joyful => "joyful",
            Mood::Grateful => "grateful",
            Mood::Calm => "calm",
            Mood::Neutral => "neutral",
            Mood::Anxious => "anxious",
            Mood::Sad => "sad",
            Mood::Angry => "angry",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentAnalysis {
    /// -1 (negative) to 1 (positive)
    pub score: Decimal,
    pub label: SentimentLabel,
    pub suggested_mood: Mood,
    pub keywords: Vec<String>,
}

/// Anything that can read a piece of writing and annotate it.
pub trait MoodAnalyzer {
    fn analyze(&self, text: &str) -> WellnessResult<SentimentAnalysis>;
}

// ---------------------------------------------------------------------------
// Word-list analyzer
// ---------------------------------------------------------------------------

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "happy", "joy", "love", "wonderful", "amazing", "excited", "proud",
    "grateful", "thankful", "calm", "peaceful", "relaxed", "rested", "hopeful", "fun",
    "accomplished", "energized", "content", "blessed", "better", "smile", "laughed",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "sad", "angry", "upset", "anxious", "worried", "stressed", "tired", "exhausted",
    "lonely", "afraid", "scared", "frustrated", "annoyed", "hurt", "awful", "terrible",
    "overwhelmed", "nervous", "cried", "depressed", "furious", "worse", "panic",
];

const NEGATORS: &[&str] = &["not", "never", "no", "hardly", "isn't", "wasn't", "don't", "didn't"];

const MOOD_CUES: &[(Mood, &[&str])] = &[
    (Mood::Joyful, &["happy", "joy", "excited", "amazing", "wonderful", "fun", "laughed"]),
    (Mood::Grateful, &["grateful", "thankful", "blessed", "appreciate"]),
    (Mood::Calm, &["calm", "peaceful", "relaxed", "rested", "content"]),
    (Mood::Anxious, &["anxious", "worried", "nervous", "stressed", "overwhelmed", "panic", "afraid", "scared"]),
    (Mood::Sad, &["sad", "lonely", "cried", "depressed", "hurt"]),
    (Mood::Angry, &["angry", "furious", "frustrated", "annoyed", "upset"]),
];

/// Offline analyzer: counts positive and negative words, flipping a word's
/// polarity when the previous word negates it.
#[derive(Debug, Clone, Default)]
pub struct LexiconAnalyzer;

impl LexiconAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl MoodAnalyzer for LexiconAnalyzer {
    fn analyze(&self, text: &str) -> WellnessResult<SentimentAnalysis> {
        let tokens = tokenize(text);

        let mut positive = 0u32;
        let mut negative = 0u32;
        let mut keywords: Vec<String> = Vec::new();
        let mut cue_counts = [0u32; MOOD_CUES.len()];

        for (i, token) in tokens.iter().enumerate() {
            let negated = i > 0 && NEGATORS.contains(&tokens[i - 1].as_str());
            let is_pos = POSITIVE_WORDS.contains(&token.as_str());
            let is_neg = NEGATIVE_WORDS.contains(&token.as_str());
            if !is_pos && !is_neg {
                continue;
            }

            match (is_pos, negated) {
                (true, false) | (false, true) => positive += 1,
                _ => negative += 1,
            }
            if !negated {
                for (slot, (_, cues)) in cue_counts.iter_mut().zip(MOOD_CUES) {
                    if cues.contains(&token.as_str()) {
                        *slot += 1;
                    }
                }
            }
            if keywords.len() < MAX_KEYWORDS && !keywords.contains(token) {
                keywords.push(token.clone());
            }
        }

        let hits = positive + negative;
        let score = if hits == 0 {
            Decimal::ZERO
        } else {
            (Decimal::from(positive) - Decimal::from(negative)) / Decimal::from(hits)
        };

        let label = if score >= POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if score <= NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };

        Ok(SentimentAnalysis {
            score,
            label,
            suggested_mood: suggest_mood(&cue_counts, label),
            keywords,
        })
    }
}

fn suggest_mood(cue_counts: &[u32], label: SentimentLabel) -> Mood {
    let best = cue_counts
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count > 0)
        .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))
        .map(|(i, _)| MOOD_CUES[i].0);

    match (best, label) {
        (Some(mood), _) => mood,
        (None, SentimentLabel::Positive) => Mood::Joyful,
        (None, SentimentLabel::Negative) => Mood::Sad,
        (None, SentimentLabel::Neutral) => Mood::Neutral,
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}
