//! Word timings for read-aloud playback.

use serde::Serialize;

pub const DEFAULT_WORDS_PER_MINUTE: u32 = 150;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordTiming {
    pub word: String,
    pub start_time: f64,
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadAloudSchedule {
    pub word_timings: Vec<WordTiming>,
    pub total_duration: f64,
}

/// Split `text` on whitespace and give every word the same slot length.
///
/// `words_per_minute` must be non-zero; callers validate it first.
pub fn schedule(text: &str, words_per_minute: u32) -> ReadAloudSchedule {
    let ms_per_word = 60_000.0 / f64::from(words_per_minute);

    let word_timings: Vec<WordTiming> = text
        .split_whitespace()
        .enumerate()
        .map(|(index, word)| WordTiming {
            word: word.to_string(),
            start_time: index as f64 * ms_per_word,
            duration: ms_per_word,
        })
        .collect();

    let total_duration = word_timings.len() as f64 * ms_per_word;

    ReadAloudSchedule {
        word_timings,
        total_duration,
    }
}
