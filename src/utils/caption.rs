// src/utils/caption.rs
//
// Caption composition for the publish flow

use crate::constants::{MAX_CAPTION_LENGTH, MAX_HASHTAGS};
use crate::error::AppError;

/// Rejects captions longer than the platform limit (counted in characters).
pub fn validate_caption(caption: &str) -> Result<(), AppError> {
    let length = caption.chars().count();
    if length > MAX_CAPTION_LENGTH {
        return Err(AppError::InvalidInput(format!(
            "caption is {length} characters, the limit is {MAX_CAPTION_LENGTH}"
        )));
    }
    Ok(())
}

/// Normalises free-form hashtag input: split on whitespace and commas,
/// prefix `#`, drop duplicates (case-insensitive), keep first-seen order.
pub fn parse_hashtags(input: &str) -> Vec<String> {
    let mut seen = Vec::new();
    let mut tags = Vec::new();
    for raw in input.split(|c: char| c.is_whitespace() || c == ',') {
        let word = raw.trim_start_matches('#');
        if word.is_empty() {
            continue;
        }
        let key = word.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        tags.push(format!("#{word}"));
    }
    tags
}

/// Caption text followed by a blank line and the hashtags.
///
/// # Errors
///
/// `InvalidInput` for an empty caption, more than 30 distinct hashtags, or a
/// result over the length limit.
pub fn compose_caption(caption: &str, hashtags: &str) -> Result<String, AppError> {
    let caption = caption.trim();
    if caption.is_empty() {
        return Err(AppError::InvalidInput("caption is empty".to_string()));
    }

    let tags = parse_hashtags(hashtags);
    if tags.len() > MAX_HASHTAGS {
        return Err(AppError::InvalidInput(format!(
            "{} hashtags given, the limit is {MAX_HASHTAGS}",
            tags.len()
        )));
    }
    let composed = if tags.is_empty() {
        caption.to_string()
    } else {
        format!("{caption}\n\n{}", tags.join(" "))
    };

    validate_caption(&composed)?;
    Ok(composed)
}
