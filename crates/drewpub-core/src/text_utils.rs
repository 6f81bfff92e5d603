//! Text splitting helpers for TTS chunking.

/// Splits prose into sentences.
///
/// A sentence ends at a run of `.`, `!` or `?` that is followed by
/// whitespace or the end of the text. Pieces are trimmed and empty pieces
/// are dropped; text without any terminator comes back as one sentence.
pub fn split_into_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        current.push(ch);
        if !is_terminator(ch) {
            continue;
        }
        while let Some(&next) = chars.peek() {
            if !is_terminator(next) {
                break;
            }
            current.push(next);
            chars.next();
        }
        if chars.peek().is_none_or(|next| next.is_whitespace()) {
            push_trimmed(&mut sentences, &current);
            current.clear();
        }
    }

    push_trimmed(&mut sentences, &current);
    sentences
}

/// Packs whitespace-separated words into parts of at most `max_bytes`
/// UTF-8 bytes. Words are joined with a single space and never broken, so a
/// word that alone exceeds the budget becomes its own oversized part.
pub fn split_long_text(text: &str, max_bytes: usize) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        if current.len() + 1 + word.len() > max_bytes {
            parts.push(std::mem::take(&mut current));
            current.push_str(word);
        } else {
            current.push(' ');
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

fn is_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

fn push_trimmed(sentences: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}
