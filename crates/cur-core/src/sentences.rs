//! Sentence splitting for evidence selection.
//!
//! A deliberately simple splitter: sentence-terminal punctuation followed by
//! whitespace ends a fragment. It is not a natural-language boundary
//! detector — abbreviations and decimal numbers may be mis-split, which is
//! an accepted approximation for evidence picking, not a correctness
//! requirement.

/// Split `text` into trimmed, non-empty sentence fragments.
///
/// A fragment ends after `.`, `!` or `?` when the next character is
/// whitespace. Terminal punctuation is retained; the separating whitespace
/// is trimmed away. Pure and deterministic: the output depends on `text`
/// alone.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut start = 0;

    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?')
            && let Some(&(_, next)) = chars.peek()
            && next.is_whitespace()
        {
            let end = i + c.len_utf8();
            push_trimmed(&mut fragments, &text[start..end]);
            start = end;
        }
    }
    push_trimmed(&mut fragments, &text[start..]);

    fragments
}

fn push_trimmed(fragments: &mut Vec<String>, fragment: &str) {
    let trimmed = fragment.trim();
    if !trimmed.is_empty() {
        fragments.push(trimmed.to_string());
    }
}
