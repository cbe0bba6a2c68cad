//! Sentence-aligned chunking under a word budget.

/// Number of whitespace-separated words in `text`.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Greedily pack sentences into chunks of at most `max_words` words.
///
/// Sentences are accumulated into the current chunk while the combined word
/// count stays within the budget; the first sentence that would overflow
/// closes the chunk and starts the next one. A single sentence longer than
/// the budget becomes its own oversized chunk — sentences are never split.
/// Empty sentences are dropped; no chunk is ever empty. Pure function of its
/// inputs.
#[must_use]
pub fn pack_sentences(sentences: &[String], max_words: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_words = 0usize;

    for sentence in sentences {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }
        let sentence_words = word_count(sentence);

        if current.is_empty() {
            current.push_str(sentence);
            current_words = sentence_words;
        } else if current_words + sentence_words <= max_words {
            current.push(' ');
            current.push_str(sentence);
            current_words += sentence_words;
        } else {
            chunks.push(std::mem::take(&mut current));
            current.push_str(sentence);
            current_words = sentence_words;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
