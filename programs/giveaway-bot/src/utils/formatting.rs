// utils/formatting.rs

/// Split `text` into chunks of at most `max_chars` characters.
///
/// A chunk ends after the last newline inside its window when there is one,
/// otherwise it is cut at the limit. Concatenating the chunks gives back
/// `text` exactly; empty input yields no chunks.
pub fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        // byte offset just past the `max_chars`-th char, or the whole remainder
        let window_end = rest
            .char_indices()
            .nth(max_chars)
            .map_or(rest.len(), |(idx, _)| idx);

        let cut = if window_end == rest.len() {
            window_end
        } else {
            match rest[..window_end].rfind('\n') {
                Some(nl) => nl + 1,
                None => window_end,
            }
        };

        let (head, tail) = rest.split_at(cut);
        chunks.push(head.to_string());
        rest = tail;
    }

    chunks
}

/// `----...` rule used between report entries
pub fn rule(ch: char, width: usize) -> String {
    ch.to_string().repeat(width)
}
