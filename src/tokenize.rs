/// Pure function mapping a raw line to its ordered tokens.
pub type Tokenizer = fn(&str) -> Vec<String>;

/// Trims surrounding whitespace, then splits on the single space character.
///
/// Runs of spaces therefore produce empty tokens, and a blank line produces
/// one empty token rather than none. Callers wanting different behavior
/// inject their own [`Tokenizer`].
pub fn space_tokenizer(content: &str) -> Vec<String> {
    content.trim().split(' ').map(str::to_owned).collect()
}
