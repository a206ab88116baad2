//! Free-text parsing for ingredient and step lists.
//!
//! Lets a whole ingredient list or method be pasted as one block of text
//! instead of entering each line separately.

use crate::params::{IngredientInput, StepInput};

/// Amount recorded for an ingredient listed without one.
pub const DEFAULT_AMOUNT: &str = "to taste";

fn is_list_separator(c: char) -> bool {
    matches!(c, '\n' | '\r' | ',' | '，' | '、')
}

fn is_amount_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, ':' | '：')
}

/// Splits one `name amount` piece.
///
/// An explicit colon wins over whitespace, so `Olive oil: 2 tbsp` keeps the
/// two-word name. Otherwise the name ends at the first whitespace.
fn split_ingredient(piece: &str) -> (&str, &str) {
    let at = piece
        .find([':', '：'])
        .or_else(|| piece.find(char::is_whitespace));

    match at {
        Some(at) => {
            let name = piece[..at].trim_end_matches(is_amount_separator);
            let amount = piece[at..].trim_start_matches(is_amount_separator);
            (name, amount)
        }
        None => (piece, ""),
    }
}

/// Parses a block of ingredients.
///
/// Items are separated by newlines, commas (ASCII or full-width) or the
/// enumeration comma `、`. Each item is a name followed by an amount,
/// separated by whitespace or a colon; items without an amount get
/// [`DEFAULT_AMOUNT`].
///
/// # Examples
///
/// ```rust
/// use cookbook_core::parse::parse_ingredients;
///
/// let parsed = parse_ingredients("flour 200g, salt\nmilk: 1 cup");
/// assert_eq!(parsed.len(), 3);
/// assert_eq!(parsed[0].amount, "200g");
/// assert_eq!(parsed[1].amount, "to taste");
/// assert_eq!(parsed[2].name, "milk");
/// ```
pub fn parse_ingredients(text: &str) -> Vec<IngredientInput> {
    text.split(is_list_separator)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .filter_map(|piece| {
            let (name, amount) = split_ingredient(piece);
            if name.is_empty() {
                return None;
            }
            let amount = if amount.is_empty() {
                DEFAULT_AMOUNT
            } else {
                amount
            };
            Some(IngredientInput::new(name, amount))
        })
        .collect()
}

/// Strips a leading `1.`, `2、`, `3:` style number from a step line.
fn strip_numbering(line: &str) -> &str {
    let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() == line.len() {
        return line;
    }
    let stripped = rest.trim_start_matches(|c: char| {
        c.is_whitespace() || matches!(c, '.' | '、' | ':' | '：' | ')')
    });
    if stripped.len() == rest.len() {
        // Digits not followed by a separator are part of the text
        return line;
    }
    stripped
}

/// Parses a block of steps, one per line, dropping any leading numbering.
///
/// ```rust
/// use cookbook_core::parse::parse_steps;
///
/// let steps = parse_steps("1. Boil water\n\n2、Add pasta\n10 minutes more");
/// let text: Vec<_> = steps.iter().map(|s| s.description.as_str()).collect();
/// assert_eq!(text, ["Boil water", "Add pasta", "minutes more"]);
/// ```
pub fn parse_steps(text: &str) -> Vec<StepInput> {
    text.lines()
        .map(|line| strip_numbering(line.trim()).trim())
        .filter(|line| !line.is_empty())
        .map(StepInput::new)
        .collect()
}
