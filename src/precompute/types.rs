//! Collocation templates, occurrence records and the nonterminal markers.
//!
//! A template is a token sequence containing one marker (`a X b`) or two
//! markers (`a X b Y c`). The marker values below are part of the persisted
//! index format: the writer records them in the file header and a reader
//! built with different values refuses the file.

use crate::corpus::{Position, Token, MAX_TOKEN};
use crate::error::{Error, Result};
use std::fmt::Write as _;

/// Marker for the first gap of a collocation template.
pub const FIRST_NONTERMINAL: Token = u32::MAX;

/// Marker for the second gap of a ternary collocation template.
pub const SECOND_NONTERMINAL: Token = u32::MAX - 1;

/// Template key: contiguous patterns separated by nonterminal markers.
pub type Template = Vec<Token>;

#[inline]
pub fn is_nonterminal(token: Token) -> bool {
    token == FIRST_NONTERMINAL || token == SECOND_NONTERMINAL
}

/// One instantiation of a template: the start position of each component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occurrence {
    Binary([Position; 2]),
    Ternary([Position; 3]),
}

impl Occurrence {
    /// Build a record from a slice of 2 or 3 start positions.
    pub fn from_starts(starts: &[Position]) -> Option<Self> {
        match *starts {
            [a, b] => Some(Occurrence::Binary([a, b])),
            [a, b, c] => Some(Occurrence::Ternary([a, b, c])),
            _ => None,
        }
    }

    pub fn starts(&self) -> &[Position] {
        match self {
            Occurrence::Binary(starts) => starts,
            Occurrence::Ternary(starts) => starts,
        }
    }

    /// Number of contiguous components (2 or 3).
    pub fn arity(&self) -> usize {
        self.starts().len()
    }
}

/// Number of components of a well-formed template, or an error describing
/// why the sequence is not one.
///
/// Well-formed means: one or two markers, `FIRST_NONTERMINAL` before
/// `SECOND_NONTERMINAL`, no leading, trailing or adjacent markers, and only
/// valid token ids elsewhere.
pub fn template_arity(template: &[Token]) -> Result<usize> {
    let invalid = |reason: &str| {
        Err(Error::InvalidTemplate(format!(
            "{}: {}",
            format_template(template),
            reason
        )))
    };

    let mut markers = Vec::with_capacity(2);
    let mut run = 0;
    for &token in template {
        if is_nonterminal(token) {
            if run == 0 {
                return invalid("gap without a preceding pattern");
            }
            markers.push(token);
            run = 0;
        } else if token > MAX_TOKEN {
            return invalid("reserved token id");
        } else {
            run += 1;
        }
    }
    if run == 0 {
        return invalid("gap without a following pattern");
    }

    match markers.as_slice() {
        [FIRST_NONTERMINAL] => Ok(2),
        [FIRST_NONTERMINAL, SECOND_NONTERMINAL] => Ok(3),
        [] => invalid("no gap"),
        _ => invalid("gaps out of order"),
    }
}

/// Split a template into its contiguous component patterns.
pub fn template_components(template: &[Token]) -> Vec<&[Token]> {
    template.split(|&t| is_nonterminal(t)).collect()
}

/// Render a template as text: token ids with `X`/`Y` for the markers.
pub fn format_template(template: &[Token]) -> String {
    let mut out = String::new();
    for (i, &token) in template.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        match token {
            FIRST_NONTERMINAL => out.push('X'),
            SECOND_NONTERMINAL => out.push('Y'),
            _ => {
                let _ = write!(out, "{}", token);
            }
        }
    }
    out
}

/// Parse the text form produced by [`format_template`].
///
/// Accepts `X`, `[X]` and `[X,1]` for the first marker and `Y`, `[X,2]` for
/// the second. A second `X` is read as the second marker.
pub fn parse_template(text: &str) -> Result<Template> {
    let mut template = Vec::new();
    let mut gaps = 0;

    for word in text.split_whitespace() {
        let token = match word {
            "X" | "[X]" | "[X,1]" if gaps == 0 => FIRST_NONTERMINAL,
            "X" | "[X]" => SECOND_NONTERMINAL,
            "Y" | "[Y]" | "[X,2]" => SECOND_NONTERMINAL,
            _ => match word.parse::<Token>() {
                Ok(token) if token <= MAX_TOKEN => token,
                _ => {
                    return Err(Error::InvalidTemplate(format!(
                        "'{}' is neither a token id nor a gap",
                        word
                    )));
                }
            },
        };
        if is_nonterminal(token) {
            gaps += 1;
        }
        template.push(token);
    }

    template_arity(&template)?;
    Ok(template)
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: Token = FIRST_NONTERMINAL;
    const Y: Token = SECOND_NONTERMINAL;

    #[test]
    fn test_markers_disjoint_from_tokens() {
        assert!(FIRST_NONTERMINAL > MAX_TOKEN);
        assert!(SECOND_NONTERMINAL > MAX_TOKEN);
        assert_ne!(FIRST_NONTERMINAL, SECOND_NONTERMINAL);
        assert_ne!(SECOND_NONTERMINAL, crate::corpus::END_OF_LINE);
    }

    #[test]
    fn test_template_arity() {
        assert_eq!(template_arity(&[1, X, 2]).unwrap(), 2);
        assert_eq!(template_arity(&[1, 2, X, 3, Y, 4, 5]).unwrap(), 3);

        assert!(template_arity(&[1, 2]).is_err());
        assert!(template_arity(&[X, 1]).is_err());
        assert!(template_arity(&[1, X]).is_err());
        assert!(template_arity(&[1, X, X, 2]).is_err());
        assert!(template_arity(&[1, Y, 2]).is_err());
        assert!(template_arity(&[1, Y, 2, X, 3]).is_err());
        assert!(template_arity(&[1, X, 2, Y, 3, X, 4]).is_err());
        assert!(template_arity(&[1, X, crate::corpus::END_OF_LINE]).is_err());
    }

    #[test]
    fn test_components() {
        let parts = template_components(&[1, 2, X, 3, Y, 4]);
        let expected: Vec<&[Token]> = vec![&[1, 2], &[3], &[4]];
        assert_eq!(parts, expected);
    }

    #[test]
    fn test_format_and_parse() {
        let template = vec![12, X, 7, Y, 3];
        assert_eq!(format_template(&template), "12 X 7 Y 3");
        assert_eq!(parse_template("12 X 7 Y 3").unwrap(), template);
        assert_eq!(parse_template("12 [X,1] 7 [X,2] 3").unwrap(), template);
        assert_eq!(parse_template("12 X 7 X 3").unwrap(), template);
        assert_eq!(parse_template("  5 [X]  6 ").unwrap(), vec![5, X, 6]);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_template("a X b"), Err(Error::InvalidTemplate(_))));
        assert!(matches!(parse_template("1 2 3"), Err(Error::InvalidTemplate(_))));
        assert!(matches!(parse_template(""), Err(Error::InvalidTemplate(_))));
        assert!(matches!(parse_template("1 Y 2"), Err(Error::InvalidTemplate(_))));
        assert!(parse_template("1 X 4294967295").is_err());
    }

    #[test]
    fn test_occurrence_arity() {
        let binary = Occurrence::from_starts(&[0, 3]).unwrap();
        assert_eq!(binary, Occurrence::Binary([0, 3]));
        assert_eq!(binary.arity(), 2);
        assert_eq!(Occurrence::from_starts(&[0, 3, 9]).unwrap().starts(), &[0, 3, 9]);
        assert!(Occurrence::from_starts(&[1]).is_none());
    }
}
