//! Path-data tokenizer.
//!
//! Splits the `d` attribute of an SVG path into typed [`Token`]s. The input
//! is cut into runs of one command letter followed by its numeric operands;
//! each run is expanded into one token per operand group, so
//! `L 1 2 3 4` yields two line-to tokens.
//!
//! # Supported Commands
//!
//! | command                        | letters         | operands |
//! |--------------------------------|-----------------|----------|
//! | close path                     | `Z` `z`         | 0        |
//! | horizontal / vertical line     | `H` `h` `V` `v` | 1        |
//! | move / line / smooth quadratic | `M` `m` `L` `l` `T` `t` | 2 |
//! | smooth cubic / quadratic       | `S` `s` `Q` `q` | 4        |
//! | cubic                          | `C` `c`         | 6        |
//!
//! Elliptical arcs (`A`/`a`) are reported as unsupported and skipped. Any
//! other letter is an error.
//!
//! # Example
//!
//! ```
//! use meshmerize::io::{tokenize, Command};
//!
//! let tokenized = tokenize::<f64>("M0,0 L10,0 L10,10 Z").unwrap();
//! let commands: Vec<_> = tokenized.tokens.iter().map(|t| t.command()).collect();
//! assert_eq!(
//!     commands,
//!     [Command::MoveTo, Command::LineTo, Command::LineTo, Command::ClosePath]
//! );
//! assert!(tokenized.diagnostics.is_empty());
//! ```

use crate::error::{Diagnostic, MeshError};
use crate::primitives::Point2;
use num_traits::Float;
use std::str::FromStr;

/// The drawing commands understood by the path assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    ClosePath,
    HorizontalTo,
    VerticalTo,
    MoveTo,
    LineTo,
    SmoothQuadraticTo,
    SmoothCubicTo,
    QuadraticTo,
    CubicTo,
}

impl Command {
    /// Number of numeric operands one instance of the command takes.
    pub fn arity(self) -> usize {
        match self {
            Command::ClosePath => 0,
            Command::HorizontalTo | Command::VerticalTo => 1,
            Command::MoveTo | Command::LineTo | Command::SmoothQuadraticTo => 2,
            Command::SmoothCubicTo | Command::QuadraticTo => 4,
            Command::CubicTo => 6,
        }
    }

    /// The path-data letter, lowercase for relative commands.
    pub fn letter(self, relative: bool) -> char {
        let upper = match self {
            Command::ClosePath => 'Z',
            Command::HorizontalTo => 'H',
            Command::VerticalTo => 'V',
            Command::MoveTo => 'M',
            Command::LineTo => 'L',
            Command::SmoothQuadraticTo => 'T',
            Command::SmoothCubicTo => 'S',
            Command::QuadraticTo => 'Q',
            Command::CubicTo => 'C',
        };
        if relative {
            upper.to_ascii_lowercase()
        } else {
            upper
        }
    }
}

/// What a command letter stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Letter {
    Command(Command),
    Arc,
}

fn classify(letter: char, position: usize) -> Result<Letter, MeshError> {
    let command = match letter.to_ascii_uppercase() {
        'Z' => Command::ClosePath,
        'H' => Command::HorizontalTo,
        'V' => Command::VerticalTo,
        'M' => Command::MoveTo,
        'L' => Command::LineTo,
        'T' => Command::SmoothQuadraticTo,
        'S' => Command::SmoothCubicTo,
        'Q' => Command::QuadraticTo,
        'C' => Command::CubicTo,
        'A' => return Ok(Letter::Arc),
        _ => {
            return Err(MeshError::UnknownCommand {
                command: letter,
                position,
            })
        }
    };
    Ok(Letter::Command(command))
}

/// Operands of a single command, typed by command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathOp<F> {
    ClosePath,
    HorizontalTo(F),
    VerticalTo(F),
    MoveTo(Point2<F>),
    LineTo(Point2<F>),
    SmoothQuadraticTo(Point2<F>),
    /// Second control point and end point.
    SmoothCubicTo(Point2<F>, Point2<F>),
    /// Control point and end point.
    QuadraticTo(Point2<F>, Point2<F>),
    /// Two control points and end point.
    CubicTo(Point2<F>, Point2<F>, Point2<F>),
}

/// One command with its operands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<F> {
    /// The command and its operands.
    pub op: PathOp<F>,
    /// Lowercase letter: operands are offsets from the pen position.
    pub relative: bool,
    /// Expanded from a repeated operand group rather than written with its
    /// own letter. Implicit move-to tokens draw lines.
    pub implicit: bool,
}

impl<F: Float> Token<F> {
    /// Builds a token from exactly `command.arity()` operands.
    fn from_operands(command: Command, relative: bool, implicit: bool, v: &[F]) -> Self {
        debug_assert_eq!(v.len(), command.arity());
        let p = |i: usize| Point2::new(v[i], v[i + 1]);
        let op = match command {
            Command::ClosePath => PathOp::ClosePath,
            Command::HorizontalTo => PathOp::HorizontalTo(v[0]),
            Command::VerticalTo => PathOp::VerticalTo(v[0]),
            Command::MoveTo => PathOp::MoveTo(p(0)),
            Command::LineTo => PathOp::LineTo(p(0)),
            Command::SmoothQuadraticTo => PathOp::SmoothQuadraticTo(p(0)),
            Command::SmoothCubicTo => PathOp::SmoothCubicTo(p(0), p(2)),
            Command::QuadraticTo => PathOp::QuadraticTo(p(0), p(2)),
            Command::CubicTo => PathOp::CubicTo(p(0), p(2), p(4)),
        };
        Self {
            op,
            relative,
            implicit,
        }
    }

    /// Creates an explicit absolute token.
    pub fn absolute(op: PathOp<F>) -> Self {
        Self {
            op,
            relative: false,
            implicit: false,
        }
    }

    /// Creates an explicit relative token.
    pub fn relative(op: PathOp<F>) -> Self {
        Self {
            op,
            relative: true,
            implicit: false,
        }
    }

    /// The command this token carries.
    pub fn command(&self) -> Command {
        match self.op {
            PathOp::ClosePath => Command::ClosePath,
            PathOp::HorizontalTo(_) => Command::HorizontalTo,
            PathOp::VerticalTo(_) => Command::VerticalTo,
            PathOp::MoveTo(_) => Command::MoveTo,
            PathOp::LineTo(_) => Command::LineTo,
            PathOp::SmoothQuadraticTo(_) => Command::SmoothQuadraticTo,
            PathOp::SmoothCubicTo(..) => Command::SmoothCubicTo,
            PathOp::QuadraticTo(..) => Command::QuadraticTo,
            PathOp::CubicTo(..) => Command::CubicTo,
        }
    }

    /// The path-data letter, with its original case.
    pub fn letter(&self) -> char {
        self.command().letter(self.relative)
    }

    /// Coordinate pairs of the token, in order. Empty for close-path and
    /// horizontal/vertical tokens.
    pub fn points(&self) -> Vec<Point2<F>> {
        match self.op {
            PathOp::ClosePath | PathOp::HorizontalTo(_) | PathOp::VerticalTo(_) => Vec::new(),
            PathOp::MoveTo(a) | PathOp::LineTo(a) | PathOp::SmoothQuadraticTo(a) => vec![a],
            PathOp::SmoothCubicTo(a, b) | PathOp::QuadraticTo(a, b) => vec![a, b],
            PathOp::CubicTo(a, b, c) => vec![a, b, c],
        }
    }

    /// The flat operand list; its length is always `command().arity()`.
    pub fn operands(&self) -> Vec<F> {
        match self.op {
            PathOp::HorizontalTo(v) | PathOp::VerticalTo(v) => vec![v],
            _ => self.points().iter().flat_map(|p| [p.x, p.y]).collect(),
        }
    }
}

/// Result of tokenizing one path-data string.
#[derive(Debug, Clone, PartialEq)]
pub struct Tokenized<F> {
    /// Tokens in document order.
    pub tokens: Vec<Token<F>>,
    /// Recoverable problems, in the order they were found.
    pub diagnostics: Vec<Diagnostic>,
}

impl<F> Tokenized<F> {
    /// Returns true if the path data was read without any diagnostics.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Tokenizes a path-data string.
///
/// Malformed operand groups, unreadable numbers and elliptical arcs are
/// skipped with a [`Diagnostic`] (also logged as a warning).
///
/// # Errors
///
/// Returns [`MeshError::UnknownCommand`] for a letter that is not a path
/// command; the operand count of such a command cannot be known.
///
/// # Example
///
/// ```
/// use meshmerize::io::tokenize;
///
/// // Two cubic segments written after a single letter.
/// let tokenized = tokenize::<f64>("M0 0 C1 1 2 1 3 0 4 -1 5 -1 6 0").unwrap();
/// assert_eq!(tokenized.tokens.len(), 3);
/// assert_eq!(tokenized.tokens[2].letter(), 'C');
/// assert!(tokenized.tokens[2].implicit);
/// ```
pub fn tokenize<F: Float + FromStr>(data: &str) -> Result<Tokenized<F>, MeshError> {
    let mut tokens = Vec::new();
    let mut diagnostics = Vec::new();

    let runs = split_runs(data);
    if let Some(leading) = runs.leading {
        report(
            &mut diagnostics,
            Diagnostic::IgnoredOperands {
                text: leading.text.trim().to_string(),
                position: leading.position,
            },
        );
    }

    for run in runs.commands {
        let command = match classify(run.letter, run.position)? {
            Letter::Arc => {
                report(
                    &mut diagnostics,
                    Diagnostic::UnsupportedCommand {
                        command: run.letter,
                        position: run.position,
                    },
                );
                continue;
            }
            Letter::Command(command) => command,
        };
        let relative = run.letter.is_ascii_lowercase();

        if command == Command::ClosePath {
            let rest = run.body.trim();
            if !rest.is_empty() {
                report(
                    &mut diagnostics,
                    Diagnostic::IgnoredOperands {
                        text: rest.to_string(),
                        position: run.body_position,
                    },
                );
            }
            tokens.push(Token::from_operands(command, relative, false, &[]));
            continue;
        }

        let numbers: Vec<F> = match scan_numbers(run.body, run.body_position) {
            Ok(numbers) => numbers,
            Err((text, position)) => {
                report(
                    &mut diagnostics,
                    Diagnostic::InvalidNumber {
                        command: run.letter,
                        text,
                        position,
                    },
                );
                continue;
            }
        };

        let arity = command.arity();
        if numbers.is_empty() || numbers.len() % arity != 0 {
            report(
                &mut diagnostics,
                Diagnostic::MalformedToken {
                    command: run.letter,
                    position: run.position,
                    operands: numbers.len(),
                    arity,
                },
            );
            continue;
        }

        for (i, group) in numbers.chunks_exact(arity).enumerate() {
            tokens.push(Token::from_operands(command, relative, i > 0, group));
        }
    }

    log::trace!(
        "tokenized {} bytes into {} tokens ({} diagnostics)",
        data.len(),
        tokens.len(),
        diagnostics.len()
    );

    Ok(Tokenized {
        tokens,
        diagnostics,
    })
}

fn report(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    log::warn!("{}", diagnostic);
    diagnostics.push(diagnostic);
}

// ============================================================================
// Internal implementation
// ============================================================================

/// A command letter and the text up to the next command letter.
struct Run<'a> {
    letter: char,
    position: usize,
    body: &'a str,
    body_position: usize,
}

/// Non-blank text before the first command letter.
struct Leading<'a> {
    text: &'a str,
    position: usize,
}

struct Runs<'a> {
    leading: Option<Leading<'a>>,
    commands: Vec<Run<'a>>,
}

fn split_runs(data: &str) -> Runs<'_> {
    let chars: Vec<(usize, char)> = data.char_indices().collect();
    let letter_indices: Vec<usize> = (0..chars.len())
        .filter(|&i| is_command_letter(&chars, i))
        .collect();

    let leading_end = letter_indices
        .first()
        .map(|&i| chars[i].0)
        .unwrap_or(data.len());
    let leading = if data[..leading_end].trim().is_empty() {
        None
    } else {
        Some(Leading {
            text: &data[..leading_end],
            position: 0,
        })
    };

    let commands = letter_indices
        .iter()
        .enumerate()
        .map(|(k, &i)| {
            let (position, letter) = chars[i];
            let body_position = position + letter.len_utf8();
            let body_end = letter_indices
                .get(k + 1)
                .map(|&next| chars[next].0)
                .unwrap_or(data.len());
            Run {
                letter,
                position,
                body: &data[body_position..body_end],
                body_position,
            }
        })
        .collect();

    Runs { leading, commands }
}

/// An alphabetic character starts a command unless it is the exponent
/// marker of a number, as in `1.5e-3`.
fn is_command_letter(chars: &[(usize, char)], i: usize) -> bool {
    let c = chars[i].1;
    if !c.is_alphabetic() {
        return false;
    }
    if c != 'e' && c != 'E' {
        return true;
    }

    let follows_mantissa = i > 0 && matches!(chars[i - 1].1, '0'..='9' | '.');
    let next = chars.get(i + 1).map(|&(_, c)| c);
    let after = chars.get(i + 2).map(|&(_, c)| c);
    let leads_exponent = match next {
        Some('0'..='9') => true,
        Some('+') | Some('-') => matches!(after, Some('0'..='9')),
        _ => false,
    };
    !(follows_mantissa && leads_exponent)
}

fn is_separator(b: u8) -> bool {
    b == b',' || b.is_ascii_whitespace()
}

/// Reads every number in an operand run.
///
/// Numbers are separated by whitespace and/or commas, or implicitly by a
/// sign or a second decimal point (`10-5`, `.5.5`). On failure returns the
/// unreadable field and its byte offset.
fn scan_numbers<F: FromStr>(body: &str, offset: usize) -> Result<Vec<F>, (String, usize)> {
    let bytes = body.as_bytes();
    let mut numbers = Vec::new();
    let mut i = 0;

    loop {
        while i < bytes.len() && is_separator(bytes[i]) {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }

        let start = i;
        if bytes[i] == b'+' || bytes[i] == b'-' {
            i += 1;
        }
        let mut digits = 0;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            digits += 1;
        }
        if i < bytes.len() && bytes[i] == b'.' {
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
                digits += 1;
            }
        }

        if digits == 0 {
            let mut end = start + 1;
            while end < bytes.len() && !is_separator(bytes[end]) {
                end += 1;
            }
            // Stay on a char boundary if the field holds non-ASCII text.
            while !body.is_char_boundary(end) {
                end += 1;
            }
            return Err((body[start..end].to_string(), offset + start));
        }

        if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
            let mut j = i + 1;
            if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
                j += 1;
            }
            if j < bytes.len() && bytes[j].is_ascii_digit() {
                while j < bytes.len() && bytes[j].is_ascii_digit() {
                    j += 1;
                }
                i = j;
            }
        }

        let text = &body[start..i];
        let value = text
            .parse()
            .map_err(|_| (text.to_string(), offset + start))?;
        numbers.push(value);
    }

    Ok(numbers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(data: &str) -> Tokenized<f64> {
        tokenize(data).unwrap()
    }

    #[test]
    fn test_closed_square() {
        let t = tok("M0,0 L10,0 L10,10 Z");
        assert!(t.is_clean());
        assert_eq!(t.tokens.len(), 4);
        assert_eq!(t.tokens[0].op, PathOp::MoveTo(Point2::new(0.0, 0.0)));
        assert_eq!(t.tokens[1].op, PathOp::LineTo(Point2::new(10.0, 0.0)));
        assert_eq!(t.tokens[2].op, PathOp::LineTo(Point2::new(10.0, 10.0)));
        assert_eq!(t.tokens[3].op, PathOp::ClosePath);
        assert!(t.tokens[3].operands().is_empty());
    }

    #[test]
    fn test_repeated_cubic_expands() {
        let t = tok("C 1,2 3,4 5,6 7,8 9,10 11,12");
        assert_eq!(t.tokens.len(), 2);
        for token in &t.tokens {
            assert_eq!(token.command(), Command::CubicTo);
            assert_eq!(token.operands().len(), 6);
        }
        assert_eq!(t.tokens[0].operands(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(t.tokens[1].operands(), vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0]);
        assert!(!t.tokens[0].implicit);
        assert!(t.tokens[1].implicit);
    }

    #[test]
    fn test_repeated_line_expands() {
        let t = tok("M 0 0 L 1 1 2 2 3 3");
        assert_eq!(t.tokens.len(), 4);
        assert!(t.tokens[1..].iter().all(|t| t.command() == Command::LineTo));
    }

    #[test]
    fn test_case_preserved() {
        let t = tok("m 1 2 l 3 4 h 5 v 6 z");
        let letters: String = t.tokens.iter().map(|t| t.letter()).collect();
        assert_eq!(letters, "mlhvz");
        assert!(t.tokens.iter().all(|t| t.relative));

        let t = tok("M 1 2 H 5 V 6 Z");
        let letters: String = t.tokens.iter().map(|t| t.letter()).collect();
        assert_eq!(letters, "MHVZ");
        assert!(t.tokens.iter().all(|t| !t.relative));
    }

    #[test]
    fn test_all_arities() {
        let t = tok("M0 0 H1 V2 L3 4 T5 6 S1 2 3 4 Q1 2 3 4 C1 2 3 4 5 6 Z");
        let arities: Vec<usize> = t.tokens.iter().map(|t| t.operands().len()).collect();
        assert_eq!(arities, vec![2, 1, 1, 2, 2, 4, 4, 6, 0]);
        for token in &t.tokens {
            assert_eq!(token.operands().len(), token.command().arity());
        }
    }

    #[test]
    fn test_typed_operands() {
        let t = tok("Q1 2 3 4 S5 6 7 8 C1 2 3 4 5 6");
        assert_eq!(
            t.tokens[0].op,
            PathOp::QuadraticTo(Point2::new(1.0, 2.0), Point2::new(3.0, 4.0))
        );
        assert_eq!(
            t.tokens[1].op,
            PathOp::SmoothCubicTo(Point2::new(5.0, 6.0), Point2::new(7.0, 8.0))
        );
        assert_eq!(
            t.tokens[2].points(),
            vec![
                Point2::new(1.0, 2.0),
                Point2::new(3.0, 4.0),
                Point2::new(5.0, 6.0)
            ]
        );
    }

    #[test]
    fn test_number_formats() {
        let t = tok("M-1.5e1,+2 L.5.5 L10-5 L1E2 3e-1");
        assert!(t.is_clean());
        assert_eq!(t.tokens[0].op, PathOp::MoveTo(Point2::new(-15.0, 2.0)));
        assert_eq!(t.tokens[1].op, PathOp::LineTo(Point2::new(0.5, 0.5)));
        assert_eq!(t.tokens[2].op, PathOp::LineTo(Point2::new(10.0, -5.0)));
        assert_eq!(t.tokens[3].op, PathOp::LineTo(Point2::new(100.0, 0.3)));
    }

    #[test]
    fn test_whitespace_variants() {
        let t = tok("  M\t0 ,0\n L 1,\r\n1   ");
        assert!(t.is_clean());
        assert_eq!(t.tokens.len(), 2);
        assert_eq!(t.tokens[1].op, PathOp::LineTo(Point2::new(1.0, 1.0)));
    }

    #[test]
    fn test_malformed_group_skipped() {
        let t = tok("M0 0 L1 2 3 L4 5");
        assert_eq!(t.tokens.len(), 2);
        assert_eq!(t.tokens[1].op, PathOp::LineTo(Point2::new(4.0, 5.0)));
        assert_eq!(
            t.diagnostics,
            vec![Diagnostic::MalformedToken {
                command: 'L',
                position: 5,
                operands: 3,
                arity: 2,
            }]
        );
    }

    #[test]
    fn test_missing_operands_reported() {
        let t = tok("M0 0 L Z");
        assert_eq!(t.tokens.len(), 2);
        assert!(matches!(
            t.diagnostics[0],
            Diagnostic::MalformedToken { operands: 0, .. }
        ));
    }

    #[test]
    fn test_invalid_number_skipped() {
        let t = tok("M0 0 L1 # L2 2");
        assert_eq!(t.tokens.len(), 2);
        assert_eq!(
            t.diagnostics,
            vec![Diagnostic::InvalidNumber {
                command: 'L',
                text: "#".to_string(),
                position: 8,
            }]
        );
    }

    #[test]
    fn test_arc_is_unsupported() {
        let t = tok("M0 0 A 5 5 0 0 1 10 10 L 20 20");
        assert_eq!(t.tokens.len(), 2);
        assert_eq!(t.tokens[1].command(), Command::LineTo);
        assert_eq!(
            t.diagnostics,
            vec![Diagnostic::UnsupportedCommand {
                command: 'A',
                position: 5,
            }]
        );
    }

    #[test]
    fn test_unknown_command_is_error() {
        let result = tokenize::<f64>("M0 0 X 1 2");
        assert_eq!(
            result,
            Err(MeshError::UnknownCommand {
                command: 'X',
                position: 5,
            })
        );
    }

    #[test]
    fn test_close_path_operands_ignored() {
        let t = tok("M0 0 L1 1 Z 5");
        assert_eq!(t.tokens.len(), 3);
        assert_eq!(t.tokens[2].op, PathOp::ClosePath);
        assert!(matches!(
            &t.diagnostics[0],
            Diagnostic::IgnoredOperands { text, .. } if text == "5"
        ));
    }

    #[test]
    fn test_leading_numbers_ignored() {
        let t = tok("1 2 M0 0");
        assert_eq!(t.tokens.len(), 1);
        assert!(matches!(
            t.diagnostics[0],
            Diagnostic::IgnoredOperands { position: 0, .. }
        ));
    }

    #[test]
    fn test_empty_input() {
        let t = tok("");
        assert!(t.tokens.is_empty());
        assert!(t.is_clean());

        let t = tok("   \n ");
        assert!(t.tokens.is_empty());
        assert!(t.is_clean());
    }

    #[test]
    fn test_exponent_is_not_a_command() {
        let chars: Vec<(usize, char)> = "1e5".char_indices().collect();
        assert!(!is_command_letter(&chars, 1));

        // A bare "e" after a number with no exponent digits is a letter.
        let chars: Vec<(usize, char)> = "1e".char_indices().collect();
        assert!(is_command_letter(&chars, 1));
    }

    #[test]
    fn test_f32_tokens() {
        let t = tokenize::<f32>("M 0.5 1.5").unwrap();
        assert_eq!(t.tokens[0].op, PathOp::MoveTo(Point2::new(0.5f32, 1.5)));
    }
}
