//! Minimal path-data reader: `M/m`, `L/l`, `C/c`, `Z/z`.
//!
//! The reader is lenient: it stops at the first thing it does not understand and hands back
//! everything it already accumulated, together with a [`ParseStop`] describing where and why.

use std::fmt;

use kurbo::{CubicBez, ParamCurve, PathEl, Point};

use crate::{
    foundation::config::SourceOptions,
    foundation::core::Contour,
    foundation::error::{LucyError, LucyResult},
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum TokenKind {
    Command(char),
    Number(f64),
    /// A well-formed number whose value does not fit in a finite `f64`.
    OutOfRange,
    Invalid(char),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Token {
    kind: TokenKind,
    offset: usize,
}

/// Why the reader stopped before the end of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A letter that is not one of the supported commands.
    UnknownCommand(char),
    /// A command without (enough) numeric operands.
    MissingOperands(char),
    /// Numbers with no command in effect (e.g. right after `Z`).
    OrphanNumber,
    /// A character that cannot start a command or a number.
    InvalidCharacter(char),
    /// A number too large to be represented as a finite `f64`.
    NumberOutOfRange,
}

/// Early-termination signal of [`parse_path_data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseStop {
    /// Byte offset of the offending token.
    pub offset: usize,
    /// What went wrong there.
    pub reason: StopReason,
}

impl fmt::Display for ParseStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            StopReason::UnknownCommand(c) => {
                write!(f, "unsupported path command '{c}' at byte {}", self.offset)
            }
            StopReason::MissingOperands(c) => {
                write!(f, "missing operands for '{c}' at byte {}", self.offset)
            }
            StopReason::OrphanNumber => {
                write!(f, "number without a command at byte {}", self.offset)
            }
            StopReason::InvalidCharacter(c) => {
                write!(f, "invalid character '{c}' at byte {}", self.offset)
            }
            StopReason::NumberOutOfRange => {
                write!(f, "number out of range at byte {}", self.offset)
            }
        }
    }
}

/// Result of reading one path's command stream.
#[derive(Debug, Clone, PartialEq)]
pub struct PathParse {
    /// Sampled points, in command order.
    pub contour: Contour,
    /// Absolute path elements the contour was sampled from.
    pub elements: Vec<PathEl>,
    /// Set when the reader gave up before the end of the input.
    pub stop: Option<ParseStop>,
}

fn lex(input: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let bytes = input.as_bytes();
    let mut i = 0usize;

    while i < bytes.len() {
        let c = bytes[i] as char;
        if c.is_ascii_whitespace() || c == ',' {
            i += 1;
            continue;
        }

        let start = i;
        if c.is_ascii_alphabetic() {
            out.push(Token {
                kind: TokenKind::Command(c),
                offset: start,
            });
            i += 1;
            continue;
        }

        if c.is_ascii_digit() || matches!(c, '+' | '-' | '.') {
            match scan_number(bytes, i) {
                Some(end) => {
                    // The scanned slice is ASCII digits, sign, '.', and exponent only.
                    match input[start..end].parse::<f64>() {
                        Ok(v) if v.is_finite() => out.push(Token {
                            kind: TokenKind::Number(v),
                            offset: start,
                        }),
                        Ok(_) => {
                            out.push(Token {
                                kind: TokenKind::OutOfRange,
                                offset: start,
                            });
                            return out;
                        }
                        Err(_) => {
                            out.push(Token {
                                kind: TokenKind::Invalid(c),
                                offset: start,
                            });
                            return out;
                        }
                    }
                    i = end;
                    continue;
                }
                None => {
                    out.push(Token {
                        kind: TokenKind::Invalid(c),
                        offset: start,
                    });
                    return out;
                }
            }
        }

        let ch = input[start..].chars().next().unwrap_or(c);
        out.push(Token {
            kind: TokenKind::Invalid(ch),
            offset: start,
        });
        return out;
    }
    out
}

/// Scan `[+-]?(digits[.digits?]|.digits)([eE][+-]?digits)?` and return the end offset.
fn scan_number(bytes: &[u8], mut i: usize) -> Option<usize> {
    let digit = |b: Option<&u8>| b.is_some_and(|b| b.is_ascii_digit());

    if matches!(bytes.get(i), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_start = i;
    while digit(bytes.get(i)) {
        i += 1;
    }
    let mut has_digits = i > int_start;
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        let frac_start = i;
        while digit(bytes.get(i)) {
            i += 1;
        }
        has_digits |= i > frac_start;
    }
    if !has_digits {
        return None;
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_start = j;
        while digit(bytes.get(j)) {
            j += 1;
        }
        // A bare 'e' is left for the command scanner.
        if j > exp_start {
            i = j;
        }
    }
    Some(i)
}

struct Reader {
    tokens: Vec<Token>,
    pos: usize,
}

impl Reader {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn numbers<const N: usize>(&mut self) -> Option<[f64; N]> {
        let mut out = [0.0; N];
        for (k, slot) in out.iter_mut().enumerate() {
            match self.tokens.get(self.pos + k) {
                Some(Token {
                    kind: TokenKind::Number(v),
                    ..
                }) => *slot = *v,
                _ => return None,
            }
        }
        self.pos += N;
        Some(out)
    }

    /// First token at or after the cursor that is not a number.
    fn first_non_number(&self) -> Option<Token> {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .find(|t| !matches!(t.kind, TokenKind::Number(_)))
            .copied()
    }

    fn at_number(&self) -> bool {
        matches!(
            self.peek(),
            Some(Token {
                kind: TokenKind::Number(_),
                ..
            })
        )
    }
}

/// Read a path command stream into absolute path elements.
///
/// Pairs after a move-to are implicit line-tos of the same relativity. Repeated cubic
/// sextuples chain, each relative one being relative to the end of the previous curve.
/// After a close-path the current point returns to the subpath start, and a new explicit
/// command is required.
pub fn parse_path_elements(d: &str) -> (Vec<PathEl>, Option<ParseStop>) {
    let mut reader = Reader {
        tokens: lex(d),
        pos: 0,
    };
    let mut els = Vec::new();
    let mut current = Point::ZERO;
    let mut start = Point::ZERO;

    let stop = loop {
        let Some(tok) = reader.peek() else {
            break None;
        };
        reader.pos += 1;

        let cmd = match tok.kind {
            TokenKind::Command(c) => c,
            TokenKind::Number(_) => {
                break Some(ParseStop {
                    offset: tok.offset,
                    reason: StopReason::OrphanNumber,
                });
            }
            TokenKind::OutOfRange => {
                break Some(ParseStop {
                    offset: tok.offset,
                    reason: StopReason::NumberOutOfRange,
                });
            }
            TokenKind::Invalid(c) => {
                break Some(ParseStop {
                    offset: tok.offset,
                    reason: StopReason::InvalidCharacter(c),
                });
            }
        };

        let relative = cmd.is_ascii_lowercase();
        let rel = |p: Point, base: Point| {
            if relative {
                Point::new(base.x + p.x, base.y + p.y)
            } else {
                p
            }
        };
        let missing = |reader: &Reader| match reader.first_non_number() {
            Some(Token {
                kind: TokenKind::OutOfRange,
                offset,
            }) => ParseStop {
                offset,
                reason: StopReason::NumberOutOfRange,
            },
            _ => ParseStop {
                offset: reader.peek().map_or(d.len(), |t| t.offset),
                reason: StopReason::MissingOperands(cmd),
            },
        };

        match cmd.to_ascii_uppercase() {
            'M' => {
                let Some([x, y]) = reader.numbers::<2>() else {
                    break Some(missing(&reader));
                };
                current = rel(Point::new(x, y), current);
                start = current;
                els.push(PathEl::MoveTo(current));
                while reader.at_number() {
                    let Some([x, y]) = reader.numbers::<2>() else {
                        break;
                    };
                    current = rel(Point::new(x, y), current);
                    els.push(PathEl::LineTo(current));
                }
            }
            'L' => {
                if !reader.at_number() {
                    break Some(missing(&reader));
                }
                while reader.at_number() {
                    let Some([x, y]) = reader.numbers::<2>() else {
                        break;
                    };
                    current = rel(Point::new(x, y), current);
                    els.push(PathEl::LineTo(current));
                }
            }
            'C' => {
                if !reader.at_number() {
                    break Some(missing(&reader));
                }
                while reader.at_number() {
                    let Some([x1, y1, x2, y2, x3, y3]) = reader.numbers::<6>() else {
                        break;
                    };
                    let p1 = rel(Point::new(x1, y1), current);
                    let p2 = rel(Point::new(x2, y2), current);
                    let p3 = rel(Point::new(x3, y3), current);
                    els.push(PathEl::CurveTo(p1, p2, p3));
                    current = p3;
                }
            }
            'Z' => {
                els.push(PathEl::ClosePath);
                current = start;
                continue;
            }
            _ => {
                break Some(ParseStop {
                    offset: tok.offset,
                    reason: StopReason::UnknownCommand(cmd),
                });
            }
        }

        // A trailing partial operand group.
        if reader.at_number() {
            break Some(missing(&reader));
        }
    };

    (els, stop)
}

/// Flatten absolute path elements into a contour.
///
/// Move and line elements contribute their end point; each cubic contributes
/// `bezier_samples` points at `t = 1/n, 2/n, ..., 1` (quadratics are raised to cubics first);
/// close-path appends the subpath start when `close_duplicates_start` is set.
pub fn sample_path_elements<I>(els: I, opts: &SourceOptions) -> Contour
where
    I: IntoIterator<Item = PathEl>,
{
    let samples = opts.bezier_samples.max(1);
    let mut contour = Contour::default();
    let mut current = Point::ZERO;
    let mut start = Point::ZERO;

    let push_cubic = |contour: &mut Contour, cubic: CubicBez| {
        for i in 1..=samples {
            let t = i as f64 / samples as f64;
            contour.push(cubic.eval(t));
        }
    };

    for el in els {
        match el {
            PathEl::MoveTo(p) => {
                contour.push(p);
                current = p;
                start = p;
            }
            PathEl::LineTo(p) => {
                contour.push(p);
                current = p;
            }
            PathEl::QuadTo(p1, p2) => {
                push_cubic(&mut contour, kurbo::QuadBez::new(current, p1, p2).raise());
                current = p2;
            }
            PathEl::CurveTo(p1, p2, p3) => {
                push_cubic(&mut contour, CubicBez::new(current, p1, p2, p3));
                current = p3;
            }
            PathEl::ClosePath => {
                if opts.close_duplicates_start && !contour.is_empty() {
                    contour.push(start);
                }
                current = start;
            }
        }
    }
    contour
}

/// Read and flatten a path command string, keeping whatever was read before an early stop.
pub fn parse_path_data(d: &str, opts: &SourceOptions) -> PathParse {
    let (elements, stop) = parse_path_elements(d);
    if let Some(stop) = &stop {
        tracing::warn!(%stop, kept = elements.len(), "path data parsing stopped early");
    }
    let contour = sample_path_elements(elements.iter().copied(), opts);
    PathParse {
        contour,
        elements,
        stop,
    }
}

/// Strict variant of [`parse_path_data`].
///
/// Fewer than two points, or any coordinate that overflowed to a non-finite value, is a
/// [`LucyError::Source`].
pub fn contour_from_path_data(d: &str, opts: &SourceOptions) -> LucyResult<Contour> {
    let parsed = parse_path_data(d, opts);
    if !parsed.contour.is_finite() {
        return Err(LucyError::source(
            "path data produced non-finite coordinates",
        ));
    }
    if parsed.contour.len() < 2 {
        let why = parsed
            .stop
            .map(|s| format!(" ({s})"))
            .unwrap_or_default();
        return Err(LucyError::source(format!(
            "path data yielded {} point(s), need at least 2{why}",
            parsed.contour.len()
        )));
    }
    Ok(parsed.contour)
}

#[cfg(test)]
#[path = "../../tests/unit/source/path.rs"]
mod tests;
