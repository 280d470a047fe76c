//! Parser for the textual automaton format of the CLI front-end.
//!
//! A file declares one automaton:
//!
//! ```text
//! Ops a:2 b:2 c:2
//! Independence (a b) (c d)
//! Automaton mine
//! States q0 q1 q2
//! Final States q2
//! Transitions
//! init -> q0
//! a(q0) -> q1
//! b(q1) -> q2
//! ```
//!
//! `Ops` declares the alphabet as `name:arity` pairs (the arity is parsed and
//! otherwise ignored). The optional `Independence` line lists independent
//! symbol pairs. Transitions are either `init -> q`, marking `q` initial, or
//! `sym(p) -> q`, an edge from `p` to `q` on `sym`. Symbol names must be
//! alphanumeric and `init` is reserved. Both automata of a query are parsed
//! against one shared [`SymbolTable`] so their symbols agree.

use crate::automaton::{ExplicitAutomaton, SymbolTable};
use thiserror::Error;

/// Line-annotated parse failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A section header was missing or out of order.
    #[error("line {line}: expected `{expected}` section")]
    ExpectedSection {
        /// Line where the section was expected.
        line: usize,
        /// Keyword of the expected section.
        expected: &'static str,
    },

    /// The input ended before all sections were seen.
    #[error("unexpected end of input: missing `{expected}` section")]
    UnexpectedEof {
        /// Keyword of the missing section.
        expected: &'static str,
    },

    /// A symbol declaration was not of the form `name:arity`.
    #[error("line {line}: malformed symbol declaration `{declaration}`")]
    MalformedSymbol {
        /// Offending line.
        line: usize,
        /// The declaration as written.
        declaration: String,
    },

    /// A symbol name contained non-alphanumeric characters.
    #[error("line {line}: symbol name `{name}` is not alphanumeric")]
    InvalidSymbolName {
        /// Offending line.
        line: usize,
        /// The rejected name.
        name: String,
    },

    /// A symbol was named `init`, which is reserved for initial-state
    /// transitions.
    #[error("line {line}: `init` is reserved and cannot be declared as a symbol")]
    ReservedSymbol {
        /// Offending line.
        line: usize,
    },

    /// An independence pair was not of the form `(a b)`.
    #[error("line {line}: malformed independence pair `{pair}`")]
    MalformedIndependence {
        /// Offending line.
        line: usize,
        /// The pair as written.
        pair: String,
    },

    /// A state was declared twice.
    #[error("line {line}: duplicate state `{name}`")]
    DuplicateState {
        /// Offending line.
        line: usize,
        /// The duplicated name.
        name: String,
    },

    /// A transition or final-state list referenced an undeclared state.
    #[error("line {line}: unknown state `{name}`")]
    UnknownState {
        /// Offending line.
        line: usize,
        /// The unknown name.
        name: String,
    },

    /// A transition or independence pair referenced an undeclared symbol.
    #[error("line {line}: unknown symbol `{name}`")]
    UnknownSymbol {
        /// Offending line.
        line: usize,
        /// The unknown name.
        name: String,
    },

    /// A transition line matched neither `init -> q` nor `sym(p) -> q`.
    #[error("line {line}: malformed transition `{text}`")]
    MalformedTransition {
        /// Offending line.
        line: usize,
        /// The line as written.
        text: String,
    },
}

/// Parse one automaton file against a shared symbol table.
pub fn parse_automaton(
    input: &str,
    table: &mut SymbolTable,
) -> Result<ExplicitAutomaton, ParseError> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .peekable();

    // Ops
    let (line, rest) = expect_section(&mut lines, "Ops")?;
    for declaration in rest.split_whitespace() {
        let (name, arity) = declaration
            .split_once(':')
            .ok_or_else(|| ParseError::MalformedSymbol {
                line,
                declaration: declaration.to_owned(),
            })?;
        if arity.parse::<u32>().is_err() {
            return Err(ParseError::MalformedSymbol {
                line,
                declaration: declaration.to_owned(),
            });
        }
        check_symbol_name(line, name)?;
        table.intern(name);
    }

    // Independence (optional)
    if let Some(&(line, text)) = lines.peek() {
        if let Some(rest) = strip_keyword(text, "Independence") {
            parse_independence(line, rest, table)?;
            lines.next();
        }
    }

    // Automaton
    let (_, name) = expect_section(&mut lines, "Automaton")?;
    let mut automaton = ExplicitAutomaton::new(name.trim());

    // States
    let (line, rest) = expect_section(&mut lines, "States")?;
    for state in rest.split_whitespace() {
        if automaton.state_id(state).is_some() {
            return Err(ParseError::DuplicateState {
                line,
                name: state.to_owned(),
            });
        }
        automaton.add_state(state);
    }

    // Final States
    let (line, rest) = expect_section(&mut lines, "Final States")?;
    for state in rest.split_whitespace() {
        let id = automaton
            .state_id(state)
            .ok_or_else(|| ParseError::UnknownState {
                line,
                name: state.to_owned(),
            })?;
        automaton.mark_final(id);
    }

    // Transitions
    expect_section(&mut lines, "Transitions")?;
    for (line, text) in lines {
        parse_transition(line, text, table, &mut automaton)?;
    }

    Ok(automaton)
}

fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim_start())
    } else {
        None
    }
}

fn expect_section<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    keyword: &'static str,
) -> Result<(usize, &'a str), ParseError> {
    let (line, text) = lines
        .next()
        .ok_or(ParseError::UnexpectedEof { expected: keyword })?;
    match strip_keyword(text, keyword) {
        Some(rest) => Ok((line, rest)),
        None => Err(ParseError::ExpectedSection {
            line,
            expected: keyword,
        }),
    }
}

fn check_symbol_name(line: usize, name: &str) -> Result<(), ParseError> {
    if name == "init" {
        return Err(ParseError::ReservedSymbol { line });
    }
    if name.is_empty() || !name.chars().all(char::is_alphanumeric) {
        return Err(ParseError::InvalidSymbolName {
            line,
            name: name.to_owned(),
        });
    }
    Ok(())
}

fn parse_independence(
    line: usize,
    rest: &str,
    table: &mut SymbolTable,
) -> Result<(), ParseError> {
    let mut remaining = rest.trim();
    while !remaining.is_empty() {
        let open = remaining
            .strip_prefix('(')
            .ok_or_else(|| ParseError::MalformedIndependence {
                line,
                pair: remaining.to_owned(),
            })?;
        let (body, tail) =
            open.split_once(')')
                .ok_or_else(|| ParseError::MalformedIndependence {
                    line,
                    pair: remaining.to_owned(),
                })?;
        let names: Vec<&str> = body.split_whitespace().collect();
        let [first, second] = names[..] else {
            return Err(ParseError::MalformedIndependence {
                line,
                pair: format!("({body})"),
            });
        };
        let a = table.find(first).ok_or_else(|| ParseError::UnknownSymbol {
            line,
            name: first.to_owned(),
        })?;
        let b = table.find(second).ok_or_else(|| ParseError::UnknownSymbol {
            line,
            name: second.to_owned(),
        })?;
        table.add_independence(a, b);
        remaining = tail.trim_start();
    }
    Ok(())
}

fn parse_transition(
    line: usize,
    text: &str,
    table: &SymbolTable,
    automaton: &mut ExplicitAutomaton,
) -> Result<(), ParseError> {
    let malformed = || ParseError::MalformedTransition {
        line,
        text: text.to_owned(),
    };

    let (lhs, target) = text.split_once("->").ok_or_else(malformed)?;
    let lhs = lhs.trim();
    let target = target.trim();
    if target.is_empty() || target.contains(char::is_whitespace) {
        return Err(malformed());
    }
    let target_id = automaton
        .state_id(target)
        .ok_or_else(|| ParseError::UnknownState {
            line,
            name: target.to_owned(),
        })?;

    if lhs == "init" {
        automaton.mark_initial(target_id);
        return Ok(());
    }

    let (symbol, rest) = lhs.split_once('(').ok_or_else(malformed)?;
    let source = rest.strip_suffix(')').ok_or_else(malformed)?.trim();
    let symbol = symbol.trim();
    let symbol_id = table.find(symbol).ok_or_else(|| ParseError::UnknownSymbol {
        line,
        name: symbol.to_owned(),
    })?;
    let source_id = automaton
        .state_id(source)
        .ok_or_else(|| ParseError::UnknownState {
            line,
            name: source.to_owned(),
        })?;
    automaton.add_transition(source_id, symbol_id, target_id);
    Ok(())
}
