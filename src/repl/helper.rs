//! Rustyline helper integration
//!
//! Completion over the built-in vocabulary and user definitions, history
//! hints, light highlighting, and a validator that keeps reading while
//! parentheses are unbalanced.

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Context, Helper};
use std::borrow::Cow;

use crate::backend::eval::{builtin, SPECIAL_FORMS};
use crate::sexpr::{Lexer, Token};

const CONSTANTS: &[&str] = &["pi", "e", "I", "-I"];

/// Kernel commands understood by the REPL itself
const COMMANDS: &[&str] = &["%start", "%stop", "%reset", "%exit"];

const HISTORY_HINTS: usize = 100;

/// Whether a buffer holds a whole program yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completeness {
    Complete,
    /// `depth` parentheses are still open
    Incomplete { depth: usize },
    Invalid { reason: String },
}

/// Paren balance of `input`, ignoring string literals and `;` comments.
pub fn check_completeness(input: &str) -> Completeness {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut in_comment = false;

    for c in input.chars() {
        if in_comment {
            in_comment = c != '\n';
            continue;
        }
        if in_string {
            in_string = c != '"';
            continue;
        }
        match c {
            ';' => in_comment = true,
            '"' => in_string = true,
            '(' => depth += 1,
            ')' => {
                if depth == 0 {
                    return Completeness::Invalid {
                        reason: "unexpected ')'".to_string(),
                    };
                }
                depth -= 1;
            }
            _ => {}
        }
    }

    if depth > 0 || in_string {
        Completeness::Incomplete { depth }
    } else {
        Completeness::Complete
    }
}

/// Plotscript REPL helper
pub struct PlotscriptHelper {
    command_history: Vec<String>,
    defined_names: Vec<String>,
}

impl PlotscriptHelper {
    pub fn new() -> Self {
        Self {
            command_history: Vec::new(),
            defined_names: Vec::new(),
        }
    }

    /// Add command to history for hints
    pub fn add_to_history(&mut self, cmd: String) {
        if self.command_history.len() >= HISTORY_HINTS {
            self.command_history.remove(0);
        }
        self.command_history.push(cmd);
    }

    /// Record every `(define name ...)` in `program` for completion.
    ///
    /// The environment lives on the kernel worker, so names are picked up
    /// from the text the user sends instead.
    pub fn note_definitions(&mut self, program: &str) {
        let tokens = Lexer::new(program).tokenize();
        for window in tokens.windows(3) {
            if let [Token::LParen, Token::Atom(form), Token::Atom(name)] = window {
                if form == "define" && !self.defined_names.contains(name) {
                    self.defined_names.push(name.clone());
                }
            }
        }
        self.defined_names.sort();
    }

    pub fn defined_names(&self) -> &[String] {
        &self.defined_names
    }

    fn all_completions(&self) -> Vec<&str> {
        let mut candidates: Vec<&str> = builtin::names()
            .chain(SPECIAL_FORMS.iter().copied())
            .chain(CONSTANTS.iter().copied())
            .chain(COMMANDS.iter().copied())
            .collect();
        candidates.extend(self.defined_names.iter().map(String::as_str));
        candidates
    }
}

impl Default for PlotscriptHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Completer for PlotscriptHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_before_cursor = &line[..pos];

        let word_start = line_before_cursor
            .rfind(|c: char| c.is_whitespace() || c == '(' || c == ')')
            .map(|i| i + 1)
            .unwrap_or(0);

        let partial = &line_before_cursor[word_start..];
        if partial.is_empty() {
            return Ok((pos, vec![]));
        }

        let mut matches: Vec<Pair> = self
            .all_completions()
            .into_iter()
            .filter(|comp| comp.starts_with(partial))
            .map(|comp| Pair {
                display: comp.to_string(),
                replacement: comp.to_string(),
            })
            .collect();

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches.dedup_by(|a, b| a.display == b.display);

        Ok((word_start, matches))
    }
}

impl Hinter for PlotscriptHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() || line.is_empty() {
            return None;
        }

        self.command_history
            .iter()
            .rev()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

/// Strings in green, comments in grey.
fn colorize(line: &str) -> String {
    let mut out = String::with_capacity(line.len() + 16);
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                out.push_str("\x1b[32m\"");
                for s in chars.by_ref() {
                    out.push(s);
                    if s == '"' {
                        break;
                    }
                }
                out.push_str("\x1b[0m");
            }
            ';' => {
                out.push_str("\x1b[90m;");
                out.extend(chars.by_ref());
                out.push_str("\x1b[0m");
            }
            _ => out.push(c),
        }
    }
    out
}

impl Highlighter for PlotscriptHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.contains(['"', ';']) {
            Cow::Owned(colorize(line))
        } else {
            Cow::Borrowed(line)
        }
    }

    fn highlight_char(&self, line: &str, _pos: usize, _forced: bool) -> bool {
        line.contains(['"', ';'])
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[90m{}\x1b[0m", hint))
    }
}

impl Validator for PlotscriptHelper {
    fn validate(&self, ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        match check_completeness(ctx.input()) {
            Completeness::Complete => Ok(ValidationResult::Valid(None)),
            Completeness::Incomplete { .. } => Ok(ValidationResult::Incomplete),
            // Let the kernel report the parse failure
            Completeness::Invalid { .. } => Ok(ValidationResult::Valid(None)),
        }
    }
}

impl Helper for PlotscriptHelper {}
