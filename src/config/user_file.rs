//! Literal-only parser for the user config file.
//!
//! The file looks like a Python module but is never executed. Only
//! assignments of literals are accepted:
//!
//! ```text
//! # broker settings
//! host = "broker.local"
//! port: int = 8883
//! user = 'mqtt'
//! pwd = "s3cr\"et"
//! ca_certs = None
//! ```
//!
//! Docstrings, other bare string statements and `import` lines are skipped.
//! Anything else (calls, names, expressions) is a parse error.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use super::ResolveError;

/// A literal value from the user config file.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Quoted string.
    Str(String),
    /// Integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// `True` / `False`.
    Bool(bool),
    /// `None`.
    None,
}

impl Literal {
    /// Returns the name of this literal's kind, for error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "boolean",
            Self::None => "None",
        }
    }

    /// Returns the string contents if this is a string literal.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Renders the value the way it would be printed by the config's own language
/// (strings unquoted, `True`/`False`/`None` capitalized).
impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{x:.1}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::None => f.write_str("None"),
        }
    }
}

/// Parsed user config file: a flat map of names to literals.
///
/// When a name is assigned more than once, the last assignment wins.
#[derive(Debug, Clone, Default)]
pub struct UserConfig {
    path: PathBuf,
    values: BTreeMap<String, Literal>,
}

impl UserConfig {
    /// Loads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `UserConfigRead` if the file cannot be read, or
    /// `UserConfigParse` on the first line that is not a literal assignment.
    pub fn load(path: &Path) -> Result<Self, ResolveError> {
        let content = std::fs::read_to_string(path).map_err(|e| ResolveError::UserConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content, path)
    }

    /// Parses file content. `path` is only used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns `UserConfigParse` on the first invalid line.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ResolveError> {
        let parse_error = |line: usize, reason: String| ResolveError::UserConfigParse {
            path: path.to_path_buf(),
            line,
            reason,
        };

        let mut values = BTreeMap::new();
        // Closing delimiter of a skipped multi-line statement, and where it opened
        let mut open: Option<(&'static str, usize)> = None;

        for (index, line) in content.lines().enumerate() {
            if let Some((close, _)) = open {
                if line.contains(close) {
                    open = None;
                }
                continue;
            }

            match parse_line(line).map_err(|reason| parse_error(index + 1, reason))? {
                Line::Skip => {}
                Line::Open(close) => open = Some((close, index + 1)),
                Line::Assign(name, literal) => {
                    values.insert(name, literal);
                }
            }
        }

        if let Some((close, line)) = open {
            return Err(parse_error(line, format!("'{close}' is never closed")));
        }

        Ok(Self {
            path: path.to_path_buf(),
            values,
        })
    }

    /// Returns the path this config was read from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the literal assigned to `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Literal> {
        self.values.get(key)
    }

    /// Returns the number of assigned names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the file assigns nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the string assigned to `key`, `None` if absent or `None`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` if the literal is not a string.
    pub fn string(&self, key: &'static str) -> Result<Option<&str>, ResolveError> {
        match self.get(key) {
            None | Some(Literal::None) => Ok(None),
            Some(Literal::Str(s)) => Ok(Some(s)),
            Some(other) => Err(ResolveError::InvalidValue {
                key,
                expected: "string",
                found: format!("{} {other}", other.kind()),
            }),
        }
    }

    /// Returns the string assigned to a required `key`.
    ///
    /// # Errors
    ///
    /// Returns `MissingKey` if absent, `InvalidValue` if not a string.
    pub fn required_string(&self, key: &'static str) -> Result<&str, ResolveError> {
        self.string(key)?.ok_or_else(|| ResolveError::MissingKey {
            path: self.path.clone(),
            key,
        })
    }
}

// Line parsing

type ParseResult<T> = Result<T, String>;

/// What a single line contributes.
#[derive(Debug)]
enum Line {
    /// Blank, comment, docstring or import.
    Skip,
    /// Starts a skipped statement that ends on the line containing the delimiter.
    Open(&'static str),
    /// `name = literal`.
    Assign(String, Literal),
}

fn parse_line(line: &str) -> ParseResult<Line> {
    let mut cursor = Cursor::new(line);
    cursor.skip_whitespace();

    if cursor.at_end_or_comment() {
        return Ok(Line::Skip);
    }

    if let Some(quote) = cursor.triple_quote() {
        return Ok(if cursor.rest().contains(quote) {
            Line::Skip
        } else {
            Line::Open(quote)
        });
    }

    if matches!(cursor.peek(), Some('"' | '\'')) {
        cursor.literal()?;
        cursor.skip_whitespace();
        if !cursor.at_end_or_comment() {
            return Err(format!("unexpected '{}' after string", cursor.rest()));
        }
        return Ok(Line::Skip);
    }

    if is_import(cursor.rest()) {
        let statement = cursor.rest();
        return Ok(if statement.contains('(') && !statement.contains(')') {
            Line::Open(")")
        } else {
            Line::Skip
        });
    }

    let name = cursor.identifier().ok_or("expected a name")?;
    cursor.skip_whitespace();

    // Optional type annotation: `name: int = 1`
    if cursor.eat(':') {
        cursor.skip_whitespace();
        cursor
            .identifier()
            .ok_or("expected a type annotation after ':'")?;
        cursor.skip_whitespace();
    }

    if !cursor.eat('=') {
        return Err(format!("expected '=' after '{name}'"));
    }
    if cursor.peek() == Some('=') {
        return Err("comparisons are not assignments".to_string());
    }
    cursor.skip_whitespace();

    let literal = cursor.literal()?;
    cursor.skip_whitespace();

    if !cursor.at_end_or_comment() {
        return Err(format!(
            "unexpected '{}' after value; only literal values are allowed",
            cursor.rest()
        ));
    }

    Ok(Line::Assign(name.to_string(), literal))
}

/// `import x` or `from x import y`.
fn is_import(statement: &str) -> bool {
    let mut words = statement.split_whitespace();
    match words.next() {
        Some("import") => true,
        Some("from") => words.nth(1) == Some("import"),
        _ => false,
    }
}

/// Character cursor over a single line.
struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consumes an opening `"""` or `'''` and returns it.
    fn triple_quote(&mut self) -> Option<&'static str> {
        let quote = ["\"\"\"", "'''"]
            .into_iter()
            .find(|quote| self.rest().starts_with(quote))?;
        self.pos += quote.len();
        Some(quote)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn at_end_or_comment(&self) -> bool {
        matches!(self.peek(), None | Some('#'))
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
        &self.input[start..self.pos]
    }

    fn identifier(&mut self) -> Option<&'a str> {
        let first = self.peek()?;
        if !(first.is_ascii_alphabetic() || first == '_') {
            return None;
        }
        Some(self.take_while(|c| c.is_ascii_alphanumeric() || c == '_'))
    }

    fn literal(&mut self) -> ParseResult<Literal> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                self.string(quote).map(Literal::Str)
            }
            Some(c) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => self.number(),
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                let word = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
                match word {
                    "True" => Ok(Literal::Bool(true)),
                    "False" => Ok(Literal::Bool(false)),
                    "None" => Ok(Literal::None),
                    other => Err(format!(
                        "'{other}' is not a literal; only strings, numbers, True, False and None are allowed"
                    )),
                }
            }
            Some(c) => Err(format!("'{c}' does not start a literal value")),
            None => Err("missing value after '='".to_string()),
        }
    }

    fn string(&mut self, quote: char) -> ParseResult<String> {
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err("unterminated string".to_string()),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => out.push(self.escape()?),
                Some(c) => out.push(c),
            }
        }
    }

    fn escape(&mut self) -> ParseResult<char> {
        match self.bump() {
            Some('\\') => Ok('\\'),
            Some('\'') => Ok('\''),
            Some('"') => Ok('"'),
            Some('n') => Ok('\n'),
            Some('t') => Ok('\t'),
            Some('r') => Ok('\r'),
            Some('0') => Ok('\0'),
            Some(c) => Err(format!("unsupported escape sequence '\\{c}'")),
            None => Err("unterminated string".to_string()),
        }
    }

    fn number(&mut self) -> ParseResult<Literal> {
        let text = self.take_while(|c| {
            c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | '_' | 'e' | 'E')
        });

        if text.starts_with('_') || text.ends_with('_') || text.contains("__") {
            return Err(format!("invalid number '{text}'"));
        }
        let cleaned = text.replace('_', "");

        if let Ok(i) = cleaned.parse::<i64>() {
            return Ok(Literal::Int(i));
        }
        cleaned
            .parse::<f64>()
            .map(Literal::Float)
            .map_err(|_| format!("invalid number '{text}'"))
    }
}
