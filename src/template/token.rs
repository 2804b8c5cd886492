//! # Template Tokenizer
//!
//! Splits a header template into [`Token`]s. The token stream covers the whole
//! template with no gaps, so concatenating every token's `value` yields the
//! original template.

use super::TemplateError;
use crate::fields::FieldKind;

/// Kind of a template token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
  /// A single `\n`.
  Newline,
  /// A backslash escape: `\{`, `\}` or `\\`.
  Escaped,
  /// A `{{NAME}}` placeholder for a known field kind.
  Field(FieldKind),
  /// Any run of plain text.
  Content,
}

/// One lexical unit of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
  pub kind: TokenKind,
  /// Raw template text covered by this token.
  pub value: &'a str,
  /// 1-based line of the first character.
  pub line: usize,
  /// 1-based column of the first character, counted in characters.
  pub column: usize,
}

impl<'a> Token<'a> {
  /// Text this token stands for in a written header.
  ///
  /// Escapes are resolved to the character they protect. Field tokens have no
  /// literal text.
  pub fn literal(&self) -> &'a str {
    match self.kind {
      TokenKind::Newline | TokenKind::Content => self.value,
      TokenKind::Escaped => &self.value[1..],
      TokenKind::Field(_) => "",
    }
  }
}

/// Iterator over the tokens of a template.
///
/// Stops after the first error. Create a new tokenizer to start over.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
  template: &'a str,
  offset: usize,
  line: usize,
  column: usize,
  failed: bool,
}

impl<'a> Tokenizer<'a> {
  pub const fn new(template: &'a str) -> Self {
    Self {
      template,
      offset: 0,
      line: 1,
      column: 1,
      failed: false,
    }
  }

  fn emit(&mut self, kind: TokenKind, len: usize) -> Token<'a> {
    let value = &self.template[self.offset..self.offset + len];
    let token = Token {
      kind,
      value,
      line: self.line,
      column: self.column,
    };

    self.offset += len;
    if kind == TokenKind::Newline {
      self.line += 1;
      self.column = 1;
    } else {
      self.column += value.chars().count();
    }
    token
  }

  const fn invalid(&self, character: char) -> TemplateError {
    TemplateError::InvalidCharacter {
      character,
      line: self.line,
      column: self.column,
    }
  }

  fn field(&mut self, rest: &'a str) -> Result<Token<'a>, TemplateError> {
    let Some(name) = placeholder_name(rest) else {
      return Err(self.invalid('{'));
    };

    match FieldKind::from_name(name) {
      Some(kind) => Ok(self.emit(TokenKind::Field(kind), name.len() + 4)),
      None => Err(TemplateError::UnknownField {
        name: name.to_string(),
        line: self.line,
        column: self.column,
      }),
    }
  }
}

/// Extracts `NAME` from text starting with `{{NAME}}`.
fn placeholder_name(rest: &str) -> Option<&str> {
  let inner = rest.strip_prefix("{{")?;
  let len = inner
    .char_indices()
    .find(|&(i, c)| !(c == '_' || c.is_ascii_alphabetic() || (i > 0 && c.is_ascii_digit())))
    .map_or(inner.len(), |(i, _)| i);

  if len == 0 || !inner[len..].starts_with("}}") {
    return None;
  }
  Some(&inner[..len])
}

const fn is_special(c: char) -> bool {
  matches!(c, '\n' | '\\' | '{' | '}')
}

impl<'a> Iterator for Tokenizer<'a> {
  type Item = Result<Token<'a>, TemplateError>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.failed {
      return None;
    }

    let rest = &self.template[self.offset..];
    let first = rest.chars().next()?;

    let result = match first {
      '\n' => Ok(self.emit(TokenKind::Newline, 1)),
      '\\' => match rest[1..].chars().next() {
        Some('{' | '}' | '\\') => Ok(self.emit(TokenKind::Escaped, 2)),
        _ => Err(self.invalid('\\')),
      },
      '{' => self.field(rest),
      '}' => Err(self.invalid('}')),
      _ => {
        let len = rest.find(is_special).unwrap_or(rest.len());
        Ok(self.emit(TokenKind::Content, len))
      }
    };

    self.failed = result.is_err();
    Some(result)
  }
}

/// Tokenizes a whole template.
///
/// # Errors
///
/// Returns the first [`TemplateError`] found: a bare `{`, `}` or `\`, or a
/// placeholder naming an unknown field kind.
pub fn tokenize(template: &str) -> Result<Vec<Token<'_>>, TemplateError> {
  Tokenizer::new(template).collect()
}
