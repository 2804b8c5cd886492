//! # Template Module
//!
//! Header templates and the mini-language they are written in.
//!
//! A template is the literal text of a header with typed placeholders:
//!
//! - `{{YEARS}}`, `{{DATE}}`, `{{CREATED}}` insert a field (see
//!   [`crate::fields`])
//! - `\{`, `\}` and `\\` insert a literal brace or backslash
//! - any other `{`, `}` or `\` is an error
//!
//! A [`HeaderTemplate`] is compiled once from the template text. It can then
//! both recognise a header already written into a file ([`HeaderTemplate::parse`])
//! and write a header for a set of field values ([`HeaderTemplate::render`]).
//! Rendering and parsing round-trip: parsing a rendered header gives back the
//! values it was rendered from.
//!
//! ## Example
//!
//! ```rust
//! use conhead::fields::{FieldValue, Years};
//! use conhead::template::HeaderTemplate;
//!
//! # fn main() -> anyhow::Result<()> {
//! let template = HeaderTemplate::compile("// Copyright {{YEARS}} Acme\n")?;
//!
//! let header = template.render(&[FieldValue::Years(Years::new(2014, 2019))])?;
//! assert_eq!(header, "// Copyright 2014-2019 Acme\n");
//!
//! let parsed = template.parse("// Copyright 2014 Acme\nfn main() {}\n")?.expect("has header");
//! assert_eq!(parsed.fields, vec![FieldValue::Years(Years::single(2014))]);
//! assert_eq!(parsed.header, "// Copyright 2014 Acme\n");
//! # Ok(())
//! # }
//! ```

mod parser;
mod token;

use std::fmt;

pub use parser::{HeaderParser, ParsedHeader, make_header_parser};
pub use token::{Token, TokenKind, Tokenizer, tokenize};

use crate::fields::{FieldError, FieldKind, FieldValue};

/// A template that cannot be compiled.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TemplateError {
  /// A `{`, `}` or `\` that is neither an escape nor part of a placeholder.
  #[error("Invalid character {character:?} found at {line}:{column}")]
  InvalidCharacter { character: char, line: usize, column: usize },

  /// A placeholder naming a field kind that does not exist.
  #[error("Unknown field type '{name}' at {line}:{column}")]
  UnknownField { name: String, line: usize, column: usize },

  /// The header pattern is rejected by the regex engine, e.g. for size.
  #[error("Cannot compile header pattern: {0}")]
  Pattern(#[from] regex::Error),
}

/// A header that cannot be rendered from the values supplied.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
  #[error("template has {expected} fields but {found} values were supplied")]
  FieldCount { expected: usize, found: usize },

  #[error("field {index} is {kind} but was given '{value}'")]
  KindMismatch {
    index: usize,
    kind: FieldKind,
    value: FieldValue,
  },

  #[error(transparent)]
  Template(#[from] TemplateError),

  #[error("failed to write header")]
  Write(#[from] fmt::Error),
}

/// Renderable piece of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
  /// Text written verbatim, escapes already resolved.
  Literal(String),
  Field(FieldKind),
}

/// Tokenizes a template into segments, merging adjacent literal text.
pub(crate) fn segments(template: &str) -> Result<Vec<Segment>, TemplateError> {
  let mut segments = Vec::new();
  for token in Tokenizer::new(template) {
    let token = token?;
    match (token.kind, segments.last_mut()) {
      (TokenKind::Field(kind), _) => segments.push(Segment::Field(kind)),
      (_, Some(Segment::Literal(text))) => text.push_str(token.literal()),
      _ => segments.push(Segment::Literal(token.literal().to_string())),
    }
  }
  Ok(segments)
}

const fn accepts(kind: FieldKind, value: &FieldValue) -> bool {
  matches!(
    (kind, value),
    (FieldKind::Years, FieldValue::Years(_)) | (FieldKind::Date | FieldKind::Created, FieldValue::Date(_))
  )
}

/// A compiled header template.
///
/// Holds the template text, its header parser and its rendering plan. All
/// three are fixed at compile time.
#[derive(Debug, Clone)]
pub struct HeaderTemplate {
  source: String,
  segments: Vec<Segment>,
  parser: HeaderParser,
}

impl HeaderTemplate {
  /// Compiles template text.
  ///
  /// # Errors
  ///
  /// Returns a [`TemplateError`] for a bare control character or an unknown
  /// field name, with its 1-based line and column.
  pub fn compile(source: impl Into<String>) -> Result<Self, TemplateError> {
    let source = source.into();
    let segments = segments(&source)?;
    let parser = HeaderParser::from_segments(&segments)?;
    Ok(Self {
      source,
      segments,
      parser,
    })
  }

  /// The template text this was compiled from.
  pub fn source(&self) -> &str {
    &self.source
  }

  pub const fn parser(&self) -> &HeaderParser {
    &self.parser
  }

  /// Field kinds in template order.
  pub fn fields(&self) -> &[FieldKind] {
    self.parser.fields()
  }

  /// Parses the header at the start of `content`. See
  /// [`HeaderParser::parse_fields`].
  pub fn parse(&self, content: &str) -> Result<Option<ParsedHeader>, FieldError> {
    self.parser.parse_fields(content)
  }

  /// Writes the header for `values` into `out`.
  ///
  /// `values` must hold exactly one value per field, in template order.
  pub fn write_header<W: fmt::Write>(&self, values: &[FieldValue], out: &mut W) -> Result<(), RenderError> {
    let kinds = self.fields();
    if kinds.len() != values.len() {
      return Err(RenderError::FieldCount {
        expected: kinds.len(),
        found: values.len(),
      });
    }
    if let Some((index, (&kind, &value))) = kinds
      .iter()
      .zip(values)
      .enumerate()
      .find(|(_, (kind, value))| !accepts(**kind, value))
    {
      return Err(RenderError::KindMismatch { index, kind, value });
    }

    let mut values = values.iter();
    for segment in &self.segments {
      match segment {
        Segment::Literal(text) => out.write_str(text)?,
        Segment::Field(_) => {
          if let Some(value) = values.next() {
            write!(out, "{value}")?;
          }
        }
      }
    }
    Ok(())
  }

  /// Renders the header for `values`.
  pub fn render(&self, values: &[FieldValue]) -> Result<String, RenderError> {
    let mut header = String::with_capacity(self.source.len());
    self.write_header(values, &mut header)?;
    Ok(header)
  }
}

/// Compiles `template` and renders it with `values`.
pub fn render(template: &str, values: &[FieldValue]) -> Result<String, RenderError> {
  HeaderTemplate::compile(template)?.render(values)
}
