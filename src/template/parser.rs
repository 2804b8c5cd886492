//! # Header Parser
//!
//! Compiles a template into a [`HeaderParser`]: one regular expression that
//! matches a written header at the very start of a file, with a capture group
//! per field placeholder, plus the kinds of those fields in template order.

use regex::Regex;

use super::{Segment, TemplateError, segments};
use crate::fields::{FieldError, FieldKind, FieldValue};

/// Values recovered from a header already written into a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHeader {
  /// Field values in template order.
  pub fields: Vec<FieldValue>,
  /// Exact text of the header as found at the start of the file.
  pub header: String,
}

/// Matches existing headers written from a template and extracts their fields.
#[derive(Debug, Clone)]
pub struct HeaderParser {
  fields: Vec<FieldKind>,
  regex: Regex,
}

impl HeaderParser {
  pub(super) fn from_segments(segments: &[Segment]) -> Result<Self, TemplateError> {
    let mut pattern = String::from("^");
    let mut fields = Vec::new();

    for segment in segments {
      match segment {
        Segment::Literal(text) => pattern.push_str(&regex::escape(text)),
        Segment::Field(kind) => {
          pattern.push('(');
          pattern.push_str(kind.pattern());
          pattern.push(')');
          fields.push(*kind);
        }
      }
    }

    let regex = Regex::new(&pattern)?;
    Ok(Self { fields, regex })
  }

  /// Field kinds, one per capture group, in template order.
  pub fn fields(&self) -> &[FieldKind] {
    &self.fields
  }

  /// The compiled header pattern.
  pub const fn regex(&self) -> &Regex {
    &self.regex
  }

  /// Parses the header at the start of `content`.
  ///
  /// Content following the header is ignored.
  ///
  /// # Returns
  ///
  /// `Ok(None)` when `content` does not start with a header written from this
  /// template.
  ///
  /// # Errors
  ///
  /// Returns a [`FieldError`] when a field's text has the right shape but is
  /// not a valid value, such as the date `2019-13-45`.
  pub fn parse_fields(&self, content: &str) -> Result<Option<ParsedHeader>, FieldError> {
    let Some(caps) = self.regex.captures(content) else {
      return Ok(None);
    };

    let fields = self
      .fields
      .iter()
      .enumerate()
      .map(|(index, kind)| kind.parse(caps.get(index + 1).map_or("", |m| m.as_str())))
      .collect::<Result<Vec<_>, _>>()?;
    let header = caps.get(0).map_or("", |m| m.as_str()).to_string();

    Ok(Some(ParsedHeader { fields, header }))
  }
}

/// Builds a [`HeaderParser`] straight from template text.
///
/// # Errors
///
/// Returns a [`TemplateError`] if the template does not tokenize.
pub fn make_header_parser(template: &str) -> Result<HeaderParser, TemplateError> {
  HeaderParser::from_segments(&segments(template)?)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fields::Years;

  fn years(start: i32, end: i32) -> FieldValue {
    FieldValue::Years(Years::new(start, end))
  }

  #[test]
  fn test_empty() {
    let parser = make_header_parser("").expect("compiles");
    assert!(parser.fields().is_empty());
    assert_eq!(parser.regex().as_str(), "^");
  }

  #[test]
  fn test_static_content() {
    let parser = make_header_parser("template line 1\ntemplate line 2").expect("compiles");
    assert!(parser.fields().is_empty());
    assert_eq!(
      parser.regex().as_str(),
      format!("^{}", regex::escape("template line 1\ntemplate line 2"))
    );
  }

  #[test]
  fn test_pattern_shape() {
    let parser = make_header_parser("test {{YEARS}} test").expect("compiles");
    assert_eq!(parser.regex().as_str(), "^test ([0-9]{4}(?:-[0-9]{4})?) test");
    assert_eq!(parser.fields(), &[FieldKind::Years]);
    assert_eq!(parser.regex().captures_len(), parser.fields().len() + 1);
  }

  #[test]
  fn test_years() {
    let parser = make_header_parser("line 1 {{YEARS}}.\nline 2 {{YEARS}}.").expect("compiles");
    assert_eq!(parser.fields(), &[FieldKind::Years, FieldKind::Years]);

    let caps = parser
      .regex()
      .captures("line 1 2014.\nline 2 2014-2018.")
      .expect("matches");
    assert_eq!(&caps[1], "2014");
    assert_eq!(&caps[2], "2014-2018");
  }

  #[test]
  fn test_regex_special_characters_are_literal() {
    let parser = make_header_parser("/* (c) {{YEARS}} a.b+c*d? [x] $y ^z | */").expect("compiles");
    assert!(parser.regex().is_match("/* (c) 2019 a.b+c*d? [x] $y ^z | */"));
    assert!(!parser.regex().is_match("/* c 2019 aXb+c*d? [x] $y ^z | */"));
  }

  #[test]
  fn test_escaping() {
    let parser = make_header_parser("line 1 \\{.\n line 2 \\}. line 3 \\\\.").expect("compiles");
    assert!(parser.fields().is_empty());
    assert!(parser.regex().is_match("line 1 {.\n line 2 }. line 3 \\."));
  }

  #[test]
  fn test_parse_non_matching() {
    let parser = make_header_parser("test {{YEARS}} test {{YEARS}}").expect("compiles");
    assert_eq!(parser.parse_fields("has no header").expect("parses"), None);
  }

  #[test]
  fn test_parse_must_start_at_beginning() {
    let parser = make_header_parser("test {{YEARS}}").expect("compiles");
    assert_eq!(parser.parse_fields("\ntest 2014").expect("parses"), None);
  }

  #[test]
  fn test_parse_single_years() {
    let parser = make_header_parser("test {{YEARS}} test {{YEARS}}").expect("compiles");
    let parsed = parser
      .parse_fields("test 2014 test 2015\ncontent")
      .expect("parses")
      .expect("has header");
    assert_eq!(parsed.fields, vec![years(2014, 2014), years(2015, 2015)]);
    assert_eq!(parsed.header, "test 2014 test 2015");
  }

  #[test]
  fn test_parse_year_range() {
    let parser = make_header_parser("test {{YEARS}} test {{YEARS}}").expect("compiles");
    let parsed = parser
      .parse_fields("test 2014-2016 test 2015-2019\n content")
      .expect("parses")
      .expect("has header");
    assert_eq!(parsed.fields, vec![years(2014, 2016), years(2015, 2019)]);
    assert_eq!(parsed.header, "test 2014-2016 test 2015-2019");
  }

  #[test]
  fn test_parse_invalid_date_is_field_error() {
    let parser = make_header_parser("// Updated {{DATE}}\n").expect("compiles");
    let err = parser
      .parse_fields("// Updated 2019-13-45\nfn main() {}\n")
      .expect_err("should fail");
    assert!(matches!(err, FieldError::InvalidDate(ref text) if text == "2019-13-45"));
  }

  #[test]
  fn test_deterministic() {
    let template = "# {{YEARS}}\n# {{DATE}} \\{\\}\n";
    let first = make_header_parser(template).expect("compiles");
    let second = make_header_parser(template).expect("compiles");
    assert_eq!(first.regex().as_str(), second.regex().as_str());
    assert_eq!(first.fields(), second.fields());
  }
}
