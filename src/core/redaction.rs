//! Sensitive-data redaction for serialized lines
//!
//! A [`Redactor`] is an ordered list of case-insensitive rules. Each rule's
//! output feeds the next. Custom rules run first; the two built-in rules
//! (quoted JSON key/value pairs and `key=value` tokens) always run after.
//!
//! # Example
//!
//! ```
//! use rust_log_dispatch::Redactor;
//!
//! let redactor = Redactor::new();
//! let line = r#"{"user":"bob","password":"secret123"}"#;
//! assert_eq!(
//!     redactor.apply(line),
//!     r#"{"user":"bob","password":"__SENSITIVE_DATA__"}"#
//! );
//! ```

use super::error::{LoggerError, Result};
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;

/// Key fragments masked when no other set is configured
pub const DEFAULT_SENSITIVE_FRAGMENTS: &[&str] =
    &["mdp", "password", "authorization", "token", "pwd", "auth"];

/// Substitute written in place of a sensitive value
///
/// Contains none of the default fragments, so re-applying is a no-op.
pub const REDACTED_PLACEHOLDER: &str = "__SENSITIVE_DATA__";

/// One compiled pattern and its substitution
///
/// The substitution uses `regex` replacement syntax (`${1}` for groups).
#[derive(Debug, Clone)]
pub struct RedactionRule {
    regex: Regex,
    substitution: String,
}

impl RedactionRule {
    pub fn new(pattern: &str, substitution: impl Into<String>) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| LoggerError::pattern(pattern, e))?;

        Ok(Self {
            regex,
            substitution: substitution.into(),
        })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    fn apply<'a>(&self, input: Cow<'a, str>) -> Cow<'a, str> {
        let replaced = match self.regex.replace_all(&input, self.substitution.as_str()) {
            Cow::Borrowed(_) => None,
            Cow::Owned(replaced) => Some(replaced),
        };
        match replaced {
            Some(replaced) => Cow::Owned(replaced),
            None => input,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Redactor {
    rules: Vec<RedactionRule>,
}

impl Redactor {
    /// Redactor with the default fragments and no custom rules
    pub fn new() -> Self {
        let rules = builtin_rules(&fragment_alternation(DEFAULT_SENSITIVE_FRAGMENTS))
            .expect("default fragments are escaped and always compile");
        Self { rules }
    }

    #[must_use]
    pub fn builder() -> RedactorBuilder {
        RedactorBuilder::new()
    }

    /// Rules in application order
    pub fn rules(&self) -> &[RedactionRule] {
        &self.rules
    }

    /// Run every rule over `line`, left to right
    pub fn apply<'a>(&self, line: &'a str) -> Cow<'a, str> {
        self.rules
            .iter()
            .fold(Cow::Borrowed(line), |acc, rule| rule.apply(acc))
    }
}

impl Default for Redactor {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`Redactor`]
#[derive(Debug, Clone, Default)]
pub struct RedactorBuilder {
    fragments: Option<Vec<String>>,
    patterns: Vec<(String, String)>,
}

impl RedactorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the default sensitive fragment set
    #[must_use = "builder methods return a new value"]
    pub fn fragments<I, S>(mut self, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fragments = Some(fragments.into_iter().map(Into::into).collect());
        self
    }

    /// Add a custom rule, run before the built-in ones
    #[must_use = "builder methods return a new value"]
    pub fn pattern(mut self, pattern: impl Into<String>, substitution: impl Into<String>) -> Self {
        self.patterns.push((pattern.into(), substitution.into()));
        self
    }

    /// Compile every rule; an invalid pattern fails here, never per line
    pub fn build(self) -> Result<Redactor> {
        let alternation = match self.fragments {
            Some(ref fragments) => {
                let fragments: Vec<&str> = fragments
                    .iter()
                    .map(|f| f.trim())
                    .filter(|f| !f.is_empty())
                    .collect();
                if fragments.is_empty() {
                    return Err(LoggerError::config(
                        "Redactor",
                        "sensitive fragment set must not be empty",
                    ));
                }
                fragment_alternation(&fragments)
            }
            None => fragment_alternation(DEFAULT_SENSITIVE_FRAGMENTS),
        };

        let mut rules = Vec::with_capacity(self.patterns.len() + 2);
        for (pattern, substitution) in &self.patterns {
            rules.push(RedactionRule::new(pattern, substitution.as_str())?);
        }
        rules.extend(builtin_rules(&alternation)?);

        Ok(Redactor { rules })
    }
}

fn fragment_alternation(fragments: &[&str]) -> String {
    let escaped: Vec<String> = fragments.iter().map(|f| regex::escape(f)).collect();
    format!("({})", escaped.join("|"))
}

fn builtin_rules(alternation: &str) -> Result<Vec<RedactionRule>> {
    // "password":"My super password", escaped quotes included
    let quoted = RedactionRule::new(
        &format!(r#""{}":"((?:[^"\\]|\\.)*)""#, alternation),
        format!(r#""${{1}}":"{}""#, REDACTED_PLACEHOLDER),
    )?;

    // password=My-super-password
    let key_value = RedactionRule::new(
        &format!(r"{}=([\w-]*)", alternation),
        format!("${{1}}={}", REDACTED_PLACEHOLDER),
    )?;

    Ok(vec![quoted, key_value])
}
