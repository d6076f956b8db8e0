//! Tokens and lexical rules
//!
//! A [`RuleSet`] is an ordered list of pattern rules; the order is the
//! disambiguation strategy, so callers declare more specific rules (for
//! example keywords) before general ones. The tokenizer in the
//! application layer consumes these rules; this module is pure data plus
//! construction helpers.

use regex::Regex;
use thiserror::Error;

/// A unit produced by lexical analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A lexeme carrying its rule-declared name and matched text.
    Lexeme {
        /// The name declared by the rule that produced this token.
        name: String,
        /// The matched (or captured) substring.
        value: String,
    },
    /// The unique end-of-stream sentinel.
    Eos,
}

impl Token {
    /// Creates a named lexeme token.
    pub fn lexeme(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Lexeme {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns true for the end-of-stream sentinel.
    #[must_use]
    pub const fn is_eos(&self) -> bool {
        matches!(self, Self::Eos)
    }

    /// Returns the token name, or `None` for the sentinel.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Lexeme { name, .. } => Some(name),
            Self::Eos => None,
        }
    }

    /// Returns the token value, or `None` for the sentinel.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Lexeme { value, .. } => Some(value),
            Self::Eos => None,
        }
    }
}

/// What a matched rule does with its match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleAction {
    /// Discard the match; the cursor still advances.
    Skip,
    /// Emit one token per declared name.
    ///
    /// With no capture groups the whole match becomes the value of the
    /// single declared name; with capture groups each captured substring
    /// maps positionally onto the declared names.
    Emit(Vec<String>),
}

/// A single lexical rule: an anchored pattern plus its action.
#[derive(Debug)]
pub struct TokenRule {
    pattern: Regex,
    source: String,
    action: RuleAction,
}

impl TokenRule {
    fn new(pattern: &str, action: RuleAction) -> Result<Self, RuleError> {
        // Anchor at the scan cursor; rules only ever match at the current
        // position, never further into the input.
        let anchored = format!(r"\A(?:{pattern})");
        let compiled = Regex::new(&anchored).map_err(|e| RuleError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            pattern: compiled,
            source: pattern.to_string(),
            action,
        })
    }

    /// The compiled, cursor-anchored pattern.
    #[must_use]
    pub const fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// The pattern text as the caller wrote it.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The action taken when this rule wins.
    #[must_use]
    pub const fn action(&self) -> &RuleAction {
        &self.action
    }
}

/// Error raised while constructing rules.
#[derive(Debug, Error)]
pub enum RuleError {
    /// The rule pattern is not a valid regular expression.
    #[error("invalid token pattern `{pattern}`: {message}")]
    InvalidPattern {
        /// The offending pattern text.
        pattern: String,
        /// The regex engine's diagnostic.
        message: String,
    },
}

/// An ordered collection of lexical rules.
///
/// Earlier rules always win over later ones when both match at the same
/// position, even when the later match is longer.
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: Vec<TokenRule>,
}

impl RuleSet {
    /// Creates an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a skip rule: matches advance the cursor, emit nothing.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidPattern`] for a malformed pattern.
    pub fn ignore(&mut self, pattern: &str) -> Result<&mut Self, RuleError> {
        self.rules.push(TokenRule::new(pattern, RuleAction::Skip)?);
        Ok(self)
    }

    /// Appends a rule producing a single named token.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidPattern`] for a malformed pattern.
    pub fn token(&mut self, pattern: &str, name: impl Into<String>) -> Result<&mut Self, RuleError> {
        self.tokens(pattern, [name])
    }

    /// Appends a rule producing one token per declared name, in
    /// pattern-capture order.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidPattern`] for a malformed pattern.
    pub fn tokens<I, S>(&mut self, pattern: &str, names: I) -> Result<&mut Self, RuleError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names.into_iter().map(Into::into).collect();
        self.rules
            .push(TokenRule::new(pattern, RuleAction::Emit(names))?);
        Ok(self)
    }

    /// Appends a keyword rule: the name is the pattern.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidPattern`] if the keyword is not a valid
    /// pattern on its own (for example, it contains unbalanced braces).
    pub fn keyword(&mut self, name: &str) -> Result<&mut Self, RuleError> {
        self.token(name, name)
    }

    /// The rules, in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[TokenRule] {
        &self.rules
    }

    /// The number of declared rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rules have been declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn rules_keep_declaration_order() {
        let mut rules = RuleSet::new();
        rules
            .keyword("if")
            .unwrap()
            .token(r"[a-z]+", "IDENT")
            .unwrap()
            .ignore(r"\s+")
            .unwrap();

        assert_eq!(rules.len(), 3);
        assert_eq!(rules.rules()[0].source(), "if");
        assert_eq!(rules.rules()[1].source(), "[a-z]+");
        assert_eq!(*rules.rules()[2].action(), RuleAction::Skip);
    }

    #[test]
    fn patterns_are_anchored_at_the_cursor() {
        let mut rules = RuleSet::new();
        rules.token(r"[0-9]+", "NUM").unwrap();
        let pattern = rules.rules()[0].pattern();

        assert!(pattern.is_match("42abc"));
        assert!(!pattern.is_match("abc42"));
    }

    #[test]
    fn invalid_pattern_is_a_construction_error() {
        let mut rules = RuleSet::new();
        let err = rules.token(r"[unclosed", "BAD").unwrap_err();
        assert!(matches!(err, RuleError::InvalidPattern { .. }));
    }

    #[test]
    fn token_accessors_distinguish_the_sentinel() {
        let lexeme = Token::lexeme("IDENT", "foo");
        assert!(!lexeme.is_eos());
        assert_eq!(lexeme.name(), Some("IDENT"));
        assert_eq!(lexeme.value(), Some("foo"));

        assert!(Token::Eos.is_eos());
        assert_eq!(Token::Eos.name(), None);
        assert_eq!(Token::Eos.value(), None);
    }
}
