//! Rule-driven tokenizer
//!
//! Turns an input string into a stream of typed tokens according to a
//! caller-supplied [`RuleSet`]. This is an ordered-rule lexer, not a
//! maximal-munch one: at every cursor position the first rule that
//! matches wins, even when a later rule would match a longer substring.
//! Rule order is the disambiguation strategy, so grammars written against
//! it put keywords before their generic identifier rule.

use std::collections::VecDeque;

use seltzer_domain::{RuleAction, RuleSet, Token, TokenRule};
use thiserror::Error;

/// Errors raised while tokenizing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenizeError {
    /// No rule matched at the current cursor position.
    #[error("unexpected input at byte {position}")]
    UnexpectedInput {
        /// Byte offset of the offending position.
        position: usize,
    },
    /// A rule's declared name count disagrees with its capture count.
    #[error("rule `{pattern}` declares {found} token name(s), expected {expected}")]
    RuleArity {
        /// The offending rule's pattern text.
        pattern: String,
        /// How many names the match calls for.
        expected: usize,
        /// How many names the rule declares.
        found: usize,
    },
}

/// A lazy tokenizer over an immutable input and a fixed rule set.
///
/// Tokens are produced in batches internally (one winning-rule scan per
/// batch) and drained destructively by [`Tokenizer::next_token`]; the
/// buffer is refilled only once it is empty and the cursor has not yet
/// reached end of input, so large inputs are never tokenized up front.
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    rules: &'a RuleSet,
    cursor: usize,
    buffer: VecDeque<Token>,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer over `input` with the given rules.
    #[must_use]
    pub fn new(input: &'a str, rules: &'a RuleSet) -> Self {
        Self {
            input,
            rules,
            cursor: 0,
            buffer: VecDeque::new(),
        }
    }

    /// Pulls the next visible token.
    ///
    /// Skip-rule matches are consumed transparently. Once the cursor
    /// reaches end of input this returns [`Token::Eos`], and keeps
    /// returning it on every subsequent call.
    ///
    /// # Errors
    ///
    /// [`TokenizeError::UnexpectedInput`] when no rule matches at the
    /// cursor, [`TokenizeError::RuleArity`] when the winning rule's name
    /// count disagrees with its captures.
    pub fn next_token(&mut self) -> Result<Token, TokenizeError> {
        loop {
            if let Some(token) = self.buffer.pop_front() {
                return Ok(token);
            }
            if self.cursor >= self.input.len() {
                return Ok(Token::Eos);
            }
            self.scan_at_cursor()?;
        }
    }

    /// Scans one batch: the first rule matching at the cursor, in
    /// declaration order, contributes its tokens and advances the cursor.
    fn scan_at_cursor(&mut self) -> Result<(), TokenizeError> {
        // Copy the shared references out so the winning rule and its
        // captures do not hold a borrow of `self` across `emit`.
        let input = self.input;
        let rules = self.rules;
        let rest = &input[self.cursor..];
        for rule in rules.rules() {
            let Some(caps) = rule.pattern().captures(rest) else {
                continue;
            };
            let matched = caps.get(0).map_or("", |m| m.as_str());
            if matched.is_empty() {
                // An empty match would never advance the cursor; treat the
                // rule as not matching here.
                continue;
            }
            if let RuleAction::Emit(names) = rule.action() {
                self.emit(rule, names, &caps, matched)?;
            }
            self.cursor += matched.len();
            return Ok(());
        }
        Err(TokenizeError::UnexpectedInput {
            position: self.cursor,
        })
    }

    fn emit(
        &mut self,
        rule: &TokenRule,
        names: &[String],
        caps: &regex::Captures<'_>,
        matched: &str,
    ) -> Result<(), TokenizeError> {
        let group_count = rule.pattern().captures_len() - 1;
        // The contiguous run of participating groups, stopping at the
        // first one that did not take part in the match.
        let captured: Vec<&str> = (1..=group_count)
            .map_while(|i| caps.get(i).map(|m| m.as_str()))
            .collect();

        // No participating groups this match (none declared, or every
        // declared group was optional and sat out): the whole match is
        // the single declared name's value.
        if captured.is_empty() {
            if names.len() != 1 {
                return Err(TokenizeError::RuleArity {
                    pattern: rule.source().to_string(),
                    expected: 1,
                    found: names.len(),
                });
            }
            self.buffer.push_back(Token::lexeme(&names[0], matched));
            return Ok(());
        }

        if captured.len() != names.len() {
            return Err(TokenizeError::RuleArity {
                pattern: rule.source().to_string(),
                expected: captured.len(),
                found: names.len(),
            });
        }
        for (name, value) in names.iter().zip(captured) {
            self.buffer.push_back(Token::lexeme(name, value));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn word_rules() -> RuleSet {
        let mut rules = RuleSet::new();
        rules
            .ignore(r"\s+")
            .unwrap()
            .keyword("if")
            .unwrap()
            .token(r"[a-z]+", "IDENT")
            .unwrap()
            .token(r"[0-9]+", "NUM")
            .unwrap();
        rules
    }

    fn drain(input: &str, rules: &RuleSet) -> Vec<Token> {
        let mut tokenizer = Tokenizer::new(input, rules);
        let mut tokens = Vec::new();
        loop {
            let token = tokenizer.next_token().unwrap();
            let done = token.is_eos();
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    #[test]
    fn empty_input_yields_only_the_sentinel() {
        let rules = word_rules();
        let mut tokenizer = Tokenizer::new("", &rules);
        assert_eq!(tokenizer.next_token().unwrap(), Token::Eos);
    }

    #[test]
    fn sentinel_repeats_after_end_of_stream() {
        let rules = word_rules();
        let mut tokenizer = Tokenizer::new("ab", &rules);
        assert_eq!(tokenizer.next_token().unwrap(), Token::lexeme("IDENT", "ab"));
        assert_eq!(tokenizer.next_token().unwrap(), Token::Eos);
        assert_eq!(tokenizer.next_token().unwrap(), Token::Eos);
    }

    #[test]
    fn first_match_wins_over_longer_later_match() {
        // "ifelse" matches both the `if` keyword (2 chars) and the IDENT
        // rule (6 chars); the keyword is declared first and must win.
        let rules = word_rules();
        let tokens = drain("ifelse", &rules);
        assert_eq!(
            tokens,
            vec![
                Token::lexeme("if", "if"),
                Token::lexeme("IDENT", "else"),
                Token::Eos,
            ]
        );
    }

    #[test]
    fn rule_order_is_the_tie_break() {
        // Same grammar with IDENT declared before the keyword: the
        // keyword rule is now unreachable for "if".
        let mut rules = RuleSet::new();
        rules
            .token(r"[a-z]+", "IDENT")
            .unwrap()
            .keyword("if")
            .unwrap();
        let tokens = drain("if", &rules);
        assert_eq!(tokens, vec![Token::lexeme("IDENT", "if"), Token::Eos]);
    }

    #[test]
    fn skip_rules_advance_without_emitting() {
        let rules = word_rules();
        let tokens = drain("  if  x ", &rules);
        assert_eq!(
            tokens,
            vec![
                Token::lexeme("if", "if"),
                Token::lexeme("IDENT", "x"),
                Token::Eos,
            ]
        );
    }

    #[test]
    fn skip_only_input_yields_only_the_sentinel() {
        let rules = word_rules();
        assert_eq!(drain("   \t\n ", &rules), vec![Token::Eos]);
    }

    #[test]
    fn captures_map_positionally_onto_names() {
        let mut rules = RuleSet::new();
        rules
            .ignore(r"\s+")
            .unwrap()
            .tokens(r"([a-z]+)=([0-9]+)", ["KEY", "VAL"])
            .unwrap();
        let tokens = drain("port=8080 host=1", &rules);
        assert_eq!(
            tokens,
            vec![
                Token::lexeme("KEY", "port"),
                Token::lexeme("VAL", "8080"),
                Token::lexeme("KEY", "host"),
                Token::lexeme("VAL", "1"),
                Token::Eos,
            ]
        );
    }

    #[test]
    fn unmatched_optional_groups_fall_back_to_the_whole_match() {
        let mut rules = RuleSet::new();
        rules
            .ignore(r"\s+")
            .unwrap()
            .token(r"(foo)?bar", "WORD")
            .unwrap();
        // With the optional group sitting out, the whole match is the
        // value; with it participating, the captured text is.
        let tokens = drain("bar foobar", &rules);
        assert_eq!(
            tokens,
            vec![
                Token::lexeme("WORD", "bar"),
                Token::lexeme("WORD", "foo"),
                Token::Eos,
            ]
        );
    }

    #[test]
    fn too_many_names_without_captures_is_an_arity_error() {
        let mut rules = RuleSet::new();
        rules.tokens(r"[a-z]+", ["A", "B"]).unwrap();
        let mut tokenizer = Tokenizer::new("abc", &rules);
        assert_eq!(
            tokenizer.next_token(),
            Err(TokenizeError::RuleArity {
                pattern: "[a-z]+".to_string(),
                expected: 1,
                found: 2,
            })
        );
    }

    #[test]
    fn name_count_must_equal_capture_count() {
        let mut rules = RuleSet::new();
        rules.tokens(r"([a-z]+)=([0-9]+)", ["ONLY"]).unwrap();
        let mut tokenizer = Tokenizer::new("a=1", &rules);
        assert_eq!(
            tokenizer.next_token(),
            Err(TokenizeError::RuleArity {
                pattern: "([a-z]+)=([0-9]+)".to_string(),
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn unmatched_input_reports_the_position() {
        let rules = word_rules();
        let mut tokenizer = Tokenizer::new("ab !", &rules);
        assert_eq!(tokenizer.next_token().unwrap(), Token::lexeme("IDENT", "ab"));
        assert_eq!(
            tokenizer.next_token(),
            Err(TokenizeError::UnexpectedInput { position: 3 })
        );
    }

    #[test]
    fn empty_matches_never_stall_the_scan() {
        let mut rules = RuleSet::new();
        rules
            .token(r"x*", "XS")
            .unwrap()
            .token(r"[a-z]", "CHAR")
            .unwrap();
        // At "y" the x* rule matches the empty string; it must be passed
        // over in favor of the CHAR rule instead of looping forever.
        let tokens = drain("xxy", &rules);
        assert_eq!(
            tokens,
            vec![
                Token::lexeme("XS", "xx"),
                Token::lexeme("CHAR", "y"),
                Token::Eos,
            ]
        );
    }
}
