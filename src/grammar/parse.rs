use crate::{error::GrammarError, Grammar};

use super::{
    classify::{RawGrammar, RawProduction, RawSymbol},
    EPSILON, EPSILON_ALIAS,
};

fn syntax_error(line: usize, message: impl Into<String>) -> GrammarError {
    GrammarError::Syntax {
        line: line + 1,
        message: message.into(),
    }
}

fn parse_right(right: &str) -> Vec<RawSymbol> {
    right
        .split_whitespace()
        .map(|s| {
            if s == EPSILON || s == EPSILON_ALIAS {
                RawSymbol::Epsilon
            } else {
                RawSymbol::from(s)
            }
        })
        .collect()
}

impl RawGrammar {
    pub fn parse(grammar: &str) -> Result<Self, GrammarError> {
        let mut raw = RawGrammar::default();

        let mut previous_left: Option<String> = None;
        for (i, line) in grammar.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
                continue;
            }

            if let Some(directive) = trimmed.strip_prefix('%') {
                let mut words = directive.split_whitespace();
                match words.next() {
                    Some("token") => raw
                        .terminals
                        .get_or_insert_with(Vec::new)
                        .extend(words.map(|w| w.to_string())),
                    Some("start") => match (words.next(), words.next()) {
                        (Some(start), None) => raw.start = Some(start.to_string()),
                        _ => return Err(syntax_error(i, "%start takes exactly one symbol")),
                    },
                    Some(other) => {
                        return Err(syntax_error(i, format!("unknown directive %{}", other)))
                    }
                    None => return Err(syntax_error(i, "empty directive")),
                }
                continue;
            }

            let parts: Vec<&str> = trimmed.split("->").collect();
            if parts.len() > 2 {
                return Err(syntax_error(i, "too many \"->\""));
            }
            let (left, rights): (String, &str) = if parts.len() == 2 {
                let left_str = parts[0].trim();
                if left_str.is_empty() {
                    return Err(syntax_error(i, "empty left side"));
                } else if left_str.split_whitespace().count() != 1 {
                    return Err(syntax_error(i, "left side contains whitespace"));
                }
                (left_str.to_string(), parts[1])
            } else if let Some(rest) = trimmed.strip_prefix('|') {
                match &previous_left {
                    Some(left) => (left.clone(), rest),
                    None => return Err(syntax_error(i, "cannot find left side")),
                }
            } else {
                return Err(syntax_error(i, "expected \"->\" or a leading \"|\""));
            };

            for right in rights.split('|') {
                raw.productions.push(RawProduction {
                    left: left.clone(),
                    right: parse_right(right),
                });
            }

            previous_left = Some(left);
        }

        Ok(raw)
    }
}

impl Grammar {
    pub fn parse(grammar: &str) -> Result<Self, GrammarError> {
        Self::classify(&RawGrammar::parse(grammar)?)
    }
}
