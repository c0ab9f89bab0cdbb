use std::collections::HashSet;

use log::debug;

use super::{grammar::Symbol, Grammar, END_MARK, EPSILON, EPSILON_ALIAS};
use crate::error::{GrammarError, Malformed};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawSymbol {
    Name(String),
    Epsilon,
}

impl From<&str> for RawSymbol {
    fn from(name: &str) -> Self {
        RawSymbol::Name(name.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProduction {
    pub left: String,
    pub right: Vec<RawSymbol>,
}

impl RawProduction {
    pub fn new(left: &str, right: &[&str]) -> Self {
        Self {
            left: left.to_string(),
            right: right.iter().map(|&s| RawSymbol::from(s)).collect(),
        }
    }

    pub fn epsilon(left: &str) -> Self {
        Self {
            left: left.to_string(),
            right: vec![RawSymbol::Epsilon],
        }
    }
}

/// A grammar as written by its author, before any symbol is classified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawGrammar {
    pub productions: Vec<RawProduction>,
    /// When present, every right-hand-side name must be one of these or a
    /// left-hand side.
    pub terminals: Option<Vec<String>>,
    pub start: Option<String>,
}

impl RawGrammar {
    pub fn new(productions: Vec<RawProduction>) -> Self {
        Self {
            productions,
            ..Default::default()
        }
    }

    pub fn with_terminals(mut self, terminals: &[&str]) -> Self {
        self.terminals = Some(terminals.iter().map(|t| t.to_string()).collect());
        self
    }

    pub fn with_start(mut self, start: &str) -> Self {
        self.start = Some(start.to_string());
        self
    }
}

fn check_name(name: &str) -> Result<(), Malformed> {
    if name.is_empty() || name == END_MARK || name == EPSILON || name == EPSILON_ALIAS {
        Err(Malformed::ReservedName {
            name: name.to_string(),
        })
    } else {
        Ok(())
    }
}

impl Grammar {
    pub fn classify(raw: &RawGrammar) -> Result<Self, GrammarError> {
        if raw.productions.is_empty() {
            return Err(Malformed::EmptyGrammar.into());
        }

        let mut g = Self::empty();

        for production in &raw.productions {
            check_name(&production.left)?;
            if production.right.len() > 1 && production.right.contains(&RawSymbol::Epsilon) {
                return Err(Malformed::EpsilonNotAlone {
                    left: production.left.clone(),
                }
                .into());
            }
            if g.get_non_terminal_index(&production.left).is_none() {
                g.add_non_terminal(&production.left);
            }
        }

        let declared: Option<HashSet<&str>> = match &raw.terminals {
            Some(terminals) => {
                for t in terminals {
                    check_name(t)?;
                    if g.get_non_terminal_index(t).is_some() {
                        return Err(Malformed::TerminalWithProductions { name: t.clone() }.into());
                    }
                    g.add_terminal(t);
                }
                Some(terminals.iter().map(|t| t.as_str()).collect())
            }
            None => None,
        };

        for production in &raw.productions {
            let left = g.symbol_table[&production.left]
                .non_terminal()
                .ok_or_else(|| Malformed::TerminalWithProductions {
                    name: production.left.clone(),
                })?;

            let mut right = Vec::with_capacity(production.right.len());
            for symbol in &production.right {
                let name = match symbol {
                    RawSymbol::Epsilon => {
                        right.push(Symbol::Epsilon);
                        continue;
                    }
                    RawSymbol::Name(name) => name.as_str(),
                };
                check_name(name)?;
                let classified = match g.get_symbol(name) {
                    Some(s) => s,
                    None => match &declared {
                        Some(declared) if !declared.contains(name) => {
                            return Err(GrammarError::UndefinedNonTerminal {
                                name: name.to_string(),
                                referenced_by: production.left.clone(),
                            });
                        }
                        _ => g.add_terminal(name),
                    },
                };
                right.push(classified);
            }
            g.add_production(left, right);
        }

        g.start_symbol = match &raw.start {
            Some(name) => g.get_non_terminal_index(name).ok_or_else(|| {
                Malformed::UndefinedStartSymbol { name: name.clone() }
            })?,
            None => 0,
        };

        debug!(
            "classified {} terminals, {} non-terminals, {} productions",
            g.terminals.len(),
            g.non_terminals.len(),
            g.productions.len()
        );

        Ok(g)
    }
}
