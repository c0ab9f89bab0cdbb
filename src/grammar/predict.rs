use std::collections::BTreeMap;

use log::warn;

use super::{
    grammar::{Symbol, TerminalSet},
    nullable_first_follow::NullableFirstFollow,
    Grammar,
};

/// Two or more alternatives of `non_terminal` are selected by the same
/// lookahead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarAmbiguity {
    pub non_terminal: usize,
    pub lookahead: Symbol,
    /// Production indices, in insertion order.
    pub productions: Vec<usize>,
}

impl Grammar {
    /// PREDICT(N -> α) = FIRST(α), plus FOLLOW(N) when α is nullable.
    pub fn calculate_predict(&self, nff: &NullableFirstFollow) -> Vec<TerminalSet> {
        self.productions
            .iter()
            .map(|production| {
                let mut predict =
                    self.first_of_sequence(&production.right, &nff.nullable, &nff.first);
                if self.is_sequence_nullable(&production.right, &nff.nullable) {
                    predict.extend(nff.follow[production.left].iter().cloned());
                }
                predict
            })
            .collect()
    }

    pub fn find_ambiguities(&self, predict: &[TerminalSet]) -> Vec<GrammarAmbiguity> {
        let mut ambiguities = Vec::new();
        for nt in self.non_terminal_iter() {
            let mut claims: BTreeMap<Symbol, Vec<usize>> = BTreeMap::new();
            for &production in &nt.productions {
                for &lookahead in &predict[production] {
                    claims.entry(lookahead).or_default().push(production);
                }
            }

            for (lookahead, productions) in claims {
                if productions.len() < 2 {
                    continue;
                }
                warn!(
                    "LL(1) conflict: {} has {} alternatives on {}",
                    nt.name,
                    productions.len(),
                    self.get_symbol_name(lookahead)
                );
                ambiguities.push(GrammarAmbiguity {
                    non_terminal: nt.index,
                    lookahead,
                    productions,
                });
            }
        }
        ambiguities
    }
}
