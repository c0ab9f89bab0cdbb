use super::{
    grammar::TerminalSet,
    nullable_first_follow::NullableFirstFollow,
    predict::GrammarAmbiguity,
    Grammar,
};

/// Everything the engine computes for one grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub sets: NullableFirstFollow,
    /// Indexed by production.
    pub predict: Vec<TerminalSet>,
    pub ambiguities: Vec<GrammarAmbiguity>,
}

impl Analysis {
    pub fn is_ll1(&self) -> bool {
        self.ambiguities.is_empty()
    }
}

impl Grammar {
    pub fn analyze(&self) -> Analysis {
        let sets = self.calculate_nullable_first_follow();
        let predict = self.calculate_predict(&sets);
        let ambiguities = self.find_ambiguities(&predict);
        Analysis {
            sets,
            predict,
            ambiguities,
        }
    }
}
