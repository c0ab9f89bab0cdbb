use thiserror::Error;

/// Fatal problems found before any set is computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("malformed production: {0}")]
    MalformedProduction(Malformed),

    #[error("undefined non-terminal `{name}` referenced by `{referenced_by}`")]
    UndefinedNonTerminal { name: String, referenced_by: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Malformed {
    #[error("grammar has no productions")]
    EmptyGrammar,

    #[error("epsilon must be the only symbol of an alternative of `{left}`")]
    EpsilonNotAlone { left: String },

    #[error("`{name}` is reserved and cannot be used as a symbol name")]
    ReservedName { name: String },

    #[error("start symbol `{name}` has no productions")]
    UndefinedStartSymbol { name: String },

    #[error("`{name}` is declared as a terminal but has productions")]
    TerminalWithProductions { name: String },
}

impl From<Malformed> for GrammarError {
    fn from(m: Malformed) -> Self {
        GrammarError::MalformedProduction(m)
    }
}
