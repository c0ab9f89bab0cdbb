pub mod analysis;
pub mod classify;
pub mod grammar;
pub mod ll1_parsing_table;
pub mod nullable_first_follow;
pub mod parse;
pub mod predict;
pub mod pretty_print;
pub use analysis::Analysis;
pub use classify::{RawGrammar, RawProduction, RawSymbol};
pub use grammar::{Grammar, Symbol, TerminalSet};
pub use predict::GrammarAmbiguity;

pub const EPSILON: &str = "ϵ";
pub const EPSILON_ALIAS: &str = "ε";
pub const END_MARK: &str = "$";
