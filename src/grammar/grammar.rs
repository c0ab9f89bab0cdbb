use std::collections::{BTreeSet, HashMap};

use super::{END_MARK, EPSILON};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Terminal(usize),
    NonTerminal(usize),
    Epsilon,
    EndOfInput,
}

impl Symbol {
    pub fn non_terminal(&self) -> Option<usize> {
        match self {
            Symbol::NonTerminal(idx) => Some(*idx),
            _ => None,
        }
    }
}

/// Members are always `Symbol::Terminal` or `Symbol::EndOfInput`.
pub type TerminalSet = BTreeSet<Symbol>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    pub index: usize,
    pub left: usize,
    pub right: Vec<Symbol>,
}

impl Production {
    pub fn is_epsilon(&self) -> bool {
        self.right.is_empty() || self.right == [Symbol::Epsilon]
    }
}

#[derive(Debug, Clone)]
pub struct NonTerminal {
    pub index: usize,
    pub name: String,
    /// Indices into `Grammar::productions`, in insertion order.
    pub productions: Vec<usize>,
}

impl NonTerminal {
    pub fn new(index: usize, name: String) -> Self {
        Self {
            index,
            name,
            productions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Grammar {
    pub terminals: Vec<String>,
    pub non_terminals: Vec<NonTerminal>,
    pub productions: Vec<Production>,
    pub symbol_table: HashMap<String, Symbol>,
    pub start_symbol: usize,
}

impl Grammar {
    pub(super) fn empty() -> Self {
        Self {
            terminals: Vec::new(),
            non_terminals: Vec::new(),
            productions: Vec::new(),
            symbol_table: HashMap::new(),
            start_symbol: 0,
        }
    }

    pub fn terminal_iter(&self) -> impl Iterator<Item = &String> {
        self.terminals.iter()
    }

    pub fn non_terminal_iter(&self) -> impl Iterator<Item = &NonTerminal> {
        self.non_terminals.iter()
    }

    pub fn productions_of(&self, non_terminal: usize) -> impl Iterator<Item = &Production> {
        self.non_terminals[non_terminal]
            .productions
            .iter()
            .map(move |idx| &self.productions[*idx])
    }

    pub fn get_symbol(&self, name: &str) -> Option<Symbol> {
        self.symbol_table.get(name).cloned()
    }

    pub fn get_non_terminal_index(&self, name: &str) -> Option<usize> {
        self.get_symbol(name).and_then(|s| s.non_terminal())
    }

    pub(super) fn add_non_terminal(&mut self, name: &str) -> usize {
        let idx = self.non_terminals.len();
        self.non_terminals
            .push(NonTerminal::new(idx, name.to_string()));
        self.symbol_table
            .insert(name.to_string(), Symbol::NonTerminal(idx));
        idx
    }

    pub(super) fn add_terminal(&mut self, name: &str) -> Symbol {
        if let Some(symbol) = self.get_symbol(name) {
            return symbol;
        }
        let symbol = Symbol::Terminal(self.terminals.len());
        self.terminals.push(name.to_string());
        self.symbol_table.insert(name.to_string(), symbol);
        symbol
    }

    pub(super) fn add_production(&mut self, left: usize, right: Vec<Symbol>) -> usize {
        let index = self.productions.len();
        self.productions.push(Production { index, left, right });
        self.non_terminals[left].productions.push(index);
        index
    }

    pub fn get_symbol_name(&self, symbol: Symbol) -> &str {
        match symbol {
            Symbol::Terminal(idx) => self.terminals[idx].as_str(),
            Symbol::NonTerminal(idx) => self.non_terminals[idx].name.as_str(),
            Symbol::Epsilon => EPSILON,
            Symbol::EndOfInput => END_MARK,
        }
    }

    pub fn production_to_vec_str(&self, production: &Production) -> Vec<&str> {
        if production.is_epsilon() {
            return vec![EPSILON];
        }
        production
            .right
            .iter()
            .map(|s| self.get_symbol_name(*s))
            .collect()
    }

    /// Names of a set's members, sorted by name.
    pub fn set_to_names(&self, set: &TerminalSet) -> Vec<&str> {
        let mut names: Vec<&str> = set.iter().map(|s| self.get_symbol_name(*s)).collect();
        names.sort();
        names
    }
}
