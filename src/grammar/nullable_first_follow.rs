use log::debug;

use super::{
    grammar::{Symbol, TerminalSet},
    Grammar,
};

/// Stabilized nullable, FIRST and FOLLOW sets, all indexed by non-terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullableFirstFollow {
    pub nullable: Vec<bool>,
    pub first: Vec<TerminalSet>,
    pub follow: Vec<TerminalSet>,
}

impl Grammar {
    pub fn calculate_nullable_first_follow(&self) -> NullableFirstFollow {
        let nullable = self.calculate_nullable();
        let first = self.calculate_first(&nullable);
        let follow = self.calculate_follow(&nullable, &first);
        NullableFirstFollow {
            nullable,
            first,
            follow,
        }
    }

    pub fn is_sequence_nullable(&self, sequence: &[Symbol], nullable: &[bool]) -> bool {
        sequence.iter().all(|s| match s {
            Symbol::Terminal(_) | Symbol::EndOfInput => false,
            Symbol::Epsilon => true,
            Symbol::NonTerminal(nt) => nullable[*nt],
        })
    }

    pub fn calculate_nullable(&self) -> Vec<bool> {
        self.calculate_nullable_from(vec![false; self.non_terminals.len()])
    }

    /// Resumes the nullable fixed point from `nullable`, which must not mark
    /// anything that is not really nullable.
    pub fn calculate_nullable_from(&self, mut nullable: Vec<bool>) -> Vec<bool> {
        let mut passes = 1;
        while self.nullable_pass(&mut nullable) {
            passes += 1;
        }
        debug!("nullable stabilized after {} passes", passes);
        nullable
    }

    pub fn nullable_pass(&self, nullable: &mut [bool]) -> bool {
        let mut changed = false;
        for production in &self.productions {
            if nullable[production.left] {
                continue;
            }
            if self.is_sequence_nullable(&production.right, nullable) {
                nullable[production.left] = true;
                changed = true;
            }
        }
        changed
    }

    pub fn first_of_symbol(
        &self,
        symbol: Symbol,
        nullable: &[bool],
        first: &[TerminalSet],
    ) -> TerminalSet {
        self.first_of_sequence(&[symbol], nullable, first)
    }

    /// FIRST of a symbol sequence. Scanning stops after the first symbol
    /// that is not nullable.
    pub fn first_of_sequence(
        &self,
        sequence: &[Symbol],
        nullable: &[bool],
        first: &[TerminalSet],
    ) -> TerminalSet {
        let mut result = TerminalSet::new();
        for symbol in sequence {
            match symbol {
                Symbol::Terminal(_) | Symbol::EndOfInput => {
                    result.insert(*symbol);
                    break;
                }
                Symbol::Epsilon => {}
                Symbol::NonTerminal(nt) => {
                    result.extend(first[*nt].iter().cloned());
                    if !nullable[*nt] {
                        break;
                    }
                }
            }
        }
        result
    }

    pub fn calculate_first(&self, nullable: &[bool]) -> Vec<TerminalSet> {
        self.calculate_first_from(nullable, vec![TerminalSet::new(); self.non_terminals.len()])
    }

    pub fn calculate_first_from(
        &self,
        nullable: &[bool],
        mut first: Vec<TerminalSet>,
    ) -> Vec<TerminalSet> {
        let mut passes = 1;
        while self.first_pass(nullable, &mut first) {
            passes += 1;
        }
        debug!("first stabilized after {} passes", passes);
        first
    }

    pub fn first_pass(&self, nullable: &[bool], first: &mut [TerminalSet]) -> bool {
        let mut changed = false;
        for production in &self.productions {
            let additions = self.first_of_sequence(&production.right, nullable, first);
            let set = &mut first[production.left];
            let before = set.len();
            set.extend(additions);
            changed |= set.len() != before;
        }
        changed
    }

    pub fn calculate_follow(&self, nullable: &[bool], first: &[TerminalSet]) -> Vec<TerminalSet> {
        self.calculate_follow_from(
            nullable,
            first,
            vec![TerminalSet::new(); self.non_terminals.len()],
        )
    }

    pub fn calculate_follow_from(
        &self,
        nullable: &[bool],
        first: &[TerminalSet],
        mut follow: Vec<TerminalSet>,
    ) -> Vec<TerminalSet> {
        follow[self.start_symbol].insert(Symbol::EndOfInput);

        let mut passes = 1;
        while self.follow_pass(nullable, first, &mut follow) {
            passes += 1;
        }
        debug!("follow stabilized after {} passes", passes);
        follow
    }

    pub fn follow_pass(
        &self,
        nullable: &[bool],
        first: &[TerminalSet],
        follow: &mut [TerminalSet],
    ) -> bool {
        let mut changed = false;
        for production in &self.productions {
            for (i, symbol) in production.right.iter().enumerate() {
                let nt = match symbol.non_terminal() {
                    Some(nt) => nt,
                    None => continue,
                };

                let rest = &production.right[i + 1..];
                let mut additions = self.first_of_sequence(rest, nullable, first);
                if self.is_sequence_nullable(rest, nullable) {
                    additions.extend(follow[production.left].iter().cloned());
                }

                let set = &mut follow[nt];
                let before = set.len();
                set.extend(additions);
                changed |= set.len() != before;
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use crate::Grammar;

    fn names<'a>(g: &'a Grammar, set: &super::TerminalSet) -> BTreeSet<&'a str> {
        g.set_to_names(set).into_iter().collect()
    }

    fn set(items: &[&'static str]) -> BTreeSet<&'static str> {
        items.iter().cloned().collect()
    }

    const EXPR: &str = "E -> T E'
E' -> + T E' | ϵ
T -> F T'
T' -> * F T' | ϵ
F -> ( E ) | id";

    #[test]
    fn expression_grammar() {
        let g = Grammar::parse(EXPR).unwrap();
        let nff = g.calculate_nullable_first_follow();
        let idx = |name: &str| g.get_non_terminal_index(name).unwrap();

        assert!(!nff.nullable[idx("E")]);
        assert!(nff.nullable[idx("E'")]);
        assert!(nff.nullable[idx("T'")]);

        assert_eq!(names(&g, &nff.first[idx("E")]), set(&["(", "id"]));
        assert_eq!(names(&g, &nff.first[idx("E'")]), set(&["+"]));
        assert_eq!(names(&g, &nff.first[idx("T'")]), set(&["*"]));

        assert_eq!(names(&g, &nff.follow[idx("E")]), set(&["$", ")"]));
        assert_eq!(names(&g, &nff.follow[idx("E'")]), set(&["$", ")"]));
        assert_eq!(names(&g, &nff.follow[idx("T")]), set(&["$", ")", "+"]));
        assert_eq!(names(&g, &nff.follow[idx("F")]), set(&["$", ")", "*", "+"]));
    }

    #[test]
    fn nullable_through_chain() {
        let g = Grammar::parse("S -> A B\nA -> B\nB -> ϵ").unwrap();
        let nullable = g.calculate_nullable();
        assert_eq!(nullable, vec![true, true, true]);
    }

    #[test]
    fn empty_right_side_is_nullable() {
        let g = Grammar::parse("S -> a S |").unwrap();
        assert_eq!(g.calculate_nullable(), vec![true]);
    }

    #[test]
    fn unproductive_cycle_is_not_nullable() {
        let g = Grammar::parse("S -> A | a\nA -> S").unwrap();
        let nff = g.calculate_nullable_first_follow();
        assert_eq!(nff.nullable, vec![false, false]);
        assert_eq!(names(&g, &nff.first[1]), set(&["a"]));
    }

    #[test]
    fn follow_reaches_past_nullable_suffix() {
        let g = Grammar::parse("S -> A B C d\nA -> a\nB -> b | ϵ\nC -> c | ϵ").unwrap();
        let nff = g.calculate_nullable_first_follow();
        let a = g.get_non_terminal_index("A").unwrap();
        assert_eq!(names(&g, &nff.follow[a]), set(&["b", "c", "d"]));
    }

    #[test]
    fn end_of_input_through_nullable_tail() {
        let g = Grammar::parse("S -> A B\nA -> a\nB -> b | ϵ").unwrap();
        let nff = g.calculate_nullable_first_follow();
        let a = g.get_non_terminal_index("A").unwrap();
        assert_eq!(names(&g, &nff.follow[a]), set(&["$", "b"]));
    }

    #[test]
    fn terminal_first_is_itself() {
        let g = Grammar::parse(EXPR).unwrap();
        let nff = g.calculate_nullable_first_follow();
        for name in g.terminal_iter() {
            let t = g.get_symbol(name).unwrap();
            let first = g.first_of_symbol(t, &nff.nullable, &nff.first);
            assert_eq!(first, super::TerminalSet::from([t]));
        }
    }

    #[test]
    fn passes_only_grow() {
        let g = Grammar::parse(EXPR).unwrap();

        let mut nullable = vec![false; g.non_terminals.len()];
        loop {
            let before = nullable.clone();
            let changed = g.nullable_pass(&mut nullable);
            for (old, new) in before.iter().zip(nullable.iter()) {
                assert!(!old || *new);
            }
            if !changed {
                assert_eq!(before, nullable);
                break;
            }
        }
        assert_eq!(nullable, g.calculate_nullable());

        let mut first = vec![super::TerminalSet::new(); g.non_terminals.len()];
        loop {
            let before = first.clone();
            let changed = g.first_pass(&nullable, &mut first);
            for (old, new) in before.iter().zip(first.iter()) {
                assert!(old.is_subset(new));
            }
            if !changed {
                assert_eq!(before, first);
                break;
            }
        }

        let mut follow = vec![super::TerminalSet::new(); g.non_terminals.len()];
        loop {
            let before = follow.clone();
            let changed = g.follow_pass(&nullable, &first, &mut follow);
            for (old, new) in before.iter().zip(follow.iter()) {
                assert!(old.is_subset(new));
            }
            if !changed {
                break;
            }
        }
    }

    #[test]
    fn resuming_from_partial_state() {
        let g = Grammar::parse(EXPR).unwrap();
        let full = g.calculate_nullable_first_follow();

        let mut nullable = vec![false; g.non_terminals.len()];
        g.nullable_pass(&mut nullable);
        assert_eq!(g.calculate_nullable_from(nullable), full.nullable);

        let mut first = vec![super::TerminalSet::new(); g.non_terminals.len()];
        g.first_pass(&full.nullable, &mut first);
        assert_eq!(g.calculate_first_from(&full.nullable, first), full.first);

        let mut follow = vec![super::TerminalSet::new(); g.non_terminals.len()];
        g.follow_pass(&full.nullable, &full.first, &mut follow);
        assert_eq!(
            g.calculate_follow_from(&full.nullable, &full.first, follow),
            full.follow
        );
    }
}
