extern crate wasm_bindgen;

use wasm_bindgen::prelude::*;

pub mod error;
pub mod grammar;
pub use error::GrammarError;
pub use grammar::{Analysis, Grammar};

fn error_to_json(e: impl std::fmt::Display) -> String {
    serde_json::json!({ "error": e.to_string() }).to_string()
}

fn render_json<F>(grammar: &str, render: F) -> String
where
    F: FnOnce(&Grammar, &Analysis) -> serde_json::Result<String>,
{
    match crate::Grammar::parse(grammar) {
        Ok(g) => {
            let analysis = g.analyze();
            render(&g, &analysis).unwrap_or_else(|e| error_to_json(e))
        }
        Err(e) => error_to_json(e),
    }
}

#[wasm_bindgen]
pub fn nullable_first_follow_to_json(grammar: &str) -> String {
    render_json(grammar, |g, analysis| {
        g.to_non_terminal_output_vec(&analysis.sets).to_json()
    })
}

#[wasm_bindgen]
pub fn predict_to_json(grammar: &str) -> String {
    render_json(grammar, |g, analysis| {
        g.to_predict_output_vec(analysis).to_json()
    })
}

#[wasm_bindgen]
pub fn ll1_parsing_table_to_json(grammar: &str) -> String {
    render_json(grammar, |g, analysis| {
        g.generate_ll1_parsing_table(analysis).to_json()
    })
}


#[cfg(test)]
mod nullable_first_follow_test {
    use std::collections::BTreeSet;

    use crate::grammar::{Symbol, TerminalSet};
    use crate::{Grammar, GrammarError};

    const CMINUS: &str = include_str!("../demos/cminus.grammar");

    fn names<'a>(g: &'a Grammar, set: &TerminalSet) -> BTreeSet<&'a str> {
        g.set_to_names(set).into_iter().collect()
    }

    fn set(items: &[&'static str]) -> BTreeSet<&'static str> {
        items.iter().cloned().collect()
    }

    #[test]
    fn right_recursive_list() {
        let g = Grammar::parse("%token a\nS -> a S | ϵ").unwrap();
        let analysis = g.analyze();

        assert_eq!(analysis.sets.nullable, vec![true]);
        assert_eq!(names(&g, &analysis.sets.first[0]), set(&["a"]));
        assert_eq!(analysis.sets.follow[0], TerminalSet::from([Symbol::EndOfInput]));
        assert_eq!(names(&g, &analysis.predict[0]), set(&["a"]));
        assert_eq!(analysis.predict[1], TerminalSet::from([Symbol::EndOfInput]));
        assert!(analysis.ambiguities.is_empty());
        assert!(analysis.is_ll1());
    }

    #[test]
    fn duplicate_alternatives() {
        let g = Grammar::parse("%token a\nS -> a | a").unwrap();
        let analysis = g.analyze();

        assert_eq!(names(&g, &analysis.predict[0]), set(&["a"]));
        assert_eq!(names(&g, &analysis.predict[1]), set(&["a"]));
        assert_eq!(analysis.ambiguities.len(), 1);
        let ambiguity = &analysis.ambiguities[0];
        assert_eq!(g.non_terminals[ambiguity.non_terminal].name, "S");
        assert_eq!(g.get_symbol_name(ambiguity.lookahead), "a");
        assert!(!analysis.is_ll1());
    }

    #[test]
    fn undefined_reference() {
        let err = Grammar::parse("%token a\nS -> X").unwrap_err();
        assert_eq!(
            err,
            GrammarError::UndefinedNonTerminal {
                name: "X".to_string(),
                referenced_by: "S".to_string()
            }
        );
    }

    #[test]
    fn analysis_is_idempotent() {
        let g = Grammar::parse(CMINUS).unwrap();
        assert_eq!(g.analyze(), g.analyze());
    }

    #[test]
    fn nullable_is_sound() {
        let g = Grammar::parse(CMINUS).unwrap();
        let analysis = g.analyze();
        for nt in g.non_terminal_iter() {
            if analysis.sets.nullable[nt.index] {
                assert!(g
                    .productions_of(nt.index)
                    .any(|p| g.is_sequence_nullable(&p.right, &analysis.sets.nullable)));
            }
        }
    }

    #[test]
    fn no_reported_conflict_means_disjoint_predict() {
        let grammars = [
            "S -> a S | ϵ",
            "E -> T E'\nE' -> + T E' | ϵ\nT -> F T'\nT' -> * F T' | ϵ\nF -> ( E ) | id",
            "S -> A b | c\nA -> a | ϵ",
        ];
        for text in grammars {
            let g = Grammar::parse(text).unwrap();
            let analysis = g.analyze();
            assert!(analysis.is_ll1(), "{}", text);
            for nt in g.non_terminal_iter() {
                for (i, &p) in nt.productions.iter().enumerate() {
                    for &q in &nt.productions[i + 1..] {
                        assert!(analysis.predict[p].is_disjoint(&analysis.predict[q]));
                    }
                }
            }
        }
    }

    #[test]
    fn cminus_first_sets() {
        let g = Grammar::parse(CMINUS).unwrap();
        let analysis = g.analyze();
        let index = |name: &str| g.get_non_terminal_index(name).unwrap();
        let first = |name: &str| names(&g, &analysis.sets.first[index(name)]);
        let nullable = |name: &str| analysis.sets.nullable[index(name)];

        assert_eq!(first("Program"), set(&["int", "void"]));
        assert!(nullable("Program"));
        assert_eq!(first("Declaration-prime"), set(&["(", "[", ";"]));
        assert_eq!(
            first("Statement"),
            set(&["{", "break", ";", "if", "for", "return", "ID", "+", "-", "(", "NUM"])
        );
        assert_eq!(
            first("B"),
            set(&["=", "[", "(", "*", "/", "+", "-", "==", "<"])
        );
        assert!(nullable("B"));
        assert_eq!(first("H"), set(&["=", "*", "/", "+", "-", "==", "<"]));
        assert_eq!(first("Args"), set(&["ID", "+", "-", "(", "NUM"]));
        assert!(!nullable("Arg-list"));
    }

    #[test]
    fn cminus_follow_sets() {
        let g = Grammar::parse(CMINUS).unwrap();
        let analysis = g.analyze();
        let index = |name: &str| g.get_non_terminal_index(name).unwrap();
        let follow = |name: &str| names(&g, &analysis.sets.follow[index(name)]);

        assert_eq!(follow("Program"), set(&["$"]));
        assert_eq!(
            follow("Declaration-list"),
            set(&[
                "$", "{", "break", ";", "if", "for", "return", "ID", "+", "-", "(", "NUM", "}"
            ])
        );
        assert_eq!(follow("Declaration-initial"), set(&["(", "[", ";", ",", ")"]));
        assert_eq!(follow("Expression"), set(&[";", ")", "]", ","]));
        assert_eq!(
            follow("Term"),
            set(&["+", "-", ";", ")", "==", "<", "]", ","])
        );
        assert_eq!(
            follow("Factor"),
            set(&["*", "/", "+", "-", ";", ")", "==", "<", "]", ","])
        );
        assert_eq!(
            follow("Else-stmt"),
            set(&[
                "{", "break", ";", "if", "for", "return", "ID", "+", "-", "(", "NUM", "}", "else"
            ])
        );
    }

    #[test]
    fn cminus_dangling_else() {
        let g = Grammar::parse(CMINUS).unwrap();
        let analysis = g.analyze();

        assert_eq!(analysis.ambiguities.len(), 1);
        let ambiguity = &analysis.ambiguities[0];
        assert_eq!(g.non_terminals[ambiguity.non_terminal].name, "Else-stmt");
        assert_eq!(g.get_symbol_name(ambiguity.lookahead), "else");
        assert_eq!(ambiguity.productions.len(), 2);
    }

    #[test]
    fn json_errors() {
        let json = crate::nullable_first_follow_to_json("S -> a -> b");
        assert_eq!(json, r#"{"error":"line 1: too many \"->\""}"#);
    }

    #[test]
    fn predict_json() {
        let json = crate::predict_to_json("S -> a");
        assert_eq!(
            json,
            r#"{"data":[{"production":{"left":"S","rights":[["a"]]},"predict":["a"]}]}"#
        );
    }
}
