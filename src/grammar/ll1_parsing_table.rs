use std::collections::{HashMap, HashSet};

use crowbook_text_processing::escape::tex as escape_tex;
use serde::Serialize;

use crate::Grammar;

use super::{analysis::Analysis, grammar::Symbol, pretty_print::ProductionOutput, END_MARK};

/// One row per non-terminal, one column per terminal and `$`. A cell holding
/// more than one production is an LL(1) conflict.
#[derive(Serialize)]
pub struct LL1ParsingTable<'a> {
    terminals: Vec<&'a str>,
    rows: Vec<(&'a str, Vec<ProductionOutput<'a>>)>,
}

impl LL1ParsingTable<'_> {
    pub fn get(&self, non_terminal: &str, terminal: &str) -> Option<&ProductionOutput<'_>> {
        let col = self.terminals.iter().position(|&t| t == terminal)?;
        self.rows
            .iter()
            .find(|(left, _)| *left == non_terminal)
            .map(|(_, row)| &row[col])
    }

    pub fn to_plaintext(&self) -> String {
        let mut header: Vec<String> = vec![String::new()];
        header.extend(self.terminals.iter().map(|&t| t.to_string()));
        let mut output: Vec<Vec<String>> = vec![header];
        for (left, row) in &self.rows {
            let mut line: Vec<String> = vec![left.to_string()];
            line.extend(
                row.iter()
                    .map(|productions| productions.to_plaintext(left.len(), false)),
            );
            output.push(line);
        }

        let width: Vec<usize> = (0..output[0].len())
            .map(|j| {
                output
                    .iter()
                    .map(|line| line[j].chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();
        output
            .iter()
            .map(|line| {
                line.iter()
                    .enumerate()
                    .map(|(i, s)| format!("{:>width$}", s, width = width[i]))
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_latex(&self) -> String {
        let mut header: Vec<String> = vec![format!(
            "\\[\\begin{{array}}{{c{}}}\n",
            "|l".repeat(self.terminals.len()),
        )];
        header.extend(
            self.terminals
                .iter()
                .map(|&t| format!("\\text{{{}}}", escape_tex(t))),
        );
        let header = header.join(" & ");

        let mut output: Vec<String> = Vec::new();
        let terminal_set: HashSet<&str> = self.terminals.iter().cloned().collect();
        for (left, row) in &self.rows {
            let mut line: Vec<String> = vec![escape_tex(*left).to_string()];
            line.extend(row.iter().map(|productions| {
                let cell = productions.to_latex(false, &terminal_set);
                if productions.rights.len() > 1 {
                    format!("{{\\color{{red}}{}}}", cell)
                } else {
                    cell
                }
            }));
            output.push(line.join(" & "));
        }

        let output = output.join("\\\\\n");

        header + "\\\\\\hline\n" + &output + "\n\\end{array}\\]"
    }
}

impl Grammar {
    pub fn generate_ll1_parsing_table(&self, analysis: &Analysis) -> LL1ParsingTable<'_> {
        let mut terminals: Vec<&str> = self.terminal_iter().map(|t| t.as_str()).collect();
        terminals.push(END_MARK);
        let map: HashMap<Symbol, usize> = self
            .terminals
            .iter()
            .enumerate()
            .map(|(i, _)| (Symbol::Terminal(i), i))
            .chain(std::iter::once((Symbol::EndOfInput, self.terminals.len())))
            .collect();

        let mut rows: Vec<(&str, Vec<ProductionOutput>)> = Vec::new();
        for nt in self.non_terminal_iter() {
            let left = nt.name.as_str();
            let mut row: Vec<ProductionOutput> = vec![
                ProductionOutput {
                    left,
                    rights: Vec::new()
                };
                terminals.len()
            ];
            for production in self.productions_of(nt.index) {
                let right = self.production_to_vec_str(production);
                for col in analysis.predict[production.index].iter().map(|s| map[s]) {
                    row[col].rights.push(right.clone());
                }
            }

            rows.push((left, row));
        }

        LL1ParsingTable { terminals, rows }
    }
}
