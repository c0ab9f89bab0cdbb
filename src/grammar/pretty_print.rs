use std::collections::HashSet;

use crowbook_text_processing::escape;
use serde::Serialize;

use super::{analysis::Analysis, nullable_first_follow::NullableFirstFollow, Grammar, EPSILON};

fn latex_symbol(s: &str, terminals: &HashSet<&str>) -> String {
    if s == EPSILON {
        "\\epsilon".to_string()
    } else if terminals.contains(s) {
        format!("\\text{{{}}}", escape::tex(s))
    } else {
        escape::tex(s).to_string()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductionOutput<'a> {
    pub left: &'a str,
    pub rights: Vec<Vec<&'a str>>,
}

impl ProductionOutput<'_> {
    pub fn to_plaintext(&self, left_width: usize, multiline: bool) -> String {
        self.rights
            .iter()
            .map(|right| right.join(" "))
            .enumerate()
            .map(|(i, right)| {
                if i == 0 {
                    format!("{:>width$} -> {}", self.left, right, width = left_width)
                } else if multiline {
                    format!("{:>width$}  | {}", "", right, width = left_width)
                } else {
                    format!(" | {}", right)
                }
            })
            .collect::<Vec<_>>()
            .join(if multiline { "\n" } else { "" })
    }

    pub fn to_latex(&self, and_sign: bool, terminals: &HashSet<&str>) -> String {
        if self.rights.is_empty() {
            return String::new();
        }

        let left = if and_sign {
            format!("{} & \\rightarrow & ", escape::tex(self.left))
        } else {
            format!("{} \\rightarrow ", escape::tex(self.left))
        };
        let right = self
            .rights
            .iter()
            .map(|right| {
                right
                    .iter()
                    .map(|s| latex_symbol(s, terminals))
                    .collect::<Vec<_>>()
                    .join(" \\ ")
            })
            .collect::<Vec<_>>()
            .join(" \\mid ");

        left + &right
    }
}

#[derive(Serialize)]
pub struct ProductionOutputVec<'a> {
    productions: Vec<ProductionOutput<'a>>,
    #[serde(skip)]
    terminals: HashSet<&'a str>,
}

impl ProductionOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        let left_max_len = self
            .productions
            .iter()
            .map(|p| p.left.len())
            .max()
            .unwrap_or(0);
        self.productions
            .iter()
            .map(|s| s.to_plaintext(left_max_len, true))
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        std::iter::once("\\[\\begin{array}{cll}".to_string())
            .chain(
                self.productions
                    .iter()
                    .map(|s| s.to_latex(true, &self.terminals)),
            )
            .chain(std::iter::once("\\end{array}\\]".to_string()))
            .collect::<Vec<String>>()
            .join("\\\\\n")
    }
}

impl Grammar {
    pub fn terminal_name_set(&self) -> HashSet<&str> {
        self.terminal_iter().map(|t| t.as_str()).collect()
    }

    pub fn to_production_output_vec(&self) -> ProductionOutputVec<'_> {
        let productions = self
            .non_terminal_iter()
            .map(|nt| ProductionOutput {
                left: nt.name.as_str(),
                rights: self
                    .productions_of(nt.index)
                    .map(|p| self.production_to_vec_str(p))
                    .collect(),
            })
            .collect();
        ProductionOutputVec {
            productions,
            terminals: self.terminal_name_set(),
        }
    }
}

#[derive(Serialize)]
struct NonTerminalOutput<'a> {
    name: &'a str,
    nullable: bool,
    first: Vec<&'a str>,
    follow: Vec<&'a str>,
}

impl NonTerminalOutput<'_> {
    fn to_plaintext(&self) -> String {
        format!(
            "{} | {} | {} | {}",
            self.name,
            self.nullable,
            self.first.join(", "),
            self.follow.join(", ")
        )
    }
    fn to_latex(&self) -> String {
        fn f(a: &[&str]) -> String {
            a.iter()
                .map(|s| escape::tex(*s))
                .collect::<Vec<_>>()
                .join(r"\ ")
                .replace(EPSILON, r"$\epsilon$")
        }

        format!(
            "{} & {} & {} & {}",
            escape::tex(self.name),
            self.nullable,
            f(&self.first),
            f(&self.follow)
        )
    }
}

#[derive(Serialize)]
pub struct NonTerminalOutputVec<'a> {
    data: Vec<NonTerminalOutput<'a>>,
}

impl NonTerminalOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        self.data
            .iter()
            .map(|s| s.to_plaintext())
            .collect::<Vec<String>>()
            .join("\n")
    }
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
    pub fn to_latex(&self) -> String {
        let content = self
            .data
            .iter()
            .map(|e| e.to_latex())
            .collect::<Vec<_>>()
            .join("\\\\\n ");

        "\\begin{tabular}{c|c|c|c}\n".to_string()
            + "Symbol & Nullable & First & Follow\\\\\\hline\n"
            + &content
            + "\\\\\n\\end{tabular}"
    }
}

impl Grammar {
    pub fn to_non_terminal_output_vec(
        &self,
        sets: &NullableFirstFollow,
    ) -> NonTerminalOutputVec<'_> {
        let data = self
            .non_terminal_iter()
            .map(|nt| {
                let mut first = self.set_to_names(&sets.first[nt.index]);
                if sets.nullable[nt.index] {
                    first.push(EPSILON);
                }
                NonTerminalOutput {
                    name: nt.name.as_str(),
                    nullable: sets.nullable[nt.index],
                    first,
                    follow: self.set_to_names(&sets.follow[nt.index]),
                }
            })
            .collect();
        NonTerminalOutputVec { data }
    }
}

#[derive(Serialize)]
struct PredictOutput<'a> {
    production: ProductionOutput<'a>,
    predict: Vec<&'a str>,
}

#[derive(Serialize)]
pub struct PredictOutputVec<'a> {
    data: Vec<PredictOutput<'a>>,
    #[serde(skip)]
    terminals: HashSet<&'a str>,
}

impl PredictOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        let left_max_len = self
            .data
            .iter()
            .map(|p| p.production.left.len())
            .max()
            .unwrap_or(0);
        self.data
            .iter()
            .map(|p| {
                format!(
                    "{} | {}",
                    p.production.to_plaintext(left_max_len, false),
                    p.predict.join(", ")
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_latex(&self) -> String {
        let content = self
            .data
            .iter()
            .map(|p| {
                format!(
                    "${}$ & {}",
                    p.production.to_latex(false, &self.terminals),
                    p.predict
                        .iter()
                        .map(|s| escape::tex(*s))
                        .collect::<Vec<_>>()
                        .join(r"\ ")
                )
            })
            .collect::<Vec<_>>()
            .join("\\\\\n ");

        "\\begin{tabular}{l|l}\n".to_string()
            + "Production & Predict\\\\\\hline\n"
            + &content
            + "\\\\\n\\end{tabular}"
    }
}

impl Grammar {
    pub fn to_predict_output_vec(&self, analysis: &Analysis) -> PredictOutputVec<'_> {
        let data = self
            .productions
            .iter()
            .map(|p| PredictOutput {
                production: ProductionOutput {
                    left: self.non_terminals[p.left].name.as_str(),
                    rights: vec![self.production_to_vec_str(p)],
                },
                predict: self.set_to_names(&analysis.predict[p.index]),
            })
            .collect();
        PredictOutputVec {
            data,
            terminals: self.terminal_name_set(),
        }
    }
}

#[derive(Serialize)]
struct AmbiguityOutput<'a> {
    non_terminal: &'a str,
    lookahead: &'a str,
    productions: Vec<ProductionOutput<'a>>,
}

#[derive(Serialize)]
pub struct AmbiguityOutputVec<'a> {
    data: Vec<AmbiguityOutput<'a>>,
    #[serde(skip)]
    terminals: HashSet<&'a str>,
}

impl AmbiguityOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        if self.data.is_empty() {
            return "no LL(1) conflicts".to_string();
        }
        self.data
            .iter()
            .map(|a| {
                format!(
                    "{} on {}: {}",
                    a.non_terminal,
                    a.lookahead,
                    a.productions
                        .iter()
                        .map(|p| p.to_plaintext(0, false))
                        .collect::<Vec<_>>()
                        .join("; ")
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_latex(&self) -> String {
        if self.data.is_empty() {
            return "no LL(1) conflicts".to_string();
        }
        let items = self
            .data
            .iter()
            .map(|a| {
                format!(
                    "\\item ${}$ on \\texttt{{{}}}: {}",
                    escape::tex(a.non_terminal),
                    escape::tex(a.lookahead),
                    a.productions
                        .iter()
                        .map(|p| format!("${}$", p.to_latex(false, &self.terminals)))
                        .collect::<Vec<_>>()
                        .join("; ")
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("\\begin{{itemize}}\n{}\n\\end{{itemize}}", items)
    }
}

impl Grammar {
    pub fn to_ambiguity_output_vec(&self, analysis: &Analysis) -> AmbiguityOutputVec<'_> {
        let data = analysis
            .ambiguities
            .iter()
            .map(|a| AmbiguityOutput {
                non_terminal: self.non_terminals[a.non_terminal].name.as_str(),
                lookahead: self.get_symbol_name(a.lookahead),
                productions: a
                    .productions
                    .iter()
                    .map(|&idx| {
                        let p = &self.productions[idx];
                        ProductionOutput {
                            left: self.non_terminals[p.left].name.as_str(),
                            rights: vec![self.production_to_vec_str(p)],
                        }
                    })
                    .collect(),
            })
            .collect();
        AmbiguityOutputVec {
            data,
            terminals: self.terminal_name_set(),
        }
    }
}
