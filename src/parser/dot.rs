//! Transition-list ingestion
//!
//! Reads lines of the form `source -> target [ label="L" ];`. Anything else (graph
//! headers, node attribute lines, blank lines) is skipped.

use crate::Result;
use crate::parser::GraphSource;
use crate::state_machine::StateGraph;
use regex::Regex;
use std::sync::LazyLock;

static TRANSITION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(.+) -> (.+) \[ label="([^"]+)" \];"#).expect("transition pattern is valid")
});

/// Parser for DOT-style transition lists
///
/// Lines naming an already linked (source, target) pair add their label to that
/// transition. A label the transition already carries is not added again, so a
/// repeated line is ingested once.
pub struct DotParser {
    source_name: String,
}

impl DotParser {
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
        }
    }
}

impl Default for DotParser {
    fn default() -> Self {
        Self::new("<input>")
    }
}

fn clean(raw: &str) -> String {
    raw.trim().replace('"', "")
}

impl GraphSource for DotParser {
    fn parse_graph(&self, input: &str) -> Result<StateGraph> {
        let mut graph = StateGraph::new();
        for (line_no, line) in input.lines().enumerate() {
            let Some(caps) = TRANSITION_LINE.captures(line) else {
                if line.contains("->") {
                    tracing::warn!(
                        "{}:{}: skipping unrecognised transition line",
                        self.source_name,
                        line_no + 1
                    );
                }
                continue;
            };
            let (source, target, label) = (clean(&caps[1]), clean(&caps[2]), clean(&caps[3]));
            graph.add_state(source.clone());
            graph.add_state(target.clone());
            graph.add_labeled_transition(source, target, label);
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_transition_list() {
        let input = r#"digraph G {
  "Not Studying" -> "Studying" [ label="study" ];
  "Studying" -> "Playing" [ label="quit" ];
  "Playing" -> "Sleeping" [ label="nap" ];
}
"#;
        let graph = DotParser::default().parse_graph(input).unwrap();
        assert_eq!(
            graph.to_string(),
            "([Not Studying, Studying, Playing, Sleeping], \
             [study=(Not Studying,Studying), quit=(Studying,Playing), nap=(Playing,Sleeping)])"
        );
    }

    #[test]
    fn test_labels_merge_per_pair() {
        let input = "A -> B [ label=\"open\" ];\nA -> B [ label=\"reopen\" ];\nB -> err [ label=\"read\" ];\n";
        let graph = DotParser::default().parse_graph(input).unwrap();
        assert_eq!(graph.transition_count(), 2);
        assert_eq!(graph.to_string(), "([A, B, err], [[open, reopen]=(A,B), read=(B,err)])");
    }

    #[test]
    fn test_repeated_line_ingested_once() {
        let input = "A -> B [ label=\"open\" ];\nA -> B [ label=\"open\" ];\n";
        let graph = DotParser::default().parse_graph(input).unwrap();
        let transition = graph.transition_between("A", "B").unwrap();
        assert_eq!(transition.labels(), ["open"]);
        assert_eq!(graph.to_string(), "([A, B], [open=(A,B)])");
    }

    #[test]
    fn test_ignores_other_lines() {
        let input = "digraph G {\n  A [fillcolor=\"red\"];\n  A -> B;\n}\n";
        let graph = DotParser::default().parse_graph(input).unwrap();
        assert_eq!(graph.state_count(), 0);
    }
}
