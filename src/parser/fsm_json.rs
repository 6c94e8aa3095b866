//! JSON FSM description loader
//!
//! ```json
//! {
//!   "states": [{ "name": "locked" }, { "name": "unlocked" }],
//!   "transitions": [
//!     { "name": "unlock", "sourceState": { "name": "locked" }, "targetState": { "name": "unlocked" } }
//!   ]
//! }
//! ```

use crate::parser::GraphSource;
use crate::state_machine::StateGraph;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FsmDocument {
    #[serde(default)]
    pub states: Vec<StateRef>,
    #[serde(default)]
    pub transitions: Vec<TransitionDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionDef {
    pub name: String,
    pub source_state: StateRef,
    pub target_state: StateRef,
}

/// Parser for JSON FSM descriptions
pub struct FsmJsonParser {
    source_name: String,
}

impl FsmJsonParser {
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
        }
    }

    /// Build a graph from an already-decoded document
    pub fn build(&self, document: &FsmDocument) -> Result<StateGraph> {
        let mut graph = StateGraph::new();
        for state in &document.states {
            graph.add_state(state.name.clone());
        }
        for (idx, transition) in document.transitions.iter().enumerate() {
            for endpoint in [&transition.source_state, &transition.target_state] {
                if !graph.contains_state(&endpoint.name) {
                    return Err(Error::parse(
                        self.source_name.clone(),
                        0,
                        format!(
                            "transition #{} ({}) refers to undeclared state {:?}",
                            idx, transition.name, endpoint.name
                        ),
                    ));
                }
            }
            graph.add_labeled_transition(
                transition.source_state.name.clone(),
                transition.target_state.name.clone(),
                transition.name.clone(),
            );
        }
        Ok(graph)
    }
}

impl GraphSource for FsmJsonParser {
    fn parse_graph(&self, input: &str) -> Result<StateGraph> {
        let document: FsmDocument = serde_json::from_str(input).map_err(|e| {
            Error::parse(self.source_name.clone(), e.line(), e.to_string())
        })?;
        self.build(&document)
    }
}
