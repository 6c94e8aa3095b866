//! Transition representation

use crate::state_machine::StateId;
use crate::{Error, Result};
use serde::Serialize;
use std::fmt;

/// A labeled transition between two states.
///
/// Carries an ordered, non-empty list of labels. Several grammar rules landing on
/// the same (source, target) pair are represented as several labels on one
/// transition rather than as parallel edges.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Transition {
    from_state: StateId,
    to_state: StateId,
    labels: Vec<String>,
}

impl Transition {
    /// Create a transition with one or more labels, preserving their order.
    pub fn new(
        from_state: impl Into<StateId>,
        to_state: impl Into<StateId>,
        labels: Vec<String>,
    ) -> Result<Self> {
        let (from_state, to_state) = (from_state.into(), to_state.into());
        if labels.is_empty() {
            return Err(Error::contract(format!(
                "transition {} -> {} has no labels",
                from_state, to_state
            )));
        }
        Ok(Self {
            from_state,
            to_state,
            labels,
        })
    }

    /// Create a transition carrying a single label
    pub fn labeled(
        from_state: impl Into<StateId>,
        to_state: impl Into<StateId>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            from_state: from_state.into(),
            to_state: to_state.into(),
            labels: vec![label.into()],
        }
    }

    pub fn add_label(&mut self, label: impl Into<String>) {
        self.labels.push(label.into());
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.add_label(label);
        self
    }

    pub fn from_state(&self) -> &StateId {
        &self.from_state
    }

    pub fn to_state(&self) -> &StateId {
        &self.to_state
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn is_self_loop(&self) -> bool {
        self.from_state == self.to_state
    }

    /// Canonical text form: the bare label, or the bracketed list when there are several.
    pub fn display_label(&self) -> String {
        match self.labels.as_slice() {
            [single] => single.clone(),
            labels => format!("[{}]", labels.join(", ")),
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_labels_rejected() {
        let err = Transition::new("A", "B", Vec::new()).unwrap_err();
        assert!(matches!(err, Error::ContractViolation(_)));
    }

    #[test]
    fn test_display_label() {
        let single = Transition::labeled("A", "B", "open");
        assert_eq!(single.to_string(), "open");

        let multi = Transition::new("A", "B", vec!["open".into(), "reopen".into()]).unwrap();
        assert_eq!(multi.to_string(), "[open, reopen]");
        assert_eq!(multi.with_label("touch").to_string(), "[open, reopen, touch]");
    }

    #[test]
    fn test_equality_uses_label_order() {
        let ab = Transition::new("A", "B", vec!["x".into(), "y".into()]).unwrap();
        let ba = Transition::new("A", "B", vec!["y".into(), "x".into()]).unwrap();
        assert_ne!(ab, ba);
        assert_eq!(ab, Transition::labeled("A", "B", "x").with_label("y"));
    }

    #[test]
    fn test_self_loop() {
        assert!(Transition::labeled("B", "B", "z").is_self_loop());
        assert!(!Transition::labeled("A", "B", "x").is_self_loop());
    }
}
