//! State representation

use serde::{Deserialize, Serialize};

/// Opaque state identifier, unique within a graph
pub type StateId = String;

/// Name of the designated error state when none is configured
pub const DEFAULT_ERROR_STATE: &str = "err";

/// State classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StateClass {
    /// No incoming transitions
    Initial,
    /// Both incoming and outgoing transitions
    Active,
    /// No outgoing transitions (other than self-loops)
    Terminal,
    /// The designated error state
    Error,
    #[default]
    Unknown,
}

impl StateClass {
    pub fn color(&self) -> &'static str {
        match self {
            StateClass::Initial => "lightblue",
            StateClass::Active => "lightgreen",
            StateClass::Terminal => "green",
            StateClass::Error => "red",
            StateClass::Unknown => "gray",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StateClass::Initial => "Initial",
            StateClass::Active => "Active",
            StateClass::Terminal => "Terminal",
            StateClass::Error => "Error",
            StateClass::Unknown => "Unknown",
        }
    }

    /// Topological classification from the degree of a state
    pub fn from_degrees(has_incoming: bool, has_outgoing: bool) -> Self {
        match (has_incoming, has_outgoing) {
            (false, _) => StateClass::Initial,
            (true, false) => StateClass::Terminal,
            (true, true) => StateClass::Active,
        }
    }
}
