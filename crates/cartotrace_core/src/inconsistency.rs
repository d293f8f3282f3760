use std::fmt::Display;

use fxhash::FxHashSet;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InconsistencyContext {
    Route,
    Current,
    Next,
    Candidate,
}

impl Display for InconsistencyContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                InconsistencyContext::Route => "route",
                InconsistencyContext::Current => "current point",
                InconsistencyContext::Next => "next point",
                InconsistencyContext::Candidate => "candidate",
            }
        )
    }
}

/// The solver referenced a point the city service does not know about.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{context} references unknown point '{name}'")]
pub struct DataInconsistency {
    pub context: InconsistencyContext,
    pub name: String,
}

/// Collects inconsistencies of one operation, reporting each missing name only once.
#[derive(Default)]
pub struct InconsistencyTracker {
    reported: FxHashSet<String>,
    found: Vec<DataInconsistency>,
}

impl InconsistencyTracker {
    pub fn report(&mut self, context: InconsistencyContext, name: &str) {
        if self.reported.contains(name) {
            return;
        }

        let inconsistency = DataInconsistency {
            context,
            name: name.to_owned(),
        };
        warn!("Data inconsistency: {}", inconsistency);

        self.reported.insert(name.to_owned());
        self.found.push(inconsistency);
    }

    pub fn into_found(self) -> Vec<DataInconsistency> {
        self.found
    }
}
