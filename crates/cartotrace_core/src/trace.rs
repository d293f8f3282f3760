use std::{fmt::Display, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Algorithm {
    #[serde(rename = "greedy")]
    Greedy,
    #[serde(rename = "best-first")]
    BestFirst,
    #[serde(rename = "astar")]
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Greedy, Algorithm::BestFirst, Algorithm::AStar];

    pub fn wire_name(&self) -> &'static str {
        match self {
            Algorithm::Greedy => "greedy",
            Algorithm::BestFirst => "best-first",
            Algorithm::AStar => "astar",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Algorithm::Greedy => "Greedy Best-First Search",
            Algorithm::BestFirst => "Uniform Cost Search (UCS)",
            Algorithm::AStar => "A* Algorithm",
        }
    }

    pub fn evaluation_mode(&self) -> EvaluationMode {
        match self {
            Algorithm::Greedy => EvaluationMode::HeuristicOnly,
            Algorithm::BestFirst => EvaluationMode::CostOnly,
            Algorithm::AStar => EvaluationMode::CostHeuristicSum,
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.wire_name() == s)
            .ok_or_else(|| format!("Unknown algorithm '{s}', expected greedy, best-first or astar"))
    }
}

/// Which candidate scores are meaningful for the algorithm that produced a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationMode {
    /// h(n)
    HeuristicOnly,
    /// g(n)
    CostOnly,
    /// g(n), h(n) and f(n) = g(n) + h(n)
    CostHeuristicSum,
}

impl EvaluationMode {
    pub fn label(&self) -> &'static str {
        match self {
            EvaluationMode::HeuristicOnly => "Greedy BFS",
            EvaluationMode::CostOnly => "UCS",
            EvaluationMode::CostHeuristicSum => "A*",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Candidate {
    pub city: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub g: Option<f64>,

    #[serde(default, alias = "heuristic", skip_serializing_if = "Option::is_none")]
    pub h: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl Candidate {
    /// Accumulated cost, falling back to the edge distance for emitters that only send that.
    pub fn cost(&self) -> Option<f64> {
        self.g.or(self.distance)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TraceStep {
    pub step: usize,

    /// Absent on the synthetic start step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,

    #[serde(default)]
    pub candidates: Vec<Candidate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,

    /// Edge cost incurred by moving from `current` to `next`
    #[serde(default)]
    pub distance: f64,

    /// Heuristic of the chosen successor, when the emitter reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heuristic: Option<f64>,
}

impl TraceStep {
    pub fn chosen_candidate(&self) -> Option<&Candidate> {
        let next = self.next.as_deref()?;
        self.candidates.iter().find(|candidate| candidate.city == next)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename = "Trace")]
pub struct Trace {
    pub steps: Vec<TraceStep>,

    /// `route[i]` is the point visited at step `i`
    pub route: Vec<String>,

    pub total_distance: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<Algorithm>,

    /// Solver wall time in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes_explored: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operations: Option<u64>,
}

impl Trace {
    /// Mode of the producing algorithm when the trace is tagged, `requested` otherwise.
    pub fn evaluation_mode(&self, requested: Algorithm) -> EvaluationMode {
        self.algorithm.unwrap_or(requested).evaluation_mode()
    }
}

pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&schemars::schema_for!(Trace))
}
