use crate::trace::{Candidate, EvaluationMode, TraceStep};

#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    pub label: &'static str,
    pub value: Option<f64>,
}

impl Score {
    fn render(&self) -> String {
        match self.value {
            Some(value) => format!("{} = {:.2} km", self.label, value),
            None => format!("{} = N/A", self.label),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateView {
    pub city: String,
    pub scores: Vec<Score>,
    pub chosen: bool,
}

impl CandidateView {
    fn new(candidate: &Candidate, mode: EvaluationMode, next: Option<&str>) -> Self {
        let scores = match mode {
            EvaluationMode::HeuristicOnly => vec![Score {
                label: "h(n)",
                value: candidate.h,
            }],
            EvaluationMode::CostOnly => vec![Score {
                label: "g(n)",
                value: candidate.cost(),
            }],
            EvaluationMode::CostHeuristicSum => vec![
                Score {
                    label: "g(n)",
                    value: candidate.cost(),
                },
                Score {
                    label: "h(n)",
                    value: candidate.h,
                },
                Score {
                    label: "f(n)",
                    value: candidate.f,
                },
            ],
        };

        CandidateView {
            city: candidate.city.clone(),
            scores,
            chosen: next == Some(candidate.city.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepDetail {
    /// Header only
    Empty,
    Evaluated {
        mode: EvaluationMode,
        candidates: Vec<CandidateView>,
        chosen: Option<Chosen>,
    },
    /// No branching choice, e.g. the closing leg back to the origin
    Returned { to: String, distance: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chosen {
    pub city: String,
    pub heuristic: Option<f64>,
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepLogEntry {
    pub step: usize,
    pub current: Option<String>,
    pub detail: StepDetail,
    active: bool,
}

impl StepLogEntry {
    pub fn from_step(step: &TraceStep, mode: EvaluationMode) -> Self {
        let next = step.next.as_deref();

        let detail = if !step.candidates.is_empty() {
            StepDetail::Evaluated {
                mode,
                candidates: step
                    .candidates
                    .iter()
                    .map(|candidate| CandidateView::new(candidate, mode, next))
                    .collect(),
                chosen: next.map(|city| Chosen {
                    city: city.to_owned(),
                    heuristic: step.heuristic,
                    distance: step.distance,
                }),
            }
        } else if let Some(next) = next {
            StepDetail::Returned {
                to: next.to_owned(),
                distance: step.distance,
            }
        } else {
            StepDetail::Empty
        };

        StepLogEntry {
            step: step.step,
            current: step.current.clone(),
            detail,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn header(&self) -> String {
        format!(
            "Step {}: {}",
            self.step,
            self.current.as_deref().unwrap_or("start")
        )
    }

    pub fn chosen_candidate(&self) -> Option<&CandidateView> {
        match &self.detail {
            StepDetail::Evaluated { candidates, .. } => {
                candidates.iter().find(|candidate| candidate.chosen)
            }
            _ => None,
        }
    }

    /// Body lines under the header.
    pub fn lines(&self) -> Vec<String> {
        match &self.detail {
            StepDetail::Empty => vec![],
            StepDetail::Returned { to, distance } => {
                vec![format!("-> returned to {to} ({distance:.2} km)")]
            }
            StepDetail::Evaluated {
                mode,
                candidates,
                chosen,
            } => {
                let mut lines = vec![format!("Evaluation ({}):", mode.label())];
                for candidate in candidates {
                    let marker = if candidate.chosen { " *" } else { "" };
                    lines.push(format!("  - {}{}", candidate.city, marker));
                    for score in &candidate.scores {
                        lines.push(format!("      {}", score.render()));
                    }
                }

                if let Some(chosen) = chosen {
                    let heuristic = chosen
                        .heuristic
                        .map(|h| format!(" (h={h:.2} km, smallest)"))
                        .unwrap_or_default();
                    lines.push(format!("-> chose {}{}", chosen.city, heuristic));
                    lines.push(format!("   cost {:.2} km", chosen.distance));
                }

                lines
            }
        }
    }
}

/// Textual record of a replay. At most one entry is active: the latest one.
#[derive(Debug, Default)]
pub struct StepLog {
    entries: Vec<StepLogEntry>,
}

impl StepLog {
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Adds `entry` as the active one, deactivating its predecessor.
    pub fn append(&mut self, mut entry: StepLogEntry) -> usize {
        if let Some(previous) = self.entries.last_mut() {
            previous.active = false;
        }

        entry.active = true;
        self.entries.push(entry);
        self.entries.len() - 1
    }

    pub fn deactivate_all(&mut self) {
        for entry in &mut self.entries {
            entry.active = false;
        }
    }

    pub fn entries(&self) -> &[StepLogEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&StepLogEntry> {
        self.entries.last()
    }

    pub fn active_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.active).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{self, candidate};

    fn scored(city: &str, g: f64, h: f64) -> Candidate {
        Candidate {
            city: city.to_string(),
            g: Some(g),
            h: Some(h),
            f: Some(g + h),
            distance: Some(g),
        }
    }

    #[test]
    fn test_start_step_returned_line() {
        let step = test_utils::step(0, None, vec![], Some("A"), 0.0);
        let entry = StepLogEntry::from_step(&step, EvaluationMode::CostOnly);

        assert_eq!(entry.header(), "Step 0: start");
        assert_eq!(entry.lines(), vec!["-> returned to A (0.00 km)"]);
    }

    #[test]
    fn test_header_only_step() {
        let step = test_utils::step(4, Some("B"), vec![], None, 0.0);
        let entry = StepLogEntry::from_step(&step, EvaluationMode::CostOnly);

        assert_eq!(entry.detail, StepDetail::Empty);
        assert_eq!(entry.header(), "Step 4: B");
        assert!(entry.lines().is_empty());
    }

    #[test]
    fn test_cost_only_marks_chosen() {
        let step = test_utils::step(
            1,
            Some("A"),
            vec![candidate("B", 120.0), candidate("C", 90.0)],
            Some("C"),
            90.0,
        );
        let entry = StepLogEntry::from_step(&step, EvaluationMode::CostOnly);

        assert_eq!(entry.chosen_candidate().unwrap().city, "C");
        assert_eq!(
            entry.lines(),
            vec![
                "Evaluation (UCS):",
                "  - B",
                "      g(n) = 120.00 km",
                "  - C *",
                "      g(n) = 90.00 km",
                "-> chose C",
                "   cost 90.00 km",
            ]
        );
    }

    #[test]
    fn test_heuristic_only_shows_missing_values() {
        let step = test_utils::step(1, Some("A"), vec![candidate("B", 120.0)], None, 0.0);
        let entry = StepLogEntry::from_step(&step, EvaluationMode::HeuristicOnly);

        assert_eq!(entry.chosen_candidate(), None);
        assert_eq!(
            entry.lines(),
            vec!["Evaluation (Greedy BFS):", "  - B", "      h(n) = N/A"]
        );
    }

    #[test]
    fn test_cost_heuristic_sum() {
        let mut step = test_utils::step(
            2,
            Some("A"),
            vec![scored("B", 10.0, 5.5), scored("C", 12.0, 1.0)],
            Some("C"),
            12.0,
        );
        step.heuristic = Some(1.0);
        let entry = StepLogEntry::from_step(&step, EvaluationMode::CostHeuristicSum);

        let lines = entry.lines();
        assert_eq!(lines[0], "Evaluation (A*):");
        assert_eq!(lines[2], "      g(n) = 10.00 km");
        assert_eq!(lines[3], "      h(n) = 5.50 km");
        assert_eq!(lines[4], "      f(n) = 15.50 km");
        assert_eq!(lines[5], "  - C *");
        assert_eq!(lines[9], "-> chose C (h=1.00 km, smallest)");
    }

    #[test]
    fn test_single_active_entry() {
        let mut log = StepLog::default();
        for index in 0..3 {
            let step = test_utils::step(index, None, vec![], None, 0.0);
            log.append(StepLogEntry::from_step(&step, EvaluationMode::CostOnly));
            assert_eq!(log.active_count(), 1);
            assert!(log.latest().unwrap().is_active());
        }

        log.deactivate_all();
        assert_eq!(log.active_count(), 0);
        assert_eq!(log.len(), 3);
    }
}
