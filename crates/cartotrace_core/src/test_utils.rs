use crate::{
    point::Point,
    trace::{Candidate, Trace, TraceStep},
};

pub fn scenario_one() -> Vec<Point> {
    vec![
        Point::new("Hà Nội", 21.0285, 105.8542),
        Point::new("Bangkok", 13.7563, 100.5018),
        Point::new("TP.HCM", 10.8231, 106.6297),
        Point::new("Singapore", 1.3521, 103.8198),
        Point::new("Manila", 14.5995, 120.9842),
    ]
}

pub fn scenario_two() -> Vec<Point> {
    vec![
        Point::new("Hà Nội", 21.0285, 105.8542),
        Point::new("Ninh Bình", 20.2506, 105.9745),
        Point::new("Huế", 16.4637, 107.5909),
        Point::new("Nha Trang", 12.2388, 109.1967),
    ]
}

pub fn abc_points() -> Vec<Point> {
    vec![
        Point::new("A", 10.0, 100.0),
        Point::new("B", 11.0, 103.0),
        Point::new("C", 12.0, 104.0),
    ]
}

pub fn candidate(city: &str, distance: f64) -> Candidate {
    Candidate {
        city: city.to_string(),
        g: None,
        h: None,
        f: None,
        distance: Some(distance),
    }
}

pub fn step(
    step: usize,
    current: Option<&str>,
    candidates: Vec<Candidate>,
    next: Option<&str>,
    distance: f64,
) -> TraceStep {
    TraceStep {
        step,
        current: current.map(str::to_string),
        candidates,
        next: next.map(str::to_string),
        distance,
        heuristic: None,
    }
}

/// Start at A, then choose C over B.
pub fn two_step_trace() -> Trace {
    Trace {
        steps: vec![
            step(0, None, vec![], Some("A"), 0.0),
            step(
                1,
                Some("A"),
                vec![candidate("B", 120.0), candidate("C", 90.0)],
                Some("C"),
                90.0,
            ),
        ],
        route: vec!["A".to_string(), "C".to_string()],
        total_distance: 90.0,
        algorithm: None,
        time: None,
        nodes_explored: None,
        operations: None,
    }
}
