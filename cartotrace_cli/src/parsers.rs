use std::time::Duration;

use cartotrace_core::trace::Algorithm;
use jiff::{SignedDuration, Span, SpanRelativeTo};

/// Step delays and timeouts: bare seconds (`"0.5"`), friendly (`"1.2s"`, `"2m 30s"`) or
/// ISO 8601 (`"PT2S"`). Negative values are rejected.
pub fn parse_std_duration(input: &str) -> Result<Duration, String> {
    let input = input.trim();

    let signed = match input.parse::<f64>() {
        Ok(seconds) => SignedDuration::try_from_secs_f64(seconds).map_err(|err| err.to_string())?,
        Err(_) => input
            .parse::<SignedDuration>()
            .or_else(|_| {
                input
                    .parse::<Span>()
                    .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
            })
            .map_err(|_| format!("Invalid duration '{input}'"))?,
    };

    if signed.is_negative() {
        return Err(format!("Duration '{input}' must not be negative"));
    }

    Ok(signed.unsigned_abs())
}

pub fn parse_algorithm(input: &str) -> Result<Algorithm, String> {
    input.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_std_duration() {
        assert_eq!(parse_std_duration("1.2s"), Ok(Duration::from_millis(1200)));
        assert_eq!(parse_std_duration("PT2S"), Ok(Duration::from_secs(2)));
        assert_eq!(parse_std_duration("2"), Ok(Duration::from_secs(2)));
        assert_eq!(parse_std_duration("0.5"), Ok(Duration::from_millis(500)));
        assert_eq!(parse_std_duration("2m 30s"), Ok(Duration::from_secs(150)));
        assert!(parse_std_duration("-3s").is_err());
        assert!(parse_std_duration("-0.5").is_err());
        assert!(parse_std_duration("NaN").is_err());
        assert!(parse_std_duration("soon").is_err());
    }

    #[test]
    fn test_parse_algorithm() {
        assert_eq!(parse_algorithm("astar"), Ok(Algorithm::AStar));
        assert_eq!(parse_algorithm("best-first"), Ok(Algorithm::BestFirst));
        assert!(parse_algorithm("dijkstra").is_err());
    }
}
