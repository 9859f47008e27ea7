use std::time::Duration;

use crate::domain::run::RunConfig;
use crate::http::FloodReport;
use crate::metrics::AggregationSnapshot;

/// Lines printed before the first batch is sent.
pub(crate) fn banner_lines(run: &RunConfig) -> Vec<String> {
    vec![
        format!("Flooding {}", run.endpoint),
        format!(
            "Running for {} second(s), initiating {} request(s) per second. Total requests sent to server will be {}.",
            run.duration.get(),
            run.requests_per_second.get(),
            run.total_requests()
        ),
    ]
}

/// Share of `part` in `total`, in hundredths of a percent.
///
/// A zero total yields zero rather than an undefined rate.
pub(crate) fn rate_x100(part: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    let scaled = u128::from(part)
        .saturating_mul(10_000)
        .checked_div(u128::from(total))
        .unwrap_or(0);
    u64::try_from(scaled).map_or(u64::MAX, |value| value)
}

fn format_rate(rate_x100: u64) -> String {
    format!("{}.{:02}%", rate_x100 / 100, rate_x100 % 100)
}

fn format_latency(value: Option<Duration>) -> String {
    value.map_or_else(|| "n/a".to_owned(), |value| format!("{:?}", value))
}

pub(crate) fn summary_lines(snapshot: &AggregationSnapshot, flood: &FloodReport) -> Vec<String> {
    let total = snapshot.total();
    let delta = match (snapshot.avg_ttfb, snapshot.avg_ttlb) {
        (Some(ttfb), Some(ttlb)) => Some(ttlb.saturating_sub(ttfb)),
        (None, _) | (_, None) => None,
    };

    let mut lines = vec![
        String::new(),
        format!("Total Requests: {}", total),
        format!("     Successes: {}", snapshot.successes),
        format!("      Failures: {}", snapshot.failures),
        format!(
            "  Success Rate: {}",
            format_rate(rate_x100(snapshot.successes, total))
        ),
        format!(
            "  Failure Rate: {}",
            format_rate(rate_x100(snapshot.failures, total))
        ),
        format!("  Average TTFB: {}", format_latency(snapshot.avg_ttfb)),
        format!("  Average TTLB: {}", format_latency(snapshot.avg_ttlb)),
        format!("         Delta: {}", format_latency(delta)),
    ];

    if total == 0 {
        lines.push("No requests were issued.".to_owned());
    }

    let breakdown = snapshot.breakdown.entries();
    if !breakdown.is_empty() {
        lines.push("Failure breakdown:".to_owned());
        for (label, count) in breakdown {
            lines.push(format!("  {}: {}", label, count));
        }
    }

    if flood.interrupted {
        lines.push(format!(
            "Run interrupted after {} batch(es); {} request(s) abandoned.",
            flood.ticks, flood.abandoned
        ));
    }

    lines
}

pub(crate) fn print_summary(snapshot: &AggregationSnapshot, flood: &FloodReport) {
    for line in summary_lines(snapshot, flood) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::FailureBreakdown;

    fn has_line(lines: &[String], expected: &str) -> bool {
        lines.iter().any(|line| line == expected)
    }

    #[test]
    fn rate_is_zero_without_requests() -> Result<(), String> {
        if rate_x100(0, 0) != 0 {
            return Err("Expected zero rate for zero total".to_owned());
        }
        Ok(())
    }

    #[test]
    fn rate_truncates_to_hundredths() -> Result<(), String> {
        let rate = rate_x100(1, 3);
        if rate != 3_333 {
            return Err(format!("Expected 3333, got {}", rate));
        }
        if format_rate(rate) != "33.33%" {
            return Err(format!("Unexpected rendering {}", format_rate(rate)));
        }
        if format_rate(rate_x100(7, 7)) != "100.00%" {
            return Err("Expected 100.00%".to_owned());
        }
        Ok(())
    }

    #[test]
    fn summary_without_requests_does_not_divide_by_zero() -> Result<(), String> {
        let lines = summary_lines(&AggregationSnapshot::default(), &FloodReport::default());

        for expected in [
            "Total Requests: 0",
            "  Success Rate: 0.00%",
            "  Failure Rate: 0.00%",
            "  Average TTFB: n/a",
            "         Delta: n/a",
            "No requests were issued.",
        ] {
            if !has_line(&lines, expected) {
                return Err(format!("Missing line {:?} in {:?}", expected, lines));
            }
        }
        Ok(())
    }

    #[test]
    fn summary_reports_rates_latencies_and_failures() -> Result<(), String> {
        let snapshot = AggregationSnapshot {
            successes: 3,
            failures: 1,
            avg_ttfb: Some(Duration::from_millis(10)),
            avg_ttlb: Some(Duration::from_millis(25)),
            breakdown: FailureBreakdown {
                transport: 1,
                ..FailureBreakdown::default()
            },
        };
        let lines = summary_lines(&snapshot, &FloodReport::default());

        for expected in [
            "Total Requests: 4",
            "     Successes: 3",
            "      Failures: 1",
            "  Success Rate: 75.00%",
            "  Failure Rate: 25.00%",
            "  Average TTFB: 10ms",
            "  Average TTLB: 25ms",
            "         Delta: 15ms",
            "  transport-error: 1",
        ] {
            if !has_line(&lines, expected) {
                return Err(format!("Missing line {:?} in {:?}", expected, lines));
            }
        }
        if lines.iter().any(|line| line.starts_with("Run interrupted")) {
            return Err("Unexpected interruption note".to_owned());
        }
        Ok(())
    }

    #[test]
    fn summary_notes_interrupted_runs() -> Result<(), String> {
        let flood = FloodReport {
            ticks: 2,
            launched: 4,
            settled: 3,
            abandoned: 1,
            interrupted: true,
        };
        let lines = summary_lines(&AggregationSnapshot::default(), &flood);
        if !has_line(
            &lines,
            "Run interrupted after 2 batch(es); 1 request(s) abandoned.",
        ) {
            return Err(format!("Missing interruption note in {:?}", lines));
        }
        Ok(())
    }
}
