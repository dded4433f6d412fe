//! Plain-text dashboard for the terminal.

use std::fmt::Write;

use common::config::StrategyConfig;
use common::{Error, Suggestion};
use strategy::ScanReport;

const TITLE: &str = "Kalshi Bet Suggestions — News Sentiment Scanner";
const EMPTY_STATE: &str =
    "No clear edges right now (markets are pretty efficient). Check back later.";
const FETCH_FAILED: &str = "Couldn't reach Kalshi API right now. Try refresh.";

fn pct(p: f64) -> String {
    format!("{:.0}%", p * 100.0)
}

fn header(out: &mut String, cfg: &StrategyConfig) {
    let _ = writeln!(out, "{}", TITLE);
    let _ = writeln!(
        out,
        "Flags bets with ≥{:.0}% edge vs current market price. Not advice — trade at own risk!",
        cfg.edge_threshold * 100.0
    );
    out.push('\n');
}

fn card(out: &mut String, s: &Suggestion, strong_edge: f64) {
    let marker = if s.edge > strong_edge { "🟢" } else { "🟡" };
    let _ = writeln!(out, "{} Buy {} — {}", marker, s.side, s.ticker);
    let _ = writeln!(out, "{}", s.title);
    let _ = writeln!(
        out,
        "Market ≈ {}   |   News est. {}   |   Edge +{}   |   Sentiment {:.2}",
        pct(s.market_prob),
        pct(s.est_prob),
        pct(s.edge),
        s.sentiment
    );
    let _ = writeln!(out, "---");
}

/// Render a completed scan as the dashboard text.
pub fn render_report(report: &ScanReport, cfg: &StrategyConfig) -> String {
    let mut out = String::new();
    header(&mut out, cfg);

    if report.suggestions.is_empty() {
        let _ = writeln!(out, "{}", EMPTY_STATE);
    } else {
        let _ = writeln!(out, "Found {} potential edges!", report.total_found);
        out.push('\n');
        for s in &report.suggestions {
            card(&mut out, s, cfg.strong_edge);
        }
    }

    out.push('\n');
    let _ = writeln!(
        out,
        "Last refresh: {}",
        report.refreshed_at.format("%Y-%m-%d %H:%M UTC")
    );
    out
}

/// Render a scan that could not load the market list.
pub fn render_failure(err: &Error, cfg: &StrategyConfig) -> String {
    let mut out = String::new();
    header(&mut out, cfg);
    let _ = writeln!(out, "{}", FETCH_FAILED);
    let _ = writeln!(out, "({})", err);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use common::Side;
    use strategy::ScanStats;

    fn suggestion(ticker: &str, side: Side, edge: f64) -> Suggestion {
        Suggestion {
            side,
            ticker: ticker.into(),
            title: format!("Will {} resolve?", ticker),
            market_prob: 0.30,
            est_prob: 0.30 + edge,
            edge,
            sentiment: 0.0,
        }
    }

    fn report(suggestions: Vec<Suggestion>, total_found: usize) -> ScanReport {
        ScanReport {
            suggestions,
            total_found,
            stats: ScanStats::default(),
            refreshed_at: Utc.with_ymd_and_hms(2026, 10, 15, 9, 5, 42).unwrap(),
        }
    }

    #[test]
    fn test_cards_and_status_line() {
        let cfg = StrategyConfig::default();
        let out = render_report(
            &report(
                vec![
                    suggestion("KXSTRONG", Side::Yes, 0.20),
                    suggestion("KXMILD", Side::No, 0.10),
                ],
                14,
            ),
            &cfg,
        );

        assert!(out.starts_with(TITLE));
        assert!(out.contains("≥9% edge"));
        assert!(out.contains("Found 14 potential edges!"));
        assert!(out.contains("🟢 Buy YES — KXSTRONG"));
        assert!(out.contains("🟡 Buy NO — KXMILD"));
        assert!(out.contains("Will KXSTRONG resolve?"));
        assert!(out.contains(
            "Market ≈ 30%   |   News est. 50%   |   Edge +20%   |   Sentiment 0.00"
        ));
        assert_eq!(out.matches("---").count(), 2);
        assert!(out.trim_end().ends_with("Last refresh: 2026-10-15 09:05 UTC"));
        assert!(!out.contains(EMPTY_STATE));
    }

    #[test]
    fn test_edge_at_strong_cutoff_is_yellow() {
        let cfg = StrategyConfig::default();
        let out = render_report(&report(vec![suggestion("KXEDGE", Side::Yes, 0.12)], 1), &cfg);
        assert!(out.contains("🟡 Buy YES — KXEDGE"));
    }

    #[test]
    fn test_empty_state() {
        let out = render_report(&report(Vec::new(), 0), &StrategyConfig::default());
        assert!(out.contains(EMPTY_STATE));
        assert!(!out.contains("potential edges"));
        assert!(out.contains("Last refresh: 2026-10-15 09:05 UTC"));
    }

    #[test]
    fn test_failure_message() {
        let out = render_failure(&Error::NoMarkets, &StrategyConfig::default());
        assert!(out.contains(FETCH_FAILED));
        assert!(out.contains("Kalshi returned no open markets"));
    }
}
