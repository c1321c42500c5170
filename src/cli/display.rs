//! Plain-text rendering for CLI output.

use daoboard::api::types::{Stat, Status, Trend, VoteChoice};
use daoboard::proposals::{Pagination, ProposalSummary};
use daoboard::votes::VoteTally;
use std::time::Duration;

/// Width of the approve/reject bar in characters
const BAR_WIDTH: usize = 30;

/// `66.67%`
pub fn format_percentage(pct: f64) -> String {
    format!("{:.2}%", pct)
}

/// Approve share as a bar, `#` for approve and `-` for the rest.
///
/// With no votes the bar is empty rather than split.
pub fn vote_bar(tally: &VoteTally) -> String {
    if tally.total() == 0 {
        return format!("[{}]", " ".repeat(BAR_WIDTH));
    }
    let filled = ((tally.approve_percentage() / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// Remaining time rounded down to whole minutes, e.g. `1day 2h 5m`
pub fn format_remaining(remaining: Duration) -> String {
    if remaining < Duration::from_secs(60) {
        return "less than a minute".to_string();
    }
    let minutes = Duration::from_secs(remaining.as_secs() / 60 * 60);
    humantime::format_duration(minutes).to_string()
}

pub fn format_status(status: &Status) -> String {
    let arrow = match status.trend() {
        Trend::Up => "▲",
        Trend::Down => "▼",
        Trend::Flat => "■",
    };
    format!("{} ({} {:.2}%)", status.value, arrow, status.growth.abs())
}

pub fn format_stat(stat: &Stat) -> String {
    format!(
        "{} at {}",
        stat.value,
        humantime::format_rfc3339_seconds(stat.timestamp)
    )
}

pub fn format_page_footer(pagination: &Pagination) -> String {
    let mut footer = format!(
        "Page {} of {}",
        if pagination.page_count() == 0 {
            0
        } else {
            pagination.page_index() + 1
        },
        pagination.page_count()
    );
    if pagination.has_previous() {
        footer.push_str(&format!("  (previous: --page {})", pagination.page_index()));
    }
    if pagination.has_next() {
        footer.push_str(&format!("  (next: --page {})", pagination.page_index() + 2));
    }
    footer
}

/// Multi-line card for one proposal
pub fn format_summary(summary: &ProposalSummary) -> String {
    let tally = &summary.tally;
    let mut lines = vec![
        format!(
            "#{} {} [{}] - {}",
            summary.proposal_id, summary.title, summary.proposal_type, summary.status
        ),
        format!("   Proposed by: {} ({})", summary.proposer, summary.transaction_url),
        format!(
            "   Votes: {} Accepted {} ({}) / Rejected {} ({}) / Total {}",
            vote_bar(tally),
            tally.count(&VoteChoice::Approve),
            format_percentage(tally.approve_percentage()),
            tally.count(&VoteChoice::Reject),
            format_percentage(tally.reject_percentage()),
            tally.total()
        ),
    ];

    let description = summary.description.trim();
    if !description.is_empty() {
        lines.extend(description.lines().map(|line| format!("   | {}", line)));
    }
    if !summary.voters.is_empty() {
        lines.push("   Voters:".to_string());
        lines.extend(
            summary
                .voters
                .iter()
                .map(|(voter, choice)| format!("     {:<32} {}", voter.as_str(), choice)),
        );
    }

    if let Some(remaining) = summary.time_remaining {
        lines.push(format!("   Voting ends in {}", format_remaining(remaining)));
    }
    match (&summary.viewer_vote, summary.can_vote) {
        (Some(choice), _) => lines.push(format!("   You voted: {}", choice)),
        (None, true) => lines.push("   You have not voted yet".to_string()),
        (None, false) => {}
    }

    lines.join("\n")
}
