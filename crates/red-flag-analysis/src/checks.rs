//! The five red-flag checks as pure functions of comparator output.
//!
//! Every check returns a [`Finding`]; missing inputs and zero denominators
//! produce an insufficient-data finding rather than an error or infinity.

use crate::comparator::YearOverYear;
use analysis_core::{CountTier, Evidence, Finding, Severity, Tier};

fn pct_change(current: f64, previous: f64) -> f64 {
    ((current - previous) / previous) * 100.0
}

/// Severity for quantities where lower is worse
fn below(value: f64, tier: &Tier) -> Severity {
    if value < tier.red {
        Severity::Red
    } else if value < tier.yellow {
        Severity::Yellow
    } else {
        Severity::Green
    }
}

/// Severity for quantities where higher is worse
fn above(value: f64, tier: &Tier) -> Severity {
    if value > tier.red {
        Severity::Red
    } else if value > tier.yellow {
        Severity::Yellow
    } else {
        Severity::Green
    }
}

pub fn revenue_decline(revenue: YearOverYear, tier: &Tier) -> Finding {
    let (current, previous) = match revenue.both() {
        Some((_, previous)) if previous == 0.0 => return Finding::insufficient_data("revenue"),
        Some(pair) => pair,
        None => return Finding::insufficient_data("revenue"),
    };

    let change_pct = pct_change(current, previous);
    let severity = below(change_pct, tier);

    let message = match severity {
        Severity::Red | Severity::Yellow => {
            format!("Revenue declined {:.1}% YoY", change_pct.abs())
        }
        _ if change_pct >= 0.0 => format!("Revenue grew {:.1}% YoY", change_pct),
        _ => format!("Revenue declined only {:.1}% YoY", change_pct.abs()),
    };

    Finding::ok(
        severity,
        message,
        "Revenue (YoY)",
        Evidence::PercentChange { current, previous, change_pct },
    )
}

pub fn margin_compression(revenue: YearOverYear, operating_income: YearOverYear, tier: &Tier) -> Finding {
    let (Some((revenue_cur, revenue_prev)), Some((opinc_cur, opinc_prev))) =
        (revenue.both(), operating_income.both())
    else {
        return Finding::insufficient_data("operating margin");
    };

    if revenue_cur == 0.0 || revenue_prev == 0.0 {
        return Finding::insufficient_data("margin (revenue zero)");
    }

    let current_margin = (opinc_cur / revenue_cur) * 100.0;
    let previous_margin = (opinc_prev / revenue_prev) * 100.0;
    let change_pp = current_margin - previous_margin;
    let severity = below(change_pp, tier);

    let message = match severity {
        Severity::Red | Severity::Yellow => {
            format!("Operating margin declined {:.1}pp", change_pp.abs())
        }
        _ if change_pp >= 0.0 => format!("Operating margin improved {:.1}pp", change_pp),
        _ => format!("Operating margin declined only {:.1}pp", change_pp.abs()),
    };

    Finding::ok(
        severity,
        message,
        "Operating Margin (YoY)",
        Evidence::MarginChange { current_margin, previous_margin, change_pp },
    )
}

/// Total debt is long-term plus current; a missing component counts as zero,
/// but a zero total in either period makes the comparison meaningless.
pub fn debt_explosion(long_term: YearOverYear, current_portion: YearOverYear, tier: &Tier) -> Finding {
    let total_current = long_term.current.unwrap_or(0.0) + current_portion.current.unwrap_or(0.0);
    let total_previous = long_term.previous.unwrap_or(0.0) + current_portion.previous.unwrap_or(0.0);

    if total_current == 0.0 || total_previous == 0.0 {
        return Finding::insufficient_data("debt");
    }

    let change_pct = pct_change(total_current, total_previous);
    let severity = above(change_pct, tier);

    let message = match severity {
        Severity::Red | Severity::Yellow => format!("Total debt increased {:.1}%", change_pct),
        _ if change_pct < 0.0 => format!("Total debt decreased {:.1}%", change_pct.abs()),
        _ => format!("Total debt increased only {:.1}%", change_pct),
    };

    Finding::ok(
        severity,
        message,
        "Total Debt (YoY)",
        Evidence::PercentChange {
            current: total_current,
            previous: total_previous,
            change_pct,
        },
    )
}

/// Length of the current run of negative values, newest first
pub fn negative_streak(values: &[f64]) -> usize {
    values.iter().take_while(|v| **v < 0.0).count()
}

pub fn negative_cash_flow(quarterly: &[f64], tier: &CountTier) -> Finding {
    if quarterly.len() < 2 {
        return Finding::insufficient_data("cash flow");
    }

    let negative_quarters = negative_streak(quarterly);

    let (severity, message) = if negative_quarters >= tier.red {
        (
            Severity::Red,
            format!("{} consecutive quarters with negative OCF", negative_quarters),
        )
    } else if negative_quarters >= tier.yellow {
        (
            Severity::Yellow,
            format!("{} quarters with negative OCF", negative_quarters),
        )
    } else if negative_quarters == 0 {
        (Severity::Green, "Operating cash flow is positive".to_string())
    } else {
        (Severity::Green, "Latest quarter had negative OCF".to_string())
    };

    Finding::ok(
        severity,
        message,
        "Operating Cash Flow",
        Evidence::NegativeStreak {
            negative_quarters,
            latest_values: quarterly.iter().take(4).copied().collect(),
        },
    )
}

/// Current ratio from the latest current assets and liabilities
pub fn liquidity_deterioration(assets: YearOverYear, liabilities: YearOverYear, tier: &Tier) -> Finding {
    let (Some(current_assets), Some(current_liabilities)) = (assets.current, liabilities.current) else {
        return Finding::insufficient_data("liquidity");
    };

    if current_liabilities == 0.0 {
        return Finding::insufficient_data("liquidity (liabilities zero)");
    }

    let ratio = current_assets / current_liabilities;
    let severity = below(ratio, tier);

    let message = match severity {
        Severity::Red => format!("Current Ratio = {:.2} (< {:.1}) - Liquidity risk", ratio, tier.red),
        Severity::Yellow => format!("Current Ratio = {:.2} - Tight liquidity", ratio),
        _ => format!("Current Ratio = {:.2} - Healthy liquidity", ratio),
    };

    Finding::ok(
        severity,
        message,
        "Current Ratio",
        Evidence::Ratio {
            numerator: current_assets,
            denominator: current_liabilities,
            ratio,
        },
    )
}
