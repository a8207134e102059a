use crate::models::{Contribution, ContributionType};

pub const PAY_PERIODS_PER_YEAR: f64 = 26.0;
pub const RETIREMENT_AGE: i32 = 65;
pub const ANNUAL_RETURN: f64 = 0.07;

pub fn annualize(contribution: Contribution, salary: f64) -> f64 {
    match contribution.contribution_type {
        ContributionType::Percent => salary * (contribution.value / 100.0),
        ContributionType::Dollar => contribution.value * PAY_PERIODS_PER_YEAR,
    }
}

pub fn incremental_annual(current: Contribution, proposed: Contribution, salary: f64) -> f64 {
    annualize(proposed, salary) - annualize(current, salary)
}

/// Value at retirement of the extra yearly amount implied by `proposed`,
/// invested once a year at a fixed return.
///
/// Only the incremental amount is floored to zero. At or past retirement
/// age a positive increment still goes through the annuity factor and can
/// come out zero or negative.
pub fn compute_future_impact(
    current: Contribution,
    proposed: Contribution,
    age: u32,
    salary: f64,
) -> f64 {
    let incremental = incremental_annual(current, proposed, salary);
    if incremental.is_nan() || incremental <= 0.0 {
        return 0.0;
    }

    let years_to_grow = RETIREMENT_AGE - age.min(i32::MAX as u32) as i32;
    incremental * (((1.0 + ANNUAL_RETURN).powi(years_to_grow) - 1.0) / ANNUAL_RETURN)
}

/// Whole-dollar USD with thousands separators, e.g. `$12,346`.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0".to_string();
    }

    // Sign comes from the unrounded amount, so -0.2 renders as -$0.
    let rounded = amount.round();
    let negative = amount.is_sign_negative();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}
