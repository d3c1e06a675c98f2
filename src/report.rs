//! Display formatting for cost breakdowns (en-US currency)

use crate::calculator::CostBreakdown;

/// Format an amount as US dollars: `$1,766.07`, `-$12.50`.
///
/// Rounds to cents. Non-finite amounts render as `n/a`.
pub fn format_usd(amount: f64) -> String {
    if !amount.is_finite() {
        return "n/a".to_string();
    }

    let cents = (amount.abs() * 100.0).round();
    let whole = (cents / 100.0).trunc() as u64;
    let fraction = (cents % 100.0) as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0.0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, fraction)
}

/// Whether a program fee is worth showing; Conventional loans finance none
pub fn has_program_fee(fee: f64) -> bool {
    fee > 0.0
}

/// Single fee line for a program fee preview
pub fn render_program_fee(fee: f64) -> String {
    if has_program_fee(fee) {
        format!("Funding fee: {}\n", format_usd(fee))
    } else {
        "No financed program fee\n".to_string()
    }
}

/// Render a breakdown as labelled lines, one per amount.
///
/// The MIP line appears only when the breakdown carries a monthly MIP.
pub fn render_breakdown(breakdown: &CostBreakdown) -> String {
    let mut out = String::new();
    let mut line = |label: &str, amount: f64| {
        out.push_str(&format!("{}: {}\n", label, format_usd(amount)));
    };

    line("Loan amount", breakdown.financed_loan_amount);
    if has_program_fee(breakdown.program_fee) {
        line("Funding fee", breakdown.program_fee);
    }
    line("Principal and interest", breakdown.monthly_principal_interest);
    line("Tax", breakdown.monthly_tax);
    if let Some(mip) = breakdown.monthly_mip {
        line("MIP", mip);
    }
    line("Insurance", breakdown.monthly_insurance);
    line("Monthly payment", breakdown.total_monthly_payment);
    line("Income", breakdown.qualifying_annual_income);

    out
}
