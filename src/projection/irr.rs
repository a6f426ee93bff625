//! Internal Rate of Return (IRR) of equity cashflows

const TOLERANCE: f64 = 1e-10;
const MAX_ITERATIONS: usize = 1000;

/// Bounds on the periodic rate searched
const MIN_RATE: f64 = -0.99;
const MAX_RATE: f64 = 10.0;

/// Calculate the IRR of a series of evenly spaced cashflows.
///
/// Newton-Raphson from a 5% annual guess, falling back to bisection when
/// the derivative vanishes or the iteration does not settle.
///
/// # Arguments
/// * `cashflows` - Cashflow per period, first entry at t = 0 (negative = outflow)
/// * `periods_per_year` - 1 for yearly series, 12 for monthly
///
/// # Returns
/// Annual rate as a decimal, or `None` when the series has no sign change
pub fn calculate_irr(cashflows: &[f64], periods_per_year: u32) -> Option<f64> {
    if cashflows.is_empty() {
        return None;
    }
    if cashflows.iter().all(|cf| cf.abs() < TOLERANCE) {
        return Some(0.0);
    }

    let has_inflow = cashflows.iter().any(|&cf| cf > TOLERANCE);
    let has_outflow = cashflows.iter().any(|&cf| cf < -TOLERANCE);
    if !has_inflow || !has_outflow {
        return None;
    }

    let annualize = |periodic: f64| (1.0 + periodic).powi(periods_per_year as i32) - 1.0;

    let mut rate = 0.05 / periods_per_year as f64;
    for _ in 0..MAX_ITERATIONS {
        let (npv, slope) = npv_with_slope(cashflows, rate);
        if slope.abs() < 1e-20 {
            break;
        }

        let next = (rate - npv / slope).clamp(MIN_RATE, MAX_RATE);
        if (next - rate).abs() < TOLERANCE {
            return Some(annualize(next));
        }
        rate = next;
    }

    bisect(cashflows).map(annualize)
}

/// Yearly equity IRR: outlay at year 0, net income each year, and the
/// terminal liquidation value added to the final year
pub fn equity_irr(initial_cash_outlay: f64, net_incomes: &[f64], terminal_value: f64) -> Option<f64> {
    if net_incomes.is_empty() {
        return None;
    }

    let mut flows = Vec::with_capacity(net_incomes.len() + 1);
    flows.push(-initial_cash_outlay);
    flows.extend_from_slice(net_incomes);
    if let Some(last) = flows.last_mut() {
        *last += terminal_value;
    }
    calculate_irr(&flows, 1)
}

fn npv(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

fn npv_with_slope(cashflows: &[f64], rate: f64) -> (f64, f64) {
    cashflows
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(value, slope), (t, &cf)| {
            let discount = (1.0 + rate).powi(t as i32);
            let d_slope = if t > 0 {
                -(t as f64) * cf / (discount * (1.0 + rate))
            } else {
                0.0
            };
            (value + cf / discount, slope + d_slope)
        })
}

fn bisect(cashflows: &[f64]) -> Option<f64> {
    let mut low = MIN_RATE;
    let mut high = MAX_RATE;
    let mut npv_low = npv(cashflows, low);
    if npv_low * npv(cashflows, high) > 0.0 {
        return None;
    }

    for _ in 0..MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let npv_mid = npv(cashflows, mid);
        if npv_mid.abs() < TOLERANCE || (high - low) / 2.0 < TOLERANCE {
            return Some(mid);
        }
        if npv_mid * npv_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }
    None
}
