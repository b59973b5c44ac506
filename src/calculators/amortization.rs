// src/calculators/amortization.rs
use crate::calculators::CalcError;

/// Longest loan the schedule will lay out, one row per month.
pub const MAX_TERM_YEARS: u32 = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoanTerms {
    pub principal: f64,
    /// Annual interest rate in percent, e.g. `6.5`.
    pub annual_rate: f64,
    pub years: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRow {
    pub number: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub remaining_balance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AmortizationSchedule {
    pub monthly_payment: f64,
    pub rows: Vec<PaymentRow>,
    pub total_interest: f64,
    pub total_paid: f64,
}

/// Fixed monthly payment for a fully amortizing loan.
pub fn monthly_payment(principal: f64, monthly_rate: f64, months: u32) -> f64 {
    if monthly_rate == 0.0 {
        return principal / f64::from(months);
    }
    let growth = (1.0 + monthly_rate).powi(months as i32);
    principal * monthly_rate * growth / (growth - 1.0)
}

pub fn amortize(terms: &LoanTerms) -> Result<AmortizationSchedule, CalcError> {
    if !terms.principal.is_finite() || terms.principal <= 0.0 {
        return Err(CalcError::NotPositive("loan amount"));
    }
    if terms.years == 0 {
        return Err(CalcError::NotPositive("loan term"));
    }
    if terms.years > MAX_TERM_YEARS {
        return Err(CalcError::OutOfRange("loan term"));
    }
    if !terms.annual_rate.is_finite() || terms.annual_rate < 0.0 {
        return Err(CalcError::OutOfRange("interest rate"));
    }

    let monthly_rate = terms.annual_rate / 100.0 / 12.0;
    let months = terms.years * 12;
    let payment = monthly_payment(terms.principal, monthly_rate, months);

    let mut balance = terms.principal;
    let mut total_interest = 0.0;
    let mut rows = Vec::with_capacity(months as usize);
    for number in 1..=months {
        let interest = balance * monthly_rate;
        let principal = payment - interest;
        balance -= principal;
        total_interest += interest;
        rows.push(PaymentRow {
            number,
            payment,
            principal,
            interest,
            remaining_balance: balance.max(0.0),
        });
    }

    Ok(AmortizationSchedule {
        monthly_payment: payment,
        rows,
        total_interest,
        total_paid: payment * f64::from(months),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rate_splits_the_principal_evenly() {
        let s = amortize(&LoanTerms {
            principal: 12_000.0,
            annual_rate: 0.0,
            years: 1,
        })
        .unwrap();
        assert_eq!(s.monthly_payment, 1_000.0);
        assert_eq!(s.rows.len(), 12);
        assert_eq!(s.total_interest, 0.0);
        assert_eq!(s.rows[11].remaining_balance, 0.0);
    }

    #[test]
    fn standard_thirty_year_loan() {
        let s = amortize(&LoanTerms {
            principal: 100_000.0,
            annual_rate: 6.0,
            years: 30,
        })
        .unwrap();
        assert!((s.monthly_payment - 599.55).abs() < 0.01, "{}", s.monthly_payment);
        assert_eq!(s.rows.len(), 360);
        assert!((s.rows[0].interest - 500.0).abs() < 1e-9);
        assert!(s.rows[359].remaining_balance < 0.01);
        assert!((s.total_interest - 115_838.19).abs() < 1.0, "{}", s.total_interest);
    }

    #[test]
    fn rejects_non_positive_terms() {
        let bad_principal = LoanTerms {
            principal: 0.0,
            annual_rate: 5.0,
            years: 10,
        };
        assert_eq!(
            amortize(&bad_principal),
            Err(CalcError::NotPositive("loan amount"))
        );

        let bad_term = LoanTerms {
            principal: 1_000.0,
            annual_rate: 5.0,
            years: 0,
        };
        assert_eq!(amortize(&bad_term), Err(CalcError::NotPositive("loan term")));

        let bad_rate = LoanTerms {
            principal: 1_000.0,
            annual_rate: -1.0,
            years: 1,
        };
        assert_eq!(amortize(&bad_rate), Err(CalcError::OutOfRange("interest rate")));
    }
}
