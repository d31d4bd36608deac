//! Billing-type labels for customer savings.

use rust_decimal::Decimal;
use rusty_money::iso::Currency;

use crate::{
    products::BillingType,
    report::{ReportError, money_cell},
};

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Annual savings for monthly products with positive savings.
pub fn annual_savings(savings: Decimal, billing_type: BillingType) -> Option<Decimal> {
    match billing_type {
        BillingType::Monthly if savings > Decimal::ZERO => Some(savings * MONTHS_PER_YEAR),
        _ => None,
    }
}

/// Savings as shown in a line-item table.
///
/// Monthly savings are suffixed `/mo` and, when positive, followed by the
/// yearly figure on a second line.
///
/// # Errors
///
/// Returns a [`ReportError`] if an amount cannot be shown as money.
pub fn savings_label(
    savings: Decimal,
    billing_type: BillingType,
    currency: &'static Currency,
) -> Result<String, ReportError> {
    let amount = money_cell(savings, currency)?;

    let label = match (billing_type, annual_savings(savings, billing_type)) {
        (BillingType::Monthly, Some(annual)) => {
            format!("{amount}/mo\n({}/yr)", money_cell(annual, currency)?)
        }
        (BillingType::Monthly, None) => format!("{amount}/mo"),
        (BillingType::OneTime, _) => amount,
    };

    Ok(label)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn annual_only_for_positive_monthly_savings() {
        assert_eq!(annual_savings(dec!(20), BillingType::Monthly), Some(dec!(240)));
        assert_eq!(annual_savings(dec!(0), BillingType::Monthly), None);
        assert_eq!(annual_savings(dec!(-5), BillingType::Monthly), None);
        assert_eq!(annual_savings(dec!(20), BillingType::OneTime), None);
    }

    #[test]
    fn labels_by_billing_type() -> TestResult {
        assert_eq!(
            savings_label(dec!(20), BillingType::Monthly, GBP)?,
            "£20.00/mo\n(£240.00/yr)"
        );
        assert_eq!(savings_label(dec!(0), BillingType::Monthly, GBP)?, "£0.00/mo");
        assert_eq!(savings_label(dec!(20), BillingType::OneTime, GBP)?, "£20.00");

        Ok(())
    }
}
