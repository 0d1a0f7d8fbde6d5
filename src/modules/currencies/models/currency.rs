use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A currency registered in the ledger
///
/// Payments reference currencies by ISO code; amounts are stored against the
/// registered entity, not the raw code string.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Currency {
    pub id: String,
    pub code: String,
    pub name: String,
    pub digits: u32,
}

impl Currency {
    /// Rounds an amount to this currency's decimal places
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp(self.digits)
    }

    /// Formats an amount for display
    pub fn format_amount(&self, amount: Decimal) -> String {
        format!("{} {:.width$}", self.code, amount, width = self.digits as usize)
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code)
    }
}
