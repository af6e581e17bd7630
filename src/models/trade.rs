//! Trade entity models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Market;

/// Trade direction.
///
/// Mutation payloads encode this as a numeric code (1 = buy, anything
/// else = sell); loaded trade records use the string form. Both are
/// resolved to this enum at the deserialization boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Decodes the numeric side code used by mutation payloads.
    pub fn from_code(code: i64) -> Self {
        if code == 1 { Side::Buy } else { Side::Sell }
    }
}

/// A single buy or sell order as held by the store.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Trade {
    pub id: u64,
    #[serde(rename = "type")]
    pub side: Side,
    pub price: Decimal,
    #[serde(default)]
    pub amount: Decimal,
    /// Quantity bought per unit spent, `amount / price`.
    #[serde(default)]
    pub total: Decimal,
    /// Market snapshot taken when the trade was recorded.
    pub market: Market,
    /// User that created the trade, when known.
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub status: String,
}

/// Buy and sell sequences held side by side.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TradeBook {
    #[serde(default)]
    pub buys: Vec<Trade>,
    #[serde(default)]
    pub sells: Vec<Trade>,
}

impl TradeBook {
    /// Mutable access to the sequence holding the given side.
    pub fn side_mut(&mut self, side: Side) -> &mut Vec<Trade> {
        match side {
            Side::Buy => &mut self.buys,
            Side::Sell => &mut self.sells,
        }
    }

    /// Read access to the sequence holding the given side.
    pub fn side(&self, side: Side) -> &[Trade] {
        match side {
            Side::Buy => &self.buys,
            Side::Sell => &self.sells,
        }
    }
}
