//! Naive portfolio valuation: held quantity × current price.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::RateSnapshot;

/// One valued position.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionValue {
    pub ticker: String,
    pub quantity: Decimal,
    /// Current price, if the ticker is present in the snapshot.
    pub price: Option<Decimal>,
    /// `quantity × price`, zero when the price is unknown.
    pub value: Decimal,
}

/// All positions plus their total, in ticker order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PortfolioValuation {
    pub positions: Vec<PositionValue>,
    pub total: Decimal,
}

/// Values every holding against the current snapshot.
///
/// Holdings whose ticker is absent from the snapshot (or when no snapshot
/// has arrived yet) are listed with an unknown price and a zero value.
pub fn value(
    holdings: &BTreeMap<String, Decimal>,
    snapshot: Option<&RateSnapshot>,
) -> PortfolioValuation {
    let mut positions = Vec::with_capacity(holdings.len());
    let mut total = Decimal::ZERO;

    for (ticker, &quantity) in holdings {
        let price = snapshot.and_then(|s| s.get(ticker));
        let value = price.map(|p| p * quantity).unwrap_or(Decimal::ZERO);
        total += value;
        positions.push(PositionValue {
            ticker: ticker.clone(),
            quantity,
            price,
            value,
        });
    }

    PortfolioValuation { positions, total }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{RateSnapshot, RatesDocument};

    fn snapshot(pairs: &[(&str, &str)]) -> RateSnapshot {
        let rates = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RateSnapshot::parse(RatesDocument {
            currency: "EUR".to_string(),
            rates,
        })
        .unwrap()
    }

    #[test]
    fn values_holdings_against_snapshot() {
        let mut holdings = BTreeMap::new();
        holdings.insert("BTC".to_string(), dec!(0.5));
        holdings.insert("ETH".to_string(), dec!(10));

        let snap = snapshot(&[("BTC", "40000"), ("ETH", "2500")]);
        let valuation = value(&holdings, Some(&snap));

        assert_eq!(valuation.positions.len(), 2);
        assert_eq!(valuation.positions[0].value, dec!(20000));
        assert_eq!(valuation.positions[1].value, dec!(25000));
        assert_eq!(valuation.total, dec!(45000));
    }

    #[test]
    fn missing_ticker_values_at_zero() {
        let mut holdings = BTreeMap::new();
        holdings.insert("DOGE".to_string(), dec!(1000));

        let snap = snapshot(&[("BTC", "40000")]);
        let valuation = value(&holdings, Some(&snap));

        assert_eq!(valuation.positions[0].price, None);
        assert_eq!(valuation.positions[0].value, Decimal::ZERO);
        assert_eq!(valuation.total, Decimal::ZERO);
    }

    #[test]
    fn no_snapshot_values_everything_at_zero() {
        let mut holdings = BTreeMap::new();
        holdings.insert("BTC".to_string(), dec!(1));

        let valuation = value(&holdings, None);
        assert_eq!(valuation.total, Decimal::ZERO);
        assert_eq!(valuation.positions[0].price, None);
    }
}
