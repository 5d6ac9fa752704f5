use crate::core::holding::{Holding, Liquidity};

/// Holdings partitioned into assets and liabilities.
///
/// Every input holding lands in exactly one of `assets` or `liabilities`.
/// `liquid` and `illiquid` partition `assets` only. Liabilities carry a
/// liquidity tag but are not split by it. All buckets keep input order.
#[derive(Debug, Clone, Default)]
pub struct Classification<'a> {
    pub assets: Vec<&'a Holding>,
    pub liabilities: Vec<&'a Holding>,
    pub liquid: Vec<&'a Holding>,
    pub illiquid: Vec<&'a Holding>,
}

impl<'a> Classification<'a> {
    pub fn len(&self) -> usize {
        self.assets.len() + self.liabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty() && self.liabilities.is_empty()
    }
}

/// Partition holdings by category and, for assets, by liquidity.
pub fn classify(holdings: &[Holding]) -> Classification<'_> {
    let mut out = Classification::default();

    for holding in holdings {
        if holding.category().is_liability() {
            out.liabilities.push(holding);
            continue;
        }
        out.assets.push(holding);
        match holding.liquidity() {
            Liquidity::Liquid => out.liquid.push(holding),
            Liquidity::Illiquid => out.illiquid.push(holding),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::holding::Category;
    use rust_decimal_macros::dec;

    fn names(bucket: &[&Holding]) -> Vec<String> {
        bucket.iter().map(|h| h.name().to_string()).collect()
    }

    #[test]
    fn test_partition() {
        let holdings = vec![
            Holding::new("mortgage", Category::Liabilities, dec!(500)),
            Holding::new("checking", Category::Cash, dec!(1000)),
            Holding::new("flat", Category::RealEstate, dec!(9000))
                .with_liquidity(Liquidity::Illiquid),
            Holding::new("card", Category::Liabilities, dec!(50))
                .with_liquidity(Liquidity::Illiquid),
            Holding::new("stocks", Category::Securities, dec!(2000)),
        ];

        let c = classify(&holdings);
        assert_eq!(names(&c.assets), ["checking", "flat", "stocks"]);
        assert_eq!(names(&c.liabilities), ["mortgage", "card"]);
        assert_eq!(names(&c.liquid), ["checking", "stocks"]);
        assert_eq!(names(&c.illiquid), ["flat"]);
        assert_eq!(c.len(), holdings.len());
    }

    #[test]
    fn test_empty() {
        let c = classify(&[]);
        assert!(c.is_empty());
        assert!(c.liquid.is_empty());
        assert!(c.illiquid.is_empty());
    }
}
