use super::types::{AllocationTarget, RiskTolerance};

const CONSERVATIVE: AllocationTarget = AllocationTarget {
    stocks: 30,
    bonds: 50,
    real_estate: 10,
    cash: 10,
};

const MODERATE: AllocationTarget = AllocationTarget {
    stocks: 50,
    bonds: 30,
    real_estate: 15,
    cash: 5,
};

const AGGRESSIVE: AllocationTarget = AllocationTarget {
    stocks: 70,
    bonds: 15,
    real_estate: 10,
    cash: 5,
};

pub fn allocation_for(risk: RiskTolerance) -> AllocationTarget {
    match risk {
        RiskTolerance::Conservative => CONSERVATIVE,
        RiskTolerance::Moderate => MODERATE,
        RiskTolerance::Aggressive => AGGRESSIVE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tier_sums_to_one_hundred() {
        for risk in [
            RiskTolerance::Conservative,
            RiskTolerance::Moderate,
            RiskTolerance::Aggressive,
        ] {
            assert_eq!(allocation_for(risk).total(), 100, "{risk:?}");
        }
    }

    #[test]
    fn stock_share_grows_with_risk() {
        let conservative = allocation_for(RiskTolerance::Conservative);
        let moderate = allocation_for(RiskTolerance::Moderate);
        let aggressive = allocation_for(RiskTolerance::Aggressive);
        assert!(conservative.stocks < moderate.stocks);
        assert!(moderate.stocks < aggressive.stocks);
        assert_eq!(
            moderate,
            AllocationTarget {
                stocks: 50,
                bonds: 30,
                real_estate: 15,
                cash: 5
            }
        );
    }
}
