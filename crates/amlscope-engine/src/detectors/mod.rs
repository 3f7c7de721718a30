//! Pattern detectors.
//!
//! Each detector reads the prebuilt transaction graph (and the country
//! store where relevant) and writes findings through
//! [`ScoreBoard::assign_points`](crate::ScoreBoard::assign_points). The
//! engine runs them in a fixed order: geo-risk, smurfing, cycles, layered
//! shells.

mod cycles;
mod geo_risk;
mod layering;
mod smurfing;

pub(crate) use cycles::detect_cycles;
pub(crate) use geo_risk::detect_geo_risk;
pub(crate) use layering::detect_layering;
pub(crate) use smurfing::detect_smurfing;

/// Last four characters of an account id, used in ring identifiers.
pub(crate) fn short_id(account: &str) -> String {
    let count = account.chars().count();
    account.chars().skip(count.saturating_sub(4)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("ACC_12345"), "2345");
        assert_eq!(short_id("AB"), "AB");
        assert_eq!(short_id(""), "");
    }
}
