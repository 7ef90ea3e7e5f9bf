use std::fmt;
use std::str::FromStr;

use anyhow::bail;

/// On-field tactical role with its own attribute weighting.
///
/// Declaration order is the report's column order, so `Ord` follows it too.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Position {
    WCB,
    CB,
    BPD,
    IWD,
    RPM,
    DM,
    WB,
    IW,
    IF,
    CF,
    GK,
}

impl Position {
    pub const ALL: [Position; 11] = [
        Position::WCB,
        Position::CB,
        Position::BPD,
        Position::IWD,
        Position::RPM,
        Position::DM,
        Position::WB,
        Position::IW,
        Position::IF,
        Position::CF,
        Position::GK,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Position::WCB => "WCB",
            Position::CB => "CB",
            Position::BPD => "BPD",
            Position::IWD => "IWD",
            Position::RPM => "RPM",
            Position::DM => "DM",
            Position::WB => "WB",
            Position::IW => "IW",
            Position::IF => "IF",
            Position::CF => "CF",
            Position::GK => "GK",
        }
    }

    /// Column name of this position's score, e.g. `BPD_Score`.
    pub fn score_column(self) -> String {
        format!("{}_Score", self.code())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Position {
    type Err = anyhow::Error;

    /// Position codes are matched case-insensitively (`bpd` == `BPD`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match Position::ALL
            .iter()
            .find(|p| p.code().eq_ignore_ascii_case(s))
        {
            Some(p) => Ok(*p),
            None => bail!(
                "unknown position '{}' (expected one of {})",
                s,
                Position::ALL.map(Position::code).join(", ")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_position_case_insensitive() {
        assert_eq!("BPD".parse::<Position>().unwrap(), Position::BPD);
        assert_eq!("iwd".parse::<Position>().unwrap(), Position::IWD);
        assert_eq!(" Gk ".parse::<Position>().unwrap(), Position::GK);
    }

    #[test]
    fn test_parse_unknown_position() {
        let err = "ST".parse::<Position>().unwrap_err();
        assert!(err.to_string().contains("unknown position 'ST'"));
    }

    #[test]
    fn test_score_column() {
        assert_eq!(Position::WCB.score_column(), "WCB_Score");
        assert_eq!(Position::IF.score_column(), "IF_Score");
    }

    #[test]
    fn test_order_matches_all() {
        let mut sorted = Position::ALL;
        sorted.sort();
        assert_eq!(sorted, Position::ALL);
    }
}
