//! Built-in attribute catalog and hand-curated position weight tables.
//!
//! Codes referenced by a table but missing from `ATTRIBUTE_CODES` (`Con`,
//! `Sho`, `OtB`, `One`, `Com`) are kept as authored; startup validation
//! reports them.

use super::position::Position;

/// Attribute columns recognized in a scouting export, in catalog order.
pub const ATTRIBUTE_CODES: [&str; 40] = [
    "1v1", "Acc", "Aer", "Agg", "Agi", "Ant", "Bal", "Bra", "Cmd", "Cnt", //
    "Cmp", "Cro", "Dec", "Det", "Dri", "Fin", "Fir", "Fla", "Han", "Hea", //
    "Jum", "Kic", "Ldr", "Lon", "Mar", "Otb", "Pac", "Pas", "Pos", "Ref", //
    "Sta", "Str", "Tck", "Tea", "Tec", "Thr", "TRO", "Vis", "Wor", "Cor",
];

/// Wide centre-back: marking and tackling first, then recovery pace.
const WCB: &[(&str, f64)] = &[
    ("Mar", 0.12),
    ("Tck", 0.12),
    ("Pas", 0.10),
    ("Pos", 0.10),
    ("Pac", 0.10),
    ("Ant", 0.10),
    ("Str", 0.08),
    ("Sta", 0.08),
    ("Dec", 0.08),
    ("Aer", 0.06),
];

const CB: &[(&str, f64)] = &[
    ("Pos", 0.12),
    ("Mar", 0.12),
    ("Tck", 0.12),
    ("Str", 0.11),
    ("Hea", 0.11),
    ("Ant", 0.10),
    ("Jum", 0.08),
    ("Dec", 0.07),
    ("Cmp", 0.07),
    ("Con", 0.10),
];

/// Ball-playing defender.
const BPD: &[(&str, f64)] = &[
    ("Pas", 0.12),
    ("Pos", 0.12),
    ("Mar", 0.11),
    ("Tck", 0.11),
    ("Ant", 0.10),
    ("Vis", 0.10),
    ("Dec", 0.09),
    ("Str", 0.08),
    ("Cmp", 0.08),
    ("Con", 0.09),
];

/// Inverted wing-back/defender.
const IWD: &[(&str, f64)] = &[
    ("Pas", 0.12),
    ("Dri", 0.12),
    ("Tck", 0.11),
    ("Sta", 0.11),
    ("Ant", 0.10),
    ("Pos", 0.10),
    ("Dec", 0.09),
    ("Wor", 0.08),
    ("Tec", 0.08),
    ("Agi", 0.09),
];

/// Roaming playmaker.
const RPM: &[(&str, f64)] = &[
    ("Pas", 0.15),
    ("Vis", 0.12),
    ("Tec", 0.12),
    ("Sta", 0.10),
    ("Dri", 0.10),
    ("Ant", 0.10),
    ("Dec", 0.10),
    ("Wor", 0.07),
    ("Pos", 0.07),
    ("Tck", 0.07),
];

const DM: &[(&str, f64)] = &[
    ("Tck", 0.15),
    ("Pos", 0.12),
    ("Pas", 0.12),
    ("Ant", 0.10),
    ("Mar", 0.10),
    ("Sta", 0.10),
    ("Str", 0.10),
    ("Dec", 0.08),
    ("Wor", 0.07),
    ("Vis", 0.06),
];

// Coarser scale than the other tables; only six attributes curated so far.
const WB: &[(&str, f64)] = &[
    ("Sta", 0.5),
    ("Pas", 0.4),
    ("Pac", 0.5),
    ("Dri", 0.4),
    ("Tck", 0.4),
    ("Cro", 0.4),
];

/// Inside winger.
const IW: &[(&str, f64)] = &[
    ("Dri", 0.12),
    ("Pac", 0.11),
    ("Tec", 0.11),
    ("Sho", 0.11),
    ("Pas", 0.10),
    ("Fla", 0.10),
    ("Otb", 0.10),
    ("Vis", 0.09),
    ("Agi", 0.08),
    ("Cmp", 0.08),
];

/// Inside forward.
const IF: &[(&str, f64)] = &[
    ("Fin", 0.12),
    ("Dri", 0.12),
    ("Pac", 0.11),
    ("Tec", 0.11),
    ("Otb", 0.10),
    ("Fla", 0.10),
    ("Ant", 0.09),
    ("Agi", 0.08),
    ("Cmp", 0.08),
    ("Vis", 0.09),
];

/// Complete forward. Also the normalization reference for every position.
const CF: &[(&str, f64)] = &[
    ("Fin", 0.15),
    ("Pac", 0.10),
    ("Dri", 0.10),
    ("Fir", 0.10),
    ("Str", 0.10),
    ("Tec", 0.10),
    ("Ant", 0.10),
    ("OtB", 0.10),
    ("Cmp", 0.10),
    ("Pas", 0.05),
];

const GK: &[(&str, f64)] = &[
    ("Ref", 0.6),
    ("Han", 0.5),
    ("One", 0.4),
    ("Kic", 0.5),
    ("Pos", 0.4),
    ("Aer", 0.4),
    ("Com", 0.3),
];

/// Built-in weight entries for `position`, in authored order.
pub fn weights_for(position: Position) -> &'static [(&'static str, f64)] {
    match position {
        Position::WCB => WCB,
        Position::CB => CB,
        Position::BPD => BPD,
        Position::IWD => IWD,
        Position::RPM => RPM,
        Position::DM => DM,
        Position::WB => WB,
        Position::IW => IW,
        Position::IF => IF,
        Position::CF => CF,
        Position::GK => GK,
    }
}
