pub mod config;
pub mod engine;
pub mod validation;

pub use config::*;
pub use engine::{
    explain_position, general_score, score_position, score_records, sort_descending,
    GeneralWeighting, PositionScore, ScoreKey, ScoredRecord,
};
pub use validation::{check_soft_references, describe_soft_reference, validate_scoring};
