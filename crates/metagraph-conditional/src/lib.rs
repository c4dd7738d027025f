//! Conditional metagraphs: a metagraph whose generating set is partitioned
//! into variables and propositions, with context construction under an
//! explicit true/false proposition split and connectivity predicates
//! quantified over caller-supplied interpretations.

mod conditional;
mod expression;
mod interpretation;

pub use conditional::ConditionalMetagraph;
pub use expression::validate_expression;
pub use interpretation::{
    all_interpretations, interpretation_from, is_connected, is_fully_connected, is_non_redundant,
    is_redundantly_connected, Interpretation,
};
