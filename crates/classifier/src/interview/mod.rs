//! Decision interview: question generation, deterministic decision
//! derivation, and non-destructive decision application.

pub mod applier;
pub mod decision;
pub mod questions;

pub use applier::apply_decisions;
pub use decision::{derive_decision, AnswerMap, Decision, DecisionStore};
pub use questions::{
    generate_questions, question_id, route_component_type, InterviewRoute, Question,
    QuestionCatalog, QuestionOption, QUESTION_SCHEMA_VERSION,
};
