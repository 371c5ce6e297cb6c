//! Domain model for question-set aggregates.
//!
//! # Responsibility
//! - Define the canonical aggregate shape (set -> questions -> answers).
//! - Keep aggregate validation next to the data it protects.
//!
//! # Invariants
//! - A `Question` is owned exclusively by its `QuestionSet`.
//! - Answers have positional identity only; they never outlive their question.

pub mod assessment;
