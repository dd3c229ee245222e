pub mod ai;
pub mod ai_types;
pub mod check;
pub mod glossary;
pub mod mock;
pub mod sql;
