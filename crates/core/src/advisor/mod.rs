//! The four calculation rules and the coach that composes them.
//!
//! Each rule is a plain function over validated inputs. The analyzers that can attach a
//! narrative borrow the coach's [`Narrator`](crate::llm::Narrator) and only ever swap the
//! prose slot of their report; the numbers always come from the rules.

pub mod coach;
pub mod emergency;
pub mod expense;
pub mod goals;
pub mod investment;
