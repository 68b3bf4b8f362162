//! Verification/Diagnostic Harness
//!
//! Decides whether a pasted AI response is grounded in the user's real data
//! or generic filler. The caller generates a challenge, shows its prompt to
//! the AI under test, and runs the pasted response through `verify_response`
//! against a fresh snapshot of the user's data.
//!
//! Verification itself is a pure function and cannot fail on well-formed
//! string input; only building the `DataSnapshot` can return a storage error.

mod challenge;
mod checks;
mod types;

pub use challenge::generate_challenge;
pub use checks::verify_response;
pub use types::{Challenge, ChallengeCategory, CheckFinding, DataSnapshot, VerificationReport};
