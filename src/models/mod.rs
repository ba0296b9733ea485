pub mod attempt;
pub mod candidate_details;
pub mod evaluation;
pub mod question;
