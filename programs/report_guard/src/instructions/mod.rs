pub mod admin;
pub mod committee;
pub mod compensation;
pub mod report;
pub mod reward;
pub mod stake;
pub mod treasury;
pub mod views;
pub mod vote;
