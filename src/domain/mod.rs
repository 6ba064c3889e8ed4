pub mod candidate;
pub mod content;
pub mod outcome;
pub mod request;
pub mod strategy;
