pub mod report;
pub mod tools;
