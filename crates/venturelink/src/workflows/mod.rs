pub mod investor_application;
pub mod matching;
