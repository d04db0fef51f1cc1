// Mock interviews: generated question sets and scored answers.

pub mod handlers;
pub mod service;
