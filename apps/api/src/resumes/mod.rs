// Resumes: stored text, PDF import, AI analysis and optimisation.

pub mod handlers;
pub mod pdf;
pub mod service;
