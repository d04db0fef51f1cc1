// Job application tracking. Plain CRUD; no generation, no credits.

pub mod handlers;
pub mod service;
