// LinkedIn profile generation. One profile per user, overwritten on each run.

pub mod handlers;
pub mod service;
