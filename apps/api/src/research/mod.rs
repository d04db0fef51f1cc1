// Company briefings and compensation/financial plans.

pub mod handlers;
pub mod service;
