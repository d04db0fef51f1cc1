pub mod interview;
pub mod job_application;
pub mod linkedin;
pub mod research;
pub mod resume;
pub mod user;
