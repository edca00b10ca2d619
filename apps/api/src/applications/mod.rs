//! Submission intake: multipart parsing, attachment policy, the two
//! external collaborators, and the application record itself.

pub mod handlers;
pub mod intake;
pub mod model;
pub mod storage;
pub mod store;
