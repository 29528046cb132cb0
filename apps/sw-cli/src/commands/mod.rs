// Command implementations, split by caller role.

pub mod agent;
pub mod review;
