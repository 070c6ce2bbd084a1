pub mod account_service;
pub mod insights_service;
pub mod media_service;
