pub mod account;
pub mod insights;
pub mod media;
pub mod publish;
