pub mod analytics;
pub mod caption;
pub mod logger;
pub mod mock_data;
