pub mod chart_service;
pub mod currency_service;
pub mod history_service;
pub mod portfolio_service;
