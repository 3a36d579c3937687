pub mod catalog_service;
pub mod dashboard_service;
pub mod ledger_service;
pub mod quiz_session;
pub mod quote_service;
