pub mod badge;
pub mod content;
pub mod holding;
pub mod ledger;
pub mod lesson;
pub mod notification;
pub mod profile;
pub mod quiz;
pub mod quote;
pub mod settings;
pub mod trade;
