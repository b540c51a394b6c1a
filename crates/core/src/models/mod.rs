pub mod analytics;
pub mod expense;
pub mod indicator;
pub mod ledger;
pub mod price;
pub mod settings;
