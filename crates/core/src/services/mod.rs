pub mod indicator_service;
pub mod ledger_service;
pub mod price_service;
pub mod roi_service;
pub mod savings_service;
