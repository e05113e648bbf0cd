//! Business logic services for the MODARTE tracker

pub mod migration;
pub mod product;
pub mod reporting;
pub mod sale;
pub mod spreadsheet;

pub use migration::MigrationService;
pub use product::ProductService;
pub use reporting::ReportingService;
pub use sale::SaleService;
pub use spreadsheet::SpreadsheetStore;
