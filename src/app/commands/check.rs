//! Check command: validate the catalog document.

use crate::app::AppContext;
use crate::domain::AppError;
use crate::domain::catalog::CheckReport;
use crate::ports::CatalogSource;

#[derive(Debug, Clone)]
pub struct CheckOutcome {
    /// Where the catalog was read from.
    pub source: String,
    pub report: CheckReport,
}

impl CheckOutcome {
    pub fn is_clean(&self) -> bool {
        self.report.issues.is_empty()
    }
}

/// Report every problem; only an unreadable document fails.
pub fn execute<S: CatalogSource>(ctx: &AppContext<S>) -> Result<CheckOutcome, AppError> {
    let store = ctx.catalog_store();
    let report = store.check()?;
    Ok(CheckOutcome { source: store.source().describe(), report })
}
