//! Domain models for quotation-service.

mod financials;
mod source_line;
mod work_item;
mod work_order;

pub use financials::{
    AmountInputMode, PricingMode, QuotationFinancialsConfig, QuotationTotals,
    DEFAULT_VAT_PERCENTAGE, DEFAULT_WITHHOLDING_TAX_PERCENTAGE,
};
pub use source_line::SourceLineRow;
pub use work_item::{GroupKey, SizeRow, SizeRowUpdate, WorkItemGroup};
pub use work_order::{WorkOrder, WorkOrderStatus};
