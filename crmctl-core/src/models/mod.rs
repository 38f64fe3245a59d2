//! Domain models with validation at construction
//!
//! All request input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod creator;
pub mod filter;
pub mod input;
pub mod pagination;
pub mod record;
pub mod stats;
pub mod validation;

pub use creator::{CreatorId, CreatorRef, UNRESOLVED_CREATOR_LABEL};
pub use filter::{ListQuery, RecordFilter};
pub use input::CreateRecordInput;
pub use pagination::{PageInfo, Pagination};
pub use record::{FinancialRecord, ListedRecord, NewRecord, RecordPage, RecordType};
pub use stats::RecordStats;
pub use validation::ValidationError;
