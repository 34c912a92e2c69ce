//! Typed access to the portal's three remote tables.
//!
//! Repositories own the timeout and the filter vocabulary; they never make
//! authorization decisions.

pub mod hr_records;
pub mod permission_rules;
pub mod profiles;

pub use hr_records::HrRecordRepository;
pub use permission_rules::PermissionRuleRepository;
pub use profiles::ProfileRepository;
