//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod report;
pub mod user;

pub use report::{ActiveModel as ReportActiveModel, Entity as ReportEntity, Model as ReportModel};
pub use user::{ActiveModel as UserActiveModel, Entity as UserEntity, Model as UserModel};
