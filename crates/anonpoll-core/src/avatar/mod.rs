//! Avatar domain module.
//!
//! # Module Structure
//!
//! - `catalog`: the fixed list of animal avatars
//! - `claim_set`: the durable set of claimed tokens
//! - `store`: persistence trait for the claim set
//! - `memory`: in-process store implementation

pub mod catalog;
mod claim_set;
mod memory;
mod store;

pub use catalog::{AvatarToken, CATALOG};
pub use claim_set::ClaimSet;
pub use memory::MemoryAvatarStore;
pub use store::{AvatarStore, WriteGuard};
