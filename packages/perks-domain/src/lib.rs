pub mod options;
pub mod perk;
pub mod query;

pub use options::{FilterOptions, MerchantOption};
pub use perk::{CreatedBy, Perk};
pub use query::{PerkQuery, SearchState};
