//! CLI command implementations.

pub mod offers;
pub mod products;
pub mod terms;

pub use offers::OffersCommand;
pub use products::ProductsCommand;
pub use terms::TermsCommand;
