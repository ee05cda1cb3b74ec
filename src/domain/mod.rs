mod calendar;
mod client;
mod ledger;
mod pricing;
mod validation;
mod visit;

pub use calendar::*;
pub use client::*;
pub use ledger::*;
pub use pricing::*;
pub use validation::*;
pub use visit::*;
