//! # Split Engine
//!
//! A bill-splitting allocation engine: partitions monetary amounts across
//! participants under four split methods, rebalances share maps as the
//! participant set, method, or amount changes interactively, and aggregates a
//! whole bill into exact per-person totals.
//!
//! ## Design Principles
//!
//! - **Exact arithmetic**: all amounts are `rust_decimal`-backed; shares
//!   always sum exactly to the original amount, rounding remainders resolved
//!   deterministically (first participant in list order)
//! - **No ambient state**: every operation takes the bill or item explicitly
//!   and is testable without any UI harness
//! - **Reset, don't merge**: structural changes re-flatten percentage/value
//!   maps to an equal split; only live slider edits work incrementally
//! - **Visible drift**: a clamped slider edit may leave a map's total off
//!   100 / the amount; that is reproduced, never silently corrected
//!
//! ## Example
//!
//! ```
//! use split_engine::{Bill, LineItem, Person, SplitMethod, build_summary};
//!
//! let mut bill = Bill::new("b1", "Lunch");
//! bill.add_person(Person {
//!     id: "ada".to_string(),
//!     name: "Ada".to_string(),
//!     icon: "👩".to_string(),
//! });
//! bill.add_person(Person {
//!     id: "bob".to_string(),
//!     name: "Bob".to_string(),
//!     icon: "🧔".to_string(),
//! });
//! let item = LineItem::new(
//!     "i1",
//!     "Sandwiches",
//!     "19.90".parse().unwrap(),
//!     SplitMethod::Equal,
//!     vec!["ada".to_string(), "bob".to_string()],
//! )
//! .unwrap();
//! bill.add_item(item);
//!
//! let summary = build_summary(&bill).unwrap();
//! assert_eq!(summary.total.to_string(), "19.90");
//! ```

pub mod aggregate;
pub mod allocator;
pub mod bill;
pub mod charge;
pub mod error;
pub mod money;
pub mod rebalance;
pub mod summary;

pub use aggregate::{aggregate, BillTotals, ChargeLine, ItemShare, PersonTotal};
pub use allocator::allocate;
pub use bill::{
    Bill, ChargeKind, ChargeMethod, LineItem, Person, PersonId, SpecialCharge, SplitMethod,
};
pub use charge::ChargeTotals;
pub use error::{EngineError, Result};
pub use money::{clamp, distribute_equally, Money};
pub use summary::{build_summary, BillSummary, PersonSummary};
