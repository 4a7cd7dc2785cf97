//! # roster-dispatch
//!
//! Resolves `(method, path)` to an operation from a fixed registration table,
//! independent of any HTTP framework's router.
//!
//! Three pattern kinds exist:
//!
//! | Pattern | Example | Matches |
//! |---------|---------|---------|
//! | Exact | `/api/clients` | that path only |
//! | Reserved | `/api/clients/` + `active` | that bucket plus exactly that segment |
//! | ById | `/api/clients/` | that bucket plus one identifier segment |
//!
//! Reserved suffixes are checked before the identifier fallback, so an id can
//! never collide with a sub-action name. A deployment-stage segment such as
//! `/prod` is stripped once before any matching.

pub mod error;
pub mod params;
pub mod stage;
pub mod table;

pub use error::{DispatchError, TableError};
pub use params::{PathParams, RouteMatch};
pub use stage::StagePrefixes;
pub use table::{Pattern, RouteEntry, RouteTable, RouteTableBuilder};
