//! Relation inference
//!
//! Every foreign key yields two relation sides: the owning side on the
//! table declaring the constraint and the inverse side on the referenced
//! table. [`classify`] decides the kind of each side independently and
//! derives their names and the explicit key arguments they need.

pub mod body;
pub mod classify;
pub mod descriptor;

pub use classify::{classify, Endpoint};
pub use descriptor::{JoinClause, RelationDescriptor, RelationKind, RelationSide};
