//! Model assembly
//!
//! Turns one table blueprint, together with every foreign key touching it,
//! into a [`ModelDescriptor`]: the fields and accessors, relations and
//! structural flags that the emitter renders.

pub mod assemble;
pub mod descriptor;
pub mod identity;
pub mod mutator;

pub use assemble::{getter_name, Assembler, SOFT_DELETES};
pub use descriptor::{Diagnostic, Field, ModelDescriptor, Mutation, TEMPORAL_CLASS};
pub use identity::{ClassRef, ModelIdentity, DEFAULT_KEY};
pub use mutator::{FnMutator, Mutator};
