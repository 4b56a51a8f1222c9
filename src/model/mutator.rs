//! Mutation hooks
//!
//! A mutator contributes one extra method to every model it applies to.

use crate::model::ModelDescriptor;

pub trait Mutator {
    /// Whether the method should be added to `model`
    fn applies(&self, model: &ModelDescriptor) -> bool;

    fn name(&self, model: &ModelDescriptor) -> String;

    /// Method body, without the surrounding braces
    fn body(&self, model: &ModelDescriptor) -> String;
}

type Predicate = Box<dyn Fn(&ModelDescriptor) -> bool>;
type Render = Box<dyn Fn(&ModelDescriptor) -> String>;

/// A [`Mutator`] assembled from closures
///
/// ```
/// use schemacoder::model::FnMutator;
///
/// let mutator = FnMutator::new("presenter", |m| {
///     format!("return new \\App\\Presenters\\{}Presenter($this);", m.class.name)
/// })
/// .when(|m| m.table.table != "migrations");
/// ```
pub struct FnMutator {
    name: String,
    when: Predicate,
    body: Render,
}

impl FnMutator {
    pub fn new(
        name: impl Into<String>,
        body: impl Fn(&ModelDescriptor) -> String + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            when: Box::new(|_| true),
            body: Box::new(body),
        }
    }

    pub fn when(mut self, predicate: impl Fn(&ModelDescriptor) -> bool + 'static) -> Self {
        self.when = Box::new(predicate);
        self
    }
}

impl Mutator for FnMutator {
    fn applies(&self, model: &ModelDescriptor) -> bool {
        (self.when)(model)
    }

    fn name(&self, _model: &ModelDescriptor) -> String {
        self.name.clone()
    }

    fn body(&self, model: &ModelDescriptor) -> String {
        (self.body)(model)
    }
}
