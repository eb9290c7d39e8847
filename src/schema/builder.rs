use std::sync::Arc;

use super::types::{Field, TypeDescriptor};

/// Incremental builder for container descriptors.
///
/// Field order is the order of [`ContainerBuilder::field`] calls and fixes
/// both the byte layout and the Merkle leaf order of the container.
#[derive(Debug, Clone)]
pub struct ContainerBuilder {
    name: String,
    fields: Vec<Field>,
}

impl ContainerBuilder {
    /// Creates an empty container definition.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field.
    pub fn field(mut self, name: impl Into<String>, ty: impl Into<Arc<TypeDescriptor>>) -> Self {
        self.fields.push(Field::new(name, ty));
        self
    }

    /// Finalises the descriptor.
    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor::Container {
            name: self.name,
            fields: self.fields,
        }
    }

    /// Finalises the descriptor behind an [`Arc`] for sharing.
    pub fn build_shared(self) -> Arc<TypeDescriptor> {
        Arc::new(self.build())
    }
}
