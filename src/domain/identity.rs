//! Naming identity decomposed from a raw class name

use serde::{Deserialize, Serialize};

/// A named variant attached to an entity or sub-entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifier {
    pub name: String,
    /// Absent for boolean modifiers such as `button_disabled`
    pub value: Option<String>,
}

/// `{ entity, sub_entity, modifier }` decomposition of a raw name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingIdentity {
    /// Top-level unit (block)
    pub entity: String,
    /// Part of the entity (element)
    pub sub_entity: Option<String>,
    pub modifier: Option<Modifier>,
}

/// The four mutually exclusive identity shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityShape {
    Entity,
    EntityModifier,
    SubEntity,
    SubEntityModifier,
}

impl NamingIdentity {
    pub fn entity(name: impl Into<String>) -> Self {
        Self {
            entity: name.into(),
            sub_entity: None,
            modifier: None,
        }
    }

    pub fn with_sub_entity(mut self, name: impl Into<String>) -> Self {
        self.sub_entity = Some(name.into());
        self
    }

    pub fn with_modifier(mut self, name: impl Into<String>, value: Option<&str>) -> Self {
        self.modifier = Some(Modifier {
            name: name.into(),
            value: value.map(str::to_string),
        });
        self
    }

    /// Shape used to pick the directory policy.
    ///
    /// Absence of a sub-entity is tested before presence of a modifier, so an
    /// identity carrying a modifier but no sub-entity always lands on
    /// `EntityModifier`.
    pub fn shape(&self) -> IdentityShape {
        if self.sub_entity.is_none() && self.modifier.is_none() {
            IdentityShape::Entity
        } else if self.sub_entity.is_none() {
            IdentityShape::EntityModifier
        } else if self.modifier.is_some() {
            IdentityShape::SubEntityModifier
        } else {
            IdentityShape::SubEntity
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shapes() {
        assert_eq!(NamingIdentity::entity("button").shape(), IdentityShape::Entity);
        assert_eq!(
            NamingIdentity::entity("button")
                .with_modifier("disabled", None)
                .shape(),
            IdentityShape::EntityModifier
        );
        assert_eq!(
            NamingIdentity::entity("button").with_sub_entity("icon").shape(),
            IdentityShape::SubEntity
        );
        assert_eq!(
            NamingIdentity::entity("button")
                .with_sub_entity("icon")
                .with_modifier("size", Some("large"))
                .shape(),
            IdentityShape::SubEntityModifier
        );
    }
}
