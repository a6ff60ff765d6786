//! Tag component.
//!
//! A [`Tag`] is the opaque string name the host uses to address an object
//! from native systems and scripts. Tags are not required to be unique; when
//! several objects share a tag, tag-addressed writes hit the first one found.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(pub String);

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_name() {
        let tag = Tag::new("cube01");
        assert_eq!(tag.name(), "cube01");
        assert_eq!(tag, Tag("cube01".to_string()));
    }
}
