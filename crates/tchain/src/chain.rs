//! ordered override stack for one logical template
//!
//! [TemplateChain] keeps its entries in an [indexmap::IndexMap] keyed by the
//! fully-qualified name. Position 0 is the most specific override (the "last
//! child" in theme/module inheritance terms), the final entry is the least
//! specific fallback.
//!
//! Re-inserting a known name replaces the stored value but keeps the position
//! of its first insertion. Merging chains from several layers in priority order
//! therefore never lets a lower-priority layer move an entry forward.
use crate::template_type::TemplateType;
use serde::{ser::SerializeSeq, Serializer};

#[derive(Debug, Clone, Default)]
pub struct TemplateChain {
    chain: indexmap::IndexMap<String, TemplateType>,
}

impl TemplateChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at the entry's fully-qualified name
    ///
    /// An existing entry keeps its position, only the value is replaced.
    pub fn append(&mut self, template_type: TemplateType) {
        let key = template_type.fully_qualified_name().to_owned();
        // IndexMap::insert keeps the index of an existing key
        self.chain.insert(key, template_type);
    }

    /// Append every entry of `other` in its order
    pub fn append_chain(&mut self, other: TemplateChain) {
        for template_type in other {
            self.append(template_type);
        }
    }

    pub fn has(&self, template_type: &TemplateType) -> bool {
        self.chain
            .contains_key(template_type.fully_qualified_name())
    }

    pub fn get(&self, fully_qualified_name: &str) -> Option<&TemplateType> {
        self.chain.get(fully_qualified_name)
    }

    pub fn count(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Most specific entry (position 0)
    pub fn last_child(&self) -> Result<&TemplateType, NavigationError> {
        self.chain
            .first()
            .map(|(_key, value)| value)
            .ok_or(NavigationError::EmptyChain)
    }

    /// `false` only for the least specific entry
    pub fn has_parent(&self, template_type: &TemplateType) -> Result<bool, NavigationError> {
        let position = self.position_of(template_type)?;
        Ok(position + 1 < self.chain.len())
    }

    /// Entry directly after `template_type`, the version it overrides
    pub fn parent(&self, template_type: &TemplateType) -> Result<&TemplateType, NavigationError> {
        let position = self.position_of(template_type)?;
        self.chain
            .get_index(position + 1)
            .map(|(_key, value)| value)
            .ok_or_else(|| NavigationError::NoParent {
                name: template_type.fully_qualified_name().to_owned(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &TemplateType> {
        self.chain.values()
    }

    fn position_of(&self, template_type: &TemplateType) -> Result<usize, NavigationError> {
        if self.chain.is_empty() {
            return Err(NavigationError::EmptyChain);
        }

        self.chain
            .get_index_of(template_type.fully_qualified_name())
            .ok_or_else(|| NavigationError::NotInChain {
                name: template_type.fully_qualified_name().to_owned(),
            })
    }
}

/// Misuse of the parent/child navigation
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum NavigationError {
    #[error("template chain is empty")]
    EmptyChain,
    #[error("template {name} is not part of the chain")]
    NotInChain { name: String },
    #[error("template {name} is the least specific entry and has no parent")]
    NoParent { name: String },
}

impl IntoIterator for TemplateChain {
    type Item = TemplateType;
    type IntoIter = indexmap::map::IntoValues<String, TemplateType>;

    fn into_iter(self) -> Self::IntoIter {
        self.chain.into_values()
    }
}

impl<'a> IntoIterator for &'a TemplateChain {
    type Item = &'a TemplateType;
    type IntoIter = indexmap::map::Values<'a, String, TemplateType>;

    fn into_iter(self) -> Self::IntoIter {
        self.chain.values()
    }
}

impl Extend<TemplateType> for TemplateChain {
    fn extend<T: IntoIterator<Item = TemplateType>>(&mut self, iter: T) {
        for template_type in iter {
            self.append(template_type);
        }
    }
}

impl FromIterator<TemplateType> for TemplateChain {
    fn from_iter<T: IntoIterator<Item = TemplateType>>(iter: T) -> Self {
        let mut chain = TemplateChain::new();
        chain.extend(iter);
        chain
    }
}

impl serde::ser::Serialize for TemplateChain {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut ser = serializer.serialize_seq(Some(self.chain.len()))?;
        for template_type in self.chain.values() {
            ser.serialize_element(template_type)?;
        }
        ser.end()
    }
}
