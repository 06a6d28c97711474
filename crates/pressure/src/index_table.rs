use crate::error::PressureError;
use configuration::Config;
use core_types::{IndexProfile, default_index_position};

/// The index reference table together with its fallback policy.
///
/// Strict callers use [`IndexTable::lookup`], which returns `None` for unregistered ids.
/// The calculator uses [`IndexTable::resolve`], which applies the default-index policy.
#[derive(Debug, Clone)]
pub struct IndexTable {
    profiles: Vec<IndexProfile>,
    default_position: usize,
}

/// The profile chosen for a requested index id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub profile: &'a IndexProfile,
    /// True when the requested id was unregistered and the default profile was substituted.
    pub is_fallback: bool,
}

impl IndexTable {
    /// Builds a table from profiles in priority order.
    ///
    /// `default_index` names the fallback profile; `None` selects the first profile.
    pub fn new(
        profiles: Vec<IndexProfile>,
        default_index: Option<&str>,
    ) -> Result<Self, PressureError> {
        let default_position = default_index_position(&profiles, default_index)?;

        Ok(Self {
            profiles,
            default_position,
        })
    }

    /// Builds the table from the `[[indices]]` section of the configuration.
    pub fn from_config(config: &Config) -> Result<Self, PressureError> {
        let profiles = config.index_profiles()?;
        Self::new(profiles, config.default_index.as_deref())
    }

    /// Strict membership lookup. No fallback is applied.
    pub fn lookup(&self, id: &str) -> Option<&IndexProfile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lookup(id).is_some()
    }

    pub fn default_profile(&self) -> &IndexProfile {
        &self.profiles[self.default_position]
    }

    /// Resolves `id` to its profile, substituting the default profile for unregistered ids.
    pub fn resolve(&self, id: &str) -> Resolution<'_> {
        match self.lookup(id) {
            Some(profile) => Resolution {
                profile,
                is_fallback: false,
            },
            None => Resolution {
                profile: self.default_profile(),
                is_fallback: true,
            },
        }
    }

    /// Registered index ids in table order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.profiles.iter().map(|p| p.id.as_str())
    }

    pub fn profiles(&self) -> &[IndexProfile] {
        &self.profiles
    }
}
