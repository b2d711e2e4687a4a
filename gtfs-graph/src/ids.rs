//! Composite identifiers
use std::fmt;

/// An identifier scoped by the agency that owns it.
///
/// A local id is only unique inside its agency scope: two feeds merged together
/// may both have a stop `1`, they will be `A_1` and `B_1`.
/// Equality and hashing use both components.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgencyAndId {
    /// Agency scope
    pub agency_id: String,
    /// Local id, unique inside the agency scope
    pub id: String,
}

impl AgencyAndId {
    /// Builds an identifier from its agency scope and local id
    pub fn new(agency_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            agency_id: agency_id.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for AgencyAndId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}_{}", self.agency_id, self.id)
    }
}

/// Key under which an entity is saved in an [crate::EntityStore]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityKey {
    /// Agency scoped identifier (stops, routes, trips…)
    Composite(AgencyAndId),
    /// Identifier that is not agency scoped (agencies, zones)
    Local(String),
    /// Sequence number given to rows without their own identifier (stop times, shape points…)
    Row(u32),
}

impl EntityKey {
    /// The key is usable for a lookup
    pub fn is_empty(&self) -> bool {
        match self {
            EntityKey::Composite(id) => id.id.is_empty(),
            EntityKey::Local(id) => id.is_empty(),
            EntityKey::Row(_) => false,
        }
    }
}

impl From<AgencyAndId> for EntityKey {
    fn from(id: AgencyAndId) -> Self {
        EntityKey::Composite(id)
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EntityKey::Composite(id) => write!(f, "{}", id),
            EntityKey::Local(id) => write!(f, "{}", id),
            EntityKey::Row(id) => write!(f, "#{}", id),
        }
    }
}
