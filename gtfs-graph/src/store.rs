use crate::enums::EntityType;
use crate::ids::EntityKey;
use crate::objects::Entity;
use crate::Error;

/// Destination of the loaded entities
///
/// The [crate::GtfsReader] calls `open` once, then `save_entity` for each entity and `flush`
/// after each table, and `close` once every table has been read.
/// Nothing is flushed or closed when a load fails.
pub trait EntityStore {
    fn open(&mut self) -> Result<(), Error>;

    fn save_entity(&mut self, entity: Entity) -> Result<(), Error>;

    /// Entity previously saved under `key`
    fn entity_for_id(&self, entity_type: EntityType, key: &EntityKey) -> Option<&Entity>;

    fn flush(&mut self) -> Result<(), Error>;

    fn close(&mut self) -> Result<(), Error>;
}

/// Lifecycle of a store, as seen from its open/flush/close calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StoreState {
    Created,
    Open,
    Closed,
}

impl Default for StoreState {
    fn default() -> Self {
        StoreState::Created
    }
}
