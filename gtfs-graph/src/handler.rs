//! Bookkeeping done for each decoded entity before it reaches the store
use crate::enums::EntityType;
use crate::identifier_space::IdentifierSpace;
use crate::objects::Entity;
use crate::store::EntityStore;
use crate::Error;
use log::debug;
use std::collections::HashMap;

/// Dispatches the decoded entities to the [EntityStore]
///
/// * agencies get an id when they have none and are only saved the first time their id is seen,
/// * entities with an agency scoped identifier claim their local id,
/// * entities identified by their row get their row number.
pub struct EntityHandler<'a, S: EntityStore + ?Sized> {
    space: &'a mut IdentifierSpace,
    store: &'a mut S,
    row_ids: &'a mut HashMap<EntityType, u32>,
    overwrite_duplicates: bool,
}

impl<'a, S: EntityStore + ?Sized> EntityHandler<'a, S> {
    pub fn new(
        space: &'a mut IdentifierSpace,
        store: &'a mut S,
        row_ids: &'a mut HashMap<EntityType, u32>,
        overwrite_duplicates: bool,
    ) -> Self {
        Self {
            space,
            store,
            row_ids,
            overwrite_duplicates,
        }
    }

    pub fn space(&self) -> &IdentifierSpace {
        &*self.space
    }

    /// Handles one entity. Returns false when the entity was skipped as an already known agency
    pub fn handle(&mut self, entity: Entity) -> Result<bool, Error> {
        let mut entity = match entity {
            Entity::Agency(mut agency) => {
                if agency.id.is_none() {
                    let id = self
                        .space
                        .resolve_default_agency_id()
                        .unwrap_or_else(|_| agency.name.clone());
                    agency.id = Some(id);
                }
                if !self.space.accept_agency(agency.clone()) {
                    debug!(
                        "agency {} already loaded, skipped",
                        agency.id.as_deref().unwrap_or_default()
                    );
                    return Ok(false);
                }
                Entity::Agency(agency)
            }
            other => other,
        };

        let entity_type = entity.entity_type();
        if let Some(id) = entity.claimed_id() {
            self.space
                .register_claim(entity_type, id, self.overwrite_duplicates)?;
        }
        if let Some(row_id) = entity.row_id_mut() {
            let counter = self.row_ids.entry(entity_type).or_insert(0);
            *counter += 1;
            *row_id = *counter;
        }

        self.store.save_entity(entity)?;
        Ok(true)
    }
}
