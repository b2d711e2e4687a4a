use crate::store::{EntityStore, StoreState};
use crate::{objects::*, AgencyAndId, EntityKey, Error, GtfsReader};
use chrono::prelude::NaiveDate;
use chrono::Duration;
use std::collections::{HashMap, HashSet};

/// In memory [EntityStore] holding all the GTFS objects of one or several merged feeds
///
/// This is probably the entry point you want to use:
/// ```
/// let gtfs = gtfs_graph::Gtfs::from_path("fixtures/basic")?;
/// assert_eq!(gtfs.count(gtfs_graph::EntityType::Stop), 5);
/// # Ok::<(), gtfs_graph::Error>(())
/// ```
///
/// Entities are kept in the order they were saved. Saving an entity with the key of an already
/// saved one replaces it in place.
#[derive(Debug, Default)]
pub struct Gtfs {
    /// Time needed to read and parse the feed in milliseconds
    pub read_duration: i64,
    entities: HashMap<EntityType, Vec<Entity>>,
    index: HashMap<(EntityType, EntityKey), usize>,
    state: StoreState,
    flush_count: usize,
}

impl EntityStore for Gtfs {
    fn open(&mut self) -> Result<(), Error> {
        self.state = StoreState::Open;
        Ok(())
    }

    fn save_entity(&mut self, entity: Entity) -> Result<(), Error> {
        let entity_type = entity.entity_type();
        let entities = self.entities.entry(entity_type).or_default();
        match self.index.get(&(entity_type, entity.key())) {
            Some(&position) => entities[position] = entity,
            None => {
                self.index
                    .insert((entity_type, entity.key()), entities.len());
                entities.push(entity);
            }
        }
        Ok(())
    }

    fn entity_for_id(&self, entity_type: EntityType, key: &EntityKey) -> Option<&Entity> {
        // the key is cloned as the index is keyed by a tuple
        self.index
            .get(&(entity_type, key.clone()))
            .and_then(|&i| self.entities.get(&entity_type)?.get(i))
    }

    fn flush(&mut self) -> Result<(), Error> {
        self.flush_count += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Error> {
        self.state = StoreState::Closed;
        Ok(())
    }
}

impl Gtfs {
    /// Reads the GTFS from a local zip archive or local directory with a default [GtfsReader]
    pub fn from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Gtfs, Error> {
        GtfsReader::default().read_from_path(path)
    }

    /// Prints on stdout some basic statistics about the GTFS file (numbers of elements for each object). Mostly to be sure that everything was read
    pub fn print_stats(&self) {
        println!("GTFS data:");
        println!("  Read in {} ms", self.read_duration);
        for entity_type in EntityType::LOAD_ORDER.iter() {
            let count = self.count(*entity_type);
            if count > 0 {
                println!("  {}: {}", entity_type, count);
            }
        }
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    /// Number of flushes received, one per table read
    pub fn flush_count(&self) -> usize {
        self.flush_count
    }

    /// Number of stored entities of a type
    pub fn count(&self, entity_type: EntityType) -> usize {
        self.entities.get(&entity_type).map_or(0, Vec::len)
    }

    /// All the stored entities of a type, in the order they were saved
    pub fn entities(&self, entity_type: EntityType) -> &[Entity] {
        self.entities
            .get(&entity_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// All the stored objects of type `T`
    ///
    /// ```
    /// # let gtfs = gtfs_graph::Gtfs::from_path("fixtures/basic")?;
    /// let names: Vec<_> = gtfs.iter::<gtfs_graph::Route>().map(|r| r.short_name.as_str()).collect();
    /// assert_eq!(names, ["1", "2", "3"]);
    /// # Ok::<(), gtfs_graph::Error>(())
    /// ```
    pub fn iter<'a, T: TypedEntity + 'a>(&'a self) -> impl Iterator<Item = &'a T> {
        self.entities(T::ENTITY_TYPE)
            .iter()
            .filter_map(T::from_entity)
    }

    /// Gets an object of type `T` by its key
    pub fn get<T: TypedEntity>(&self, key: &EntityKey) -> Result<&T, Error> {
        self.entity_for_id(T::ENTITY_TYPE, key)
            .and_then(T::from_entity)
            .ok_or_else(|| Error::ReferenceNotFound {
                entity_type: T::ENTITY_TYPE,
                id: key.to_string(),
            })
    }

    fn get_by_id<T: TypedEntity>(&self, id: &AgencyAndId) -> Result<&T, Error> {
        self.get(&EntityKey::Composite(id.clone()))
    }

    /// Gets an [Agency] by its `agency_id`
    pub fn get_agency<'a>(&'a self, id: &str) -> Result<&'a Agency, Error> {
        self.get(&EntityKey::Local(id.to_owned()))
    }

    /// Gets a [Stop] by its `stop_id`
    pub fn get_stop<'a>(&'a self, id: &AgencyAndId) -> Result<&'a Stop, Error> {
        self.get_by_id(id)
    }

    /// Gets a [Route] by its `route_id`
    pub fn get_route<'a>(&'a self, id: &AgencyAndId) -> Result<&'a Route, Error> {
        self.get_by_id(id)
    }

    /// Gets a [Trip] by its `trip_id`
    pub fn get_trip<'a>(&'a self, id: &AgencyAndId) -> Result<&'a Trip, Error> {
        self.get_by_id(id)
    }

    /// Gets a [ServiceCalendar] by its `service_id`
    pub fn get_calendar<'a>(&'a self, id: &AgencyAndId) -> Result<&'a ServiceCalendar, Error> {
        self.get_by_id(id)
    }

    /// Gets a [FareAttribute] by its `fare_id`
    pub fn get_fare_attribute<'a>(&'a self, id: &AgencyAndId) -> Result<&'a FareAttribute, Error> {
        self.get_by_id(id)
    }

    /// Gets a [Level] by its `level_id`
    pub fn get_level<'a>(&'a self, id: &AgencyAndId) -> Result<&'a Level, Error> {
        self.get_by_id(id)
    }

    /// Gets a [Pathway] by its `pathway_id`
    pub fn get_pathway<'a>(&'a self, id: &AgencyAndId) -> Result<&'a Pathway, Error> {
        self.get_by_id(id)
    }

    /// Gets a [Zone] by its `zone_id`
    pub fn get_zone<'a>(&'a self, id: &str) -> Result<&'a Zone, Error> {
        self.get(&EntityKey::Local(id.to_owned()))
    }

    /// The [StopTime] of a trip, ordered by `stop_sequence`
    pub fn stop_times(&self, trip_id: &AgencyAndId) -> Vec<&StopTime> {
        let mut stop_times: Vec<_> = self
            .iter::<StopTime>()
            .filter(|st| &st.trip_id == trip_id)
            .collect();
        stop_times.sort_by_key(|st| st.stop_sequence);
        stop_times
    }

    /// The points of a shape, ordered by their sequence
    pub fn shape(&self, shape_id: &AgencyAndId) -> Vec<&ShapePoint> {
        let mut points: Vec<_> = self
            .iter::<ShapePoint>()
            .filter(|p| &p.shape_id == shape_id)
            .collect();
        points.sort_by_key(|p| p.sequence);
        points
    }

    /// For a given a `service_id` and a starting date returns all the following day offset the vehicle runs
    ///
    /// For instance if the `start_date` is 2021-12-20, `[0, 4]` means that the vehicle will run the 20th and 24th
    ///
    /// It will consider use both [ServiceCalendar] and [ServiceCalendarDate] (both added and removed)
    pub fn trip_days(&self, service_id: &AgencyAndId, start_date: NaiveDate) -> Vec<u16> {
        let mut result = Vec::new();

        // Handle services given by specific days and exceptions
        let mut removed_days = HashSet::new();
        for extra_day in self
            .iter::<ServiceCalendarDate>()
            .filter(|d| &d.service_id == service_id)
        {
            let offset = extra_day.date.signed_duration_since(start_date).num_days();
            if let Ok(day) = u16::try_from(offset) {
                match extra_day.exception_type {
                    Exception::Added => result.push(day),
                    Exception::Deleted => {
                        removed_days.insert(day);
                    }
                }
            }
        }

        if let Ok(calendar) = self.get_calendar(service_id) {
            let total_days = calendar
                .end_date
                .signed_duration_since(start_date)
                .num_days();
            // offsets past u16::MAX are not representable and are skipped
            for days_offset in 0..=total_days.min(i64::from(u16::MAX)) {
                let current_date = start_date + Duration::days(days_offset);
                let day = match u16::try_from(days_offset) {
                    Ok(day) => day,
                    Err(_) => break,
                };

                if calendar.start_date <= current_date
                    && calendar.end_date >= current_date
                    && calendar.valid_weekday(current_date)
                    && !removed_days.contains(&day)
                {
                    result.push(day);
                }
            }
        }

        result.sort_unstable();
        result.dedup();
        result
    }
}
