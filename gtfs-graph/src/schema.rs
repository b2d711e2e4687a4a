//! Column schema of every table
//!
//! The descriptors are plain static data: which file holds the table, which columns it has,
//! whether they are required and how their raw text is converted.
//! The [crate::decoder::RowDecoder] is entirely driven by them.
use crate::enums::EntityType;
use crate::Error;

/// Where the agency scope of a composite identifier comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The default agency of the load
    DefaultAgency,
    /// The agency id held by another column of the row (`route.agency_id`).
    /// Falls back on the default agency when that column is empty
    AgencyColumn(&'static str),
    /// The agency scope of another reference column of the row (`trip.route_id`)
    Reference(&'static str),
}

/// How the raw text of a column is converted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Float,
    /// `0` or `1`
    Bool,
    /// `YYYYMMDD`
    Date,
    /// `HH:MM:SS`, converted in seconds
    Time,
    /// `RRGGBB`
    Color,
    /// Integer value of an enumeration
    Code,
    /// Raw agency id, passed through the agency id translation
    AgencyId,
    /// Reference to an agency already loaded. An empty value means the default agency
    AgencyRef,
    /// Agency scoped identifier
    Id(Scope),
    /// Reference to an entity claimed by a previous table
    Ref(EntityType),
}

/// One column of a table
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// Column name in the GTFS. The table prefix can be omitted in the header
    pub name: &'static str,
    pub required: bool,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            required: true,
            kind,
        }
    }

    const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            required: false,
            kind,
        }
    }

    /// The header names this column
    ///
    /// ```
    /// use gtfs_graph::{descriptor_for, EntityType};
    /// let stops = descriptor_for(EntityType::Stop)?;
    /// let id = &stops.fields[0];
    /// assert!(id.matches_header("stop_id", stops.prefix));
    /// assert!(id.matches_header("id", stops.prefix));
    /// assert!(!id.matches_header("stop_code", stops.prefix));
    /// # Ok::<(), gtfs_graph::Error>(())
    /// ```
    pub fn matches_header(&self, header: &str, prefix: &str) -> bool {
        header == self.name
            || (!prefix.is_empty() && self.name.strip_prefix(prefix) == Some(header))
    }
}

/// Schema of one table
#[derive(Debug)]
pub struct EntityDescriptor {
    pub entity_type: EntityType,
    pub file_name: &'static str,
    /// Prefix shared by the columns of the table
    pub prefix: &'static str,
    /// Is the whole file mandatory in a feed
    pub required: bool,
    pub fields: &'static [FieldDescriptor],
}

use FieldKind::*;
use Scope::*;

static DESCRIPTORS: [EntityDescriptor; 21] = [
    EntityDescriptor {
        entity_type: EntityType::Agency,
        file_name: "agency.txt",
        prefix: "agency_",
        required: true,
        fields: &[
            FieldDescriptor::optional("agency_id", AgencyId),
            FieldDescriptor::required("agency_name", Text),
            FieldDescriptor::required("agency_url", Text),
            FieldDescriptor::required("agency_timezone", Text),
            FieldDescriptor::optional("agency_lang", Text),
            FieldDescriptor::optional("agency_phone", Text),
            FieldDescriptor::optional("agency_fare_url", Text),
            FieldDescriptor::optional("agency_email", Text),
        ],
    },
    EntityDescriptor {
        entity_type: EntityType::Block,
        file_name: "block.txt",
        prefix: "block_",
        required: false,
        fields: &[
            FieldDescriptor::required("block_seq_num", Integer),
            FieldDescriptor::required("block_var_num", Integer),
            FieldDescriptor::required("block_route_num", Integer),
            FieldDescriptor::required("block_run_num", Integer),
        ],
    },
    EntityDescriptor {
        entity_type: EntityType::ShapePoint,
        file_name: "shapes.txt",
        prefix: "shape_",
        required: false,
        fields: &[
            FieldDescriptor::required("shape_id", Id(DefaultAgency)),
            FieldDescriptor::required("shape_pt_lat", Float),
            FieldDescriptor::required("shape_pt_lon", Float),
            FieldDescriptor::required("shape_pt_sequence", Integer),
            FieldDescriptor::optional("shape_dist_traveled", Float),
        ],
    },
    EntityDescriptor {
        entity_type: EntityType::Note,
        file_name: "notes.txt",
        prefix: "note_",
        required: false,
        fields: &[
            FieldDescriptor::required("note_id", Id(DefaultAgency)),
            FieldDescriptor::optional("note_mark", Text),
            FieldDescriptor::optional("note_title", Text),
            FieldDescriptor::optional("note_desc", Text),
        ],
    },
    EntityDescriptor {
        entity_type: EntityType::Area,
        file_name: "areas.txt",
        prefix: "area_",
        required: false,
        fields: &[
            FieldDescriptor::required("area_id", Id(DefaultAgency)),
            FieldDescriptor::optional("area_name", Text),
        ],
    },
    EntityDescriptor {
        entity_type: EntityType::Route,
        file_name: "routes.txt",
        prefix: "route_",
        required: true,
        fields: &[
            FieldDescriptor::required("route_id", Id(AgencyColumn("agency_id"))),
            FieldDescriptor::optional("agency_id", AgencyRef),
            FieldDescriptor::optional("route_short_name", Text),
            FieldDescriptor::optional("route_long_name", Text),
            FieldDescriptor::optional("route_desc", Text),
            FieldDescriptor::required("route_type", Code),
            FieldDescriptor::optional("route_url", Text),
            FieldDescriptor::optional("route_color", Color),
            FieldDescriptor::optional("route_text_color", Color),
            FieldDescriptor::optional("route_sort_order", Integer),
            FieldDescriptor::optional("continuous_pickup", Code),
            FieldDescriptor::optional("continuous_drop_off", Code),
        ],
    },
    EntityDescriptor {
        entity_type: EntityType::Level,
        file_name: "levels.txt",
        prefix: "level_",
        required: false,
        fields: &[
            FieldDescriptor::required("level_id", Id(DefaultAgency)),
            FieldDescriptor::required("level_index", Float),
            FieldDescriptor::optional("level_name", Text),
        ],
    },
    EntityDescriptor {
        entity_type: EntityType::Stop,
        file_name: "stops.txt",
        prefix: "stop_",
        required: true,
        fields: &[
            FieldDescriptor::required("stop_id", Id(DefaultAgency)),
            FieldDescriptor::optional("stop_code", Text),
            FieldDescriptor::optional("stop_name", Text),
            FieldDescriptor::optional("stop_desc", Text),
            FieldDescriptor::optional("stop_lat", Float),
            FieldDescriptor::optional("stop_lon", Float),
            FieldDescriptor::optional("zone_id", Text),
            FieldDescriptor::optional("stop_url", Text),
            FieldDescriptor::optional("location_type", Code),
            FieldDescriptor::optional("parent_station", Id(DefaultAgency)),
            FieldDescriptor::optional("stop_timezone", Text),
            FieldDescriptor::optional("wheelchair_boarding", Code),
            FieldDescriptor::optional("level_id", Ref(EntityType::Level)),
            FieldDescriptor::optional("platform_code", Text),
        ],
    },
    EntityDescriptor {
        entity_type: EntityType::Trip,
        file_name: "trips.txt",
        prefix: "trip_",
        required: true,
        fields: &[
            FieldDescriptor::required("route_id", Ref(EntityType::Route)),
            FieldDescriptor::required("service_id", Id(DefaultAgency)),
            FieldDescriptor::required("trip_id", Id(Reference("route_id"))),
            FieldDescriptor::optional("trip_headsign", Text),
            FieldDescriptor::optional("trip_short_name", Text),
            FieldDescriptor::optional("direction_id", Code),
            FieldDescriptor::optional("block_id", Id(DefaultAgency)),
            FieldDescriptor::optional("shape_id", Id(DefaultAgency)),
            FieldDescriptor::optional("wheelchair_accessible", Code),
            FieldDescriptor::optional("bikes_allowed", Code),
        ],
    },
    EntityDescriptor {
        entity_type: EntityType::StopTime,
        file_name: "stop_times.txt",
        prefix: "",
        required: true,
        fields: &[
            FieldDescriptor::required("trip_id", Ref(EntityType::Trip)),
            FieldDescriptor::optional("arrival_time", Time),
            FieldDescriptor::optional("departure_time", Time),
            FieldDescriptor::required("stop_id", Ref(EntityType::Stop)),
            FieldDescriptor::required("stop_sequence", Integer),
            FieldDescriptor::optional("stop_headsign", Text),
            FieldDescriptor::optional("pickup_type", Code),
            FieldDescriptor::optional("drop_off_type", Code),
            FieldDescriptor::optional("continuous_pickup", Code),
            FieldDescriptor::optional("continuous_drop_off", Code),
            FieldDescriptor::optional("shape_dist_traveled", Float),
            FieldDescriptor::optional("timepoint", Code),
        ],
    },
    EntityDescriptor {
        entity_type: EntityType::ServiceCalendar,
        file_name: "calendar.txt",
        prefix: "",
        required: false,
        fields: &[
            FieldDescriptor::required("service_id", Id(DefaultAgency)),
            FieldDescriptor::required("monday", Bool),
            FieldDescriptor::required("tuesday", Bool),
            FieldDescriptor::required("wednesday", Bool),
            FieldDescriptor::required("thursday", Bool),
            FieldDescriptor::required("friday", Bool),
            FieldDescriptor::required("saturday", Bool),
            FieldDescriptor::required("sunday", Bool),
            FieldDescriptor::required("start_date", Date),
            FieldDescriptor::required("end_date", Date),
        ],
    },
    EntityDescriptor {
        entity_type: EntityType::ServiceCalendarDate,
        file_name: "calendar_dates.txt",
        prefix: "",
        required: false,
        fields: &[
            FieldDescriptor::required("service_id", Id(DefaultAgency)),
            FieldDescriptor::required("date", Date),
            FieldDescriptor::required("exception_type", Code),
        ],
    },
    EntityDescriptor {
        entity_type: EntityType::FareAttribute,
        file_name: "fare_attributes.txt",
        prefix: "fare_",
        required: false,
        fields: &[
            FieldDescriptor::required("fare_id", Id(AgencyColumn("agency_id"))),
            FieldDescriptor::required("price", Float),
            FieldDescriptor::required("currency_type", Text),
            FieldDescriptor::required("payment_method", Code),
            FieldDescriptor::optional("transfers", Code),
            FieldDescriptor::optional("agency_id", AgencyRef),
            FieldDescriptor::optional("transfer_duration", Integer),
        ],
    },
    EntityDescriptor {
        entity_type: EntityType::FareRule,
        file_name: "fare_rules.txt",
        prefix: "",
        required: false,
        fields: &[
            FieldDescriptor::required("fare_id", Ref(EntityType::FareAttribute)),
            FieldDescriptor::optional("route_id", Ref(EntityType::Route)),
            FieldDescriptor::optional("origin_id", Text),
            FieldDescriptor::optional("destination_id", Text),
            FieldDescriptor::optional("contains_id", Text),
        ],
    },
    EntityDescriptor {
        entity_type: EntityType::Frequency,
        file_name: "frequencies.txt",
        prefix: "",
        required: false,
        fields: &[
            FieldDescriptor::required("trip_id", Ref(EntityType::Trip)),
            FieldDescriptor::required("start_time", Time),
            FieldDescriptor::required("end_time", Time),
            FieldDescriptor::required("headway_secs", Integer),
            FieldDescriptor::optional("exact_times", Code),
        ],
    },
    EntityDescriptor {
        entity_type: EntityType::Pathway,
        file_name: "pathways.txt",
        prefix: "pathway_",
        required: false,
        fields: &[
            FieldDescriptor::required("pathway_id", Id(DefaultAgency)),
            FieldDescriptor::required("from_stop_id", Ref(EntityType::Stop)),
            FieldDescriptor::required("to_stop_id", Ref(EntityType::Stop)),
            FieldDescriptor::required("pathway_mode", Code),
            FieldDescriptor::required("is_bidirectional", Code),
            FieldDescriptor::optional("length", Float),
            FieldDescriptor::optional("traversal_time", Integer),
            FieldDescriptor::optional("stair_count", Integer),
            FieldDescriptor::optional("max_slope", Float),
            FieldDescriptor::optional("min_width", Float),
            FieldDescriptor::optional("signposted_as", Text),
            FieldDescriptor::optional("reversed_signposted_as", Text),
        ],
    },
    EntityDescriptor {
        entity_type: EntityType::Transfer,
        file_name: "transfers.txt",
        prefix: "",
        required: false,
        fields: &[
            FieldDescriptor::optional("from_stop_id", Ref(EntityType::Stop)),
            FieldDescriptor::optional("to_stop_id", Ref(EntityType::Stop)),
            FieldDescriptor::optional("from_route_id", Ref(EntityType::Route)),
            FieldDescriptor::optional("to_route_id", Ref(EntityType::Route)),
            FieldDescriptor::optional("from_trip_id", Ref(EntityType::Trip)),
            FieldDescriptor::optional("to_trip_id", Ref(EntityType::Trip)),
            FieldDescriptor::required("transfer_type", Code),
            FieldDescriptor::optional("min_transfer_time", Integer),
        ],
    },
    EntityDescriptor {
        entity_type: EntityType::FeedInfo,
        file_name: "feed_info.txt",
        prefix: "feed_",
        required: false,
        fields: &[
            FieldDescriptor::required("feed_publisher_name", Text),
            FieldDescriptor::required("feed_publisher_url", Text),
            FieldDescriptor::required("feed_lang", Text),
            FieldDescriptor::optional("default_lang", Text),
            FieldDescriptor::optional("feed_start_date", Date),
            FieldDescriptor::optional("feed_end_date", Date),
            FieldDescriptor::optional("feed_version", Text),
            FieldDescriptor::optional("feed_contact_email", Text),
            FieldDescriptor::optional("feed_contact_url", Text),
        ],
    },
    EntityDescriptor {
        entity_type: EntityType::Ridership,
        file_name: "ridership.txt",
        prefix: "",
        required: false,
        fields: &[
            FieldDescriptor::optional("agency_id", AgencyRef),
            FieldDescriptor::optional("route_id", Text),
            FieldDescriptor::optional("trip_id", Text),
            FieldDescriptor::optional("stop_id", Text),
            FieldDescriptor::optional("stop_sequence", Integer),
            FieldDescriptor::required("total_boardings", Integer),
            FieldDescriptor::required("total_alightings", Integer),
            FieldDescriptor::optional("average_load", Float),
            FieldDescriptor::optional("ridership_start_date", Date),
            FieldDescriptor::optional("ridership_end_date", Date),
        ],
    },
    EntityDescriptor {
        entity_type: EntityType::Translation,
        file_name: "translations.txt",
        prefix: "",
        required: false,
        fields: &[
            FieldDescriptor::required("table_name", Text),
            FieldDescriptor::required("field_name", Text),
            FieldDescriptor::required("language", Text),
            FieldDescriptor::required("translation", Text),
            FieldDescriptor::optional("record_id", Text),
            FieldDescriptor::optional("record_sub_id", Text),
            FieldDescriptor::optional("field_value", Text),
        ],
    },
    EntityDescriptor {
        entity_type: EntityType::Zone,
        file_name: "zones.txt",
        prefix: "zone_",
        required: false,
        fields: &[
            FieldDescriptor::required("zone_id", Text),
            FieldDescriptor::required("zone_lat", Float),
            FieldDescriptor::required("zone_lon", Float),
            FieldDescriptor::optional("zone_name", Text),
        ],
    },
];

/// Schema of the table holding `entity_type`
pub fn descriptor_for(entity_type: EntityType) -> Result<&'static EntityDescriptor, Error> {
    DESCRIPTORS
        .iter()
        .find(|d| d.entity_type == entity_type)
        .ok_or_else(|| Error::UnknownEntityType(entity_type.to_string()))
}

/// Every table known by the loader
pub fn descriptors() -> &'static [EntityDescriptor] {
    &DESCRIPTORS
}
