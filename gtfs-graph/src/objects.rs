pub use crate::enums::*;
use crate::decoder::Record;
use crate::ids::{AgencyAndId, EntityKey};
use crate::values::default_route_color;
use crate::Error;
use chrono::{Datelike, NaiveDate, Weekday};
use rgb::RGB8;

use std::fmt;

/// An agency operating the transit services. See <https://gtfs.org/reference/static/#agencytxt>
///
/// When the feed gives no `agency_id`, the loader fills it with the default agency id,
/// or with the agency name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Agency {
    /// Unique technical identifier (not for the traveller) of the agency
    pub id: Option<String>,
    /// Full name of the transit agency
    pub name: String,
    /// Full url of the transit agency
    pub url: String,
    /// Timezone where the transit agency is located
    pub timezone: String,
    /// Primary language used by this transit agency
    pub lang: Option<String>,
    /// A voice telephone number for the specified agency
    pub phone: Option<String>,
    /// URL of a web page that allows a rider to purchase tickets or other fare instruments for that agency online
    pub fare_url: Option<String>,
    /// Email address actively monitored by the agency’s customer service department
    pub email: Option<String>,
}

impl Agency {
    fn from_record(r: &mut Record) -> Result<Self, Error> {
        Ok(Self {
            id: r.opt_text("agency_id"),
            name: r.text("agency_name"),
            url: r.text("agency_url"),
            timezone: r.text("agency_timezone"),
            lang: r.opt_text("agency_lang"),
            phone: r.opt_text("agency_phone"),
            fare_url: r.opt_text("agency_fare_url"),
            email: r.opt_text("agency_email"),
        })
    }
}

impl fmt::Display for Agency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A vehicle block, extension of the GTFS used by some operators
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    /// Row number in the table, assigned by the loader
    pub id: u32,
    pub sequence_number: i32,
    pub variable_number: i32,
    pub route_number: i32,
    pub run_number: i32,
}

impl Block {
    fn from_record(r: &mut Record) -> Result<Self, Error> {
        Ok(Self {
            id: 0,
            sequence_number: r.int("block_seq_num")?.unwrap_or_default(),
            variable_number: r.int("block_var_num")?.unwrap_or_default(),
            route_number: r.int("block_route_num")?.unwrap_or_default(),
            run_number: r.int("block_run_num")?.unwrap_or_default(),
        })
    }
}

/// One point of a shape. See <https://gtfs.org/reference/static/#shapestxt>
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapePoint {
    /// Row number in the table, assigned by the loader
    pub id: u32,
    /// Identifier of the shape this point belongs to
    pub shape_id: AgencyAndId,
    pub latitude: f64,
    pub longitude: f64,
    /// Order of the point in the shape
    pub sequence: u32,
    /// Distance traveled along the shape from the first point
    pub dist_traveled: Option<f64>,
}

impl ShapePoint {
    fn from_record(r: &mut Record) -> Result<Self, Error> {
        Ok(Self {
            id: 0,
            shape_id: r.id("shape_id"),
            latitude: r.float("shape_pt_lat"),
            longitude: r.float("shape_pt_lon"),
            sequence: r.int("shape_pt_sequence")?.unwrap_or_default(),
            dist_traveled: r.opt_float("shape_dist_traveled"),
        })
    }
}

/// A note that can be attached to other objects, extension of the GTFS
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Note {
    pub id: AgencyAndId,
    pub mark: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl Note {
    fn from_record(r: &mut Record) -> Result<Self, Error> {
        Ok(Self {
            id: r.id("note_id"),
            mark: r.opt_text("note_mark"),
            title: r.opt_text("note_title"),
            description: r.opt_text("note_desc"),
        })
    }
}

/// A group of stops. See <https://gtfs.org/reference/static/#areastxt>
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Area {
    pub id: AgencyAndId,
    pub name: Option<String>,
}

impl Area {
    fn from_record(r: &mut Record) -> Result<Self, Error> {
        Ok(Self {
            id: r.id("area_id"),
            name: r.opt_text("area_name"),
        })
    }
}

/// A route is a commercial line (there can be various stop sequences for a same line). See <https://gtfs.org/reference/static/#routestxt>
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Route {
    /// Unique technical (not for the traveller) identifier for the route, scoped by its agency
    pub id: AgencyAndId,
    /// Agency for the specified route. The default agency when the column is empty
    pub agency_id: String,
    /// Short name of a route. This will often be a short, abstract identifier like "32", "100X", or "Green"
    pub short_name: String,
    /// Full name of a route. This name is generally more descriptive than the short_name
    pub long_name: String,
    /// Description of a route that provides useful, quality information
    pub desc: Option<String>,
    /// Indicates the type of transportation used on a route
    pub route_type: RouteType,
    /// URL of a web page about the particular route
    pub url: Option<String>,
    /// Route color designation that matches public facing material
    pub color: RGB8,
    /// Legible color to use for text drawn against a background of [Route::color]
    pub text_color: RGB8,
    /// Orders the routes in a way which is ideal for presentation to customers
    pub order: Option<u32>,
    /// Indicates whether a rider can board the transit vehicle anywhere along the vehicle’s travel path
    pub continuous_pickup: ContinuousPickupDropOff,
    /// Indicates whether a rider can alight from the transit vehicle at any point along the vehicle’s travel path
    pub continuous_drop_off: ContinuousPickupDropOff,
}

impl Route {
    fn from_record(r: &mut Record) -> Result<Self, Error> {
        Ok(Self {
            id: r.id("route_id"),
            agency_id: r.text("agency_id"),
            short_name: r.text("route_short_name"),
            long_name: r.text("route_long_name"),
            desc: r.opt_text("route_desc"),
            route_type: r.code("route_type")?.unwrap_or_default(),
            url: r.opt_text("route_url"),
            color: r.opt_color("route_color").unwrap_or_else(default_route_color),
            text_color: r.opt_color("route_text_color").unwrap_or_default(),
            order: r.int("route_sort_order")?,
            continuous_pickup: r.code("continuous_pickup")?.unwrap_or_default(),
            continuous_drop_off: r.code("continuous_drop_off")?.unwrap_or_default(),
        })
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.long_name.is_empty() {
            write!(f, "{}", self.long_name)
        } else {
            write!(f, "{}", self.short_name)
        }
    }
}

/// A level in a station. See <https://gtfs.org/reference/static/#levelstxt>
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Level {
    pub id: AgencyAndId,
    /// Numeric index of the level that indicates relative position of this level in relation to other levels
    pub index: f64,
    pub name: Option<String>,
}

impl Level {
    fn from_record(r: &mut Record) -> Result<Self, Error> {
        Ok(Self {
            id: r.id("level_id"),
            index: r.float("level_index"),
            name: r.opt_text("level_name"),
        })
    }
}

/// A physical stop, station or area. See <https://gtfs.org/reference/static/#stopstxt>
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stop {
    /// Unique technical identifier (not for the traveller) of the stop
    pub id: AgencyAndId,
    /// Short text or a number that identifies the location for riders
    pub code: Option<String>,
    ///Name of the location. Use a name that people will understand in the local and tourist vernacular
    pub name: String,
    /// Description of the location that provides useful, quality information
    pub description: String,
    /// Latitude of the stop
    pub latitude: Option<f64>,
    /// Longitude of the stop
    pub longitude: Option<f64>,
    /// Identifies the fare zone for a stop
    pub zone_id: Option<String>,
    /// URL of a web page about the location
    pub url: Option<String>,
    /// Type of the location
    pub location_type: LocationType,
    /// Defines hierarchy between the different locations
    pub parent_station: Option<AgencyAndId>,
    /// Timezone of the location
    pub timezone: Option<String>,
    /// Indicates whether wheelchair boardings are possible from the location
    pub wheelchair_boarding: Availability,
    /// Level of the location. The same level can be used by multiple unlinked stations
    pub level_id: Option<AgencyAndId>,
    /// Platform identifier for a platform stop (a stop belonging to a station)
    pub platform_code: Option<String>,
}

impl Stop {
    fn from_record(r: &mut Record) -> Result<Self, Error> {
        Ok(Self {
            id: r.id("stop_id"),
            code: r.opt_text("stop_code"),
            name: r.text("stop_name"),
            description: r.text("stop_desc"),
            latitude: r.opt_float("stop_lat"),
            longitude: r.opt_float("stop_lon"),
            zone_id: r.opt_text("zone_id"),
            url: r.opt_text("stop_url"),
            location_type: r.code("location_type")?.unwrap_or_default(),
            parent_station: r.opt_id("parent_station"),
            timezone: r.opt_text("stop_timezone"),
            wheelchair_boarding: r.code("wheelchair_boarding")?.unwrap_or_default(),
            level_id: r.opt_id("level_id"),
            platform_code: r.opt_text("platform_code"),
        })
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A Trip is a vehicle that follows a sequence of [StopTime] on certain days. See <https://gtfs.org/reference/static/#tripstxt>
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trip {
    /// Unique technical identifier (not for the traveller) for the Trip, scoped by the agency of its route
    pub id: AgencyAndId,
    /// References the [ServiceCalendar] on which this trip runs
    pub service_id: AgencyAndId,
    /// References along which [Route] this trip runs
    pub route_id: AgencyAndId,
    /// Shape of the trip
    pub shape_id: Option<AgencyAndId>,
    /// Text that appears on signage identifying the trip's destination to riders
    pub headsign: Option<String>,
    /// Public facing text used to identify the trip to riders, for instance, to identify train numbers for commuter rail trips
    pub short_name: Option<String>,
    /// Indicates the direction of travel for a trip. This field is not used in routing; it provides a way to separate trips by direction when publishing time tables
    pub direction_id: Option<DirectionType>,
    /// Identifies the block to which the trip belongs. A block consists of a single trip or many sequential trips made using the same vehicle
    pub block_id: Option<AgencyAndId>,
    /// Indicates wheelchair accessibility
    pub wheelchair_accessible: Availability,
    /// Indicates whether bikes are allowed
    pub bikes_allowed: BikesAllowedType,
}

impl Trip {
    fn from_record(r: &mut Record) -> Result<Self, Error> {
        Ok(Self {
            id: r.id("trip_id"),
            service_id: r.id("service_id"),
            route_id: r.id("route_id"),
            shape_id: r.opt_id("shape_id"),
            headsign: r.opt_text("trip_headsign"),
            short_name: r.opt_text("trip_short_name"),
            direction_id: r.code("direction_id")?,
            block_id: r.opt_id("block_id"),
            wheelchair_accessible: r.code("wheelchair_accessible")?.unwrap_or_default(),
            bikes_allowed: r.code("bikes_allowed")?.unwrap_or_default(),
        })
    }
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Trip {} to {}",
            self.id,
            self.headsign.as_deref().unwrap_or("")
        )
    }
}

/// The moment where a vehicle, running on [Trip] stops at a [Stop]. See <https://gtfs.org/reference/static/#stopstxt>
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StopTime {
    /// Row number in the table, assigned by the loader
    pub id: u32,
    /// [Trip] to which this stop time belongs to
    pub trip_id: AgencyAndId,
    /// [Stop] where the vehicle stops
    pub stop_id: AgencyAndId,
    /// Arrival time of the stop time, in seconds since the start of the service day.
    /// It's an option since the intermediate stops can have no arrival
    /// and this arrival needs to be interpolated
    pub arrival_time: Option<u32>,
    /// Departure time of the stop time, in seconds since the start of the service day
    pub departure_time: Option<u32>,
    /// Order of stops for a particular trip. The values must increase along the trip but do not need to be consecutive
    pub stop_sequence: u32,
    /// Text that appears on signage identifying the trip's destination to riders
    pub stop_headsign: Option<String>,
    /// Indicates pickup method
    pub pickup_type: PickupDropOffType,
    /// Indicates drop off method
    pub drop_off_type: PickupDropOffType,
    /// Indicates whether a rider can board the transit vehicle anywhere along the vehicle’s travel path
    pub continuous_pickup: ContinuousPickupDropOff,
    /// Indicates whether a rider can alight from the transit vehicle at any point along the vehicle’s travel path
    pub continuous_drop_off: ContinuousPickupDropOff,
    /// Actual distance traveled along the associated shape, from the first stop to the stop specified in this record
    pub shape_dist_traveled: Option<f64>,
    /// Indicates if arrival and departure times for a stop are strictly adhered to by the vehicle or if they are instead approximate and/or interpolated times
    pub timepoint: TimepointType,
}

impl StopTime {
    fn from_record(r: &mut Record) -> Result<Self, Error> {
        Ok(Self {
            id: 0,
            trip_id: r.id("trip_id"),
            stop_id: r.id("stop_id"),
            arrival_time: r.opt_time("arrival_time"),
            departure_time: r.opt_time("departure_time"),
            stop_sequence: r.int("stop_sequence")?.unwrap_or_default(),
            stop_headsign: r.opt_text("stop_headsign"),
            pickup_type: r.code("pickup_type")?.unwrap_or_default(),
            drop_off_type: r.code("drop_off_type")?.unwrap_or_default(),
            continuous_pickup: r.code("continuous_pickup")?.unwrap_or_default(),
            continuous_drop_off: r.code("continuous_drop_off")?.unwrap_or_default(),
            shape_dist_traveled: r.opt_float("shape_dist_traveled"),
            timepoint: r.code("timepoint")?.unwrap_or_default(),
        })
    }
}

/// A calender describes on which days the vehicle runs. See <https://gtfs.org/reference/static/#calendartxt>
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCalendar {
    /// Unique technical identifier (not for the traveller) of this calendar
    pub id: AgencyAndId,
    /// Does the service run on mondays
    pub monday: bool,
    /// Does the service run on tuesdays
    pub tuesday: bool,
    /// Does the service run on wednesdays
    pub wednesday: bool,
    /// Does the service run on thursdays
    pub thursday: bool,
    /// Does the service run on fridays
    pub friday: bool,
    /// Does the service run on saturdays
    pub saturday: bool,
    /// Does the service run on sundays
    pub sunday: bool,
    /// Start service day for the service interval
    pub start_date: NaiveDate,
    /// End service day for the service interval. This service day is included in the interval
    pub end_date: NaiveDate,
}

impl ServiceCalendar {
    fn from_record(r: &mut Record) -> Result<Self, Error> {
        Ok(Self {
            id: r.id("service_id"),
            monday: r.bool("monday"),
            tuesday: r.bool("tuesday"),
            wednesday: r.bool("wednesday"),
            thursday: r.bool("thursday"),
            friday: r.bool("friday"),
            saturday: r.bool("saturday"),
            sunday: r.bool("sunday"),
            start_date: r.date("start_date"),
            end_date: r.date("end_date"),
        })
    }

    /// Returns true if there is a service running on that day
    pub fn valid_weekday(&self, date: NaiveDate) -> bool {
        match date.weekday() {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }
}

impl fmt::Display for ServiceCalendar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} - {}", self.start_date, self.end_date)
    }
}

/// Defines a specific date that can be added or removed from a [ServiceCalendar]. See <https://gtfs.org/reference/static/#calendar_datestxt>
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCalendarDate {
    /// Row number in the table, assigned by the loader
    pub id: u32,
    /// Identifier of the service that is modified at this date
    pub service_id: AgencyAndId,
    /// Date where the service will be added or deleted
    pub date: NaiveDate,
    /// Is the service added or deleted
    pub exception_type: Exception,
}

impl ServiceCalendarDate {
    fn from_record(r: &mut Record) -> Result<Self, Error> {
        let exception_type = r.code("exception_type")?;
        Ok(Self {
            id: 0,
            service_id: r.id("service_id"),
            date: r.date("date"),
            exception_type: r.required("exception_type", exception_type)?,
        })
    }
}

/// A fare class. See <https://gtfs.org/reference/static/#fare_attributestxt>
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FareAttribute {
    /// Unique technical (not for the traveller) identifier for the FareAttribute, scoped by its agency
    pub id: AgencyAndId,
    /// Fare price, in the unit specified by [FareAttribute::currency]
    pub price: f64,
    /// Currency used to pay the fare
    pub currency: String,
    /// Indicates when the fare must be paid
    pub payment_method: PaymentMethod,
    /// Indicates the number of transfers permitted on this fare
    pub transfers: Transfers,
    /// Agency for the fare. The default agency when the column is empty
    pub agency_id: String,
    /// Length of time in seconds before a transfer expires
    pub transfer_duration: Option<u32>,
}

impl FareAttribute {
    fn from_record(r: &mut Record) -> Result<Self, Error> {
        Ok(Self {
            id: r.id("fare_id"),
            price: r.float("price"),
            currency: r.text("currency_type"),
            payment_method: r.code("payment_method")?.unwrap_or_default(),
            transfers: r.code("transfers")?.unwrap_or_default(),
            agency_id: r.text("agency_id"),
            transfer_duration: r.int("transfer_duration")?,
        })
    }
}

/// Rule applying a [FareAttribute] to routes and zones. See <https://gtfs.org/reference/static/#fare_rulestxt>
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FareRule {
    /// Row number in the table, assigned by the loader
    pub id: u32,
    pub fare_id: AgencyAndId,
    pub route_id: Option<AgencyAndId>,
    pub origin_id: Option<String>,
    pub destination_id: Option<String>,
    pub contains_id: Option<String>,
}

impl FareRule {
    fn from_record(r: &mut Record) -> Result<Self, Error> {
        Ok(Self {
            id: 0,
            fare_id: r.id("fare_id"),
            route_id: r.opt_id("route_id"),
            origin_id: r.opt_text("origin_id"),
            destination_id: r.opt_text("destination_id"),
            contains_id: r.opt_text("contains_id"),
        })
    }
}

/// Timetables can be defined by the frequency of their vehicles. See <https://gtfs.org/reference/static/#frequenciestxt>
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frequency {
    /// Row number in the table, assigned by the loader
    pub id: u32,
    /// References the [Trip] that uses frequency
    pub trip_id: AgencyAndId,
    /// Time at which the first vehicle departs from the first stop of the trip
    pub start_time: u32,
    /// Time at which service changes to a different headway (or ceases) at the first stop in the trip
    pub end_time: u32,
    /// Time, in seconds, between departures from the same stop (headway) for the trip, during the time interval specified by start_time and end_time
    pub headway_secs: u32,
    /// Indicates the type of service for a trip
    pub exact_times: ExactTimes,
}

impl Frequency {
    fn from_record(r: &mut Record) -> Result<Self, Error> {
        Ok(Self {
            id: 0,
            trip_id: r.id("trip_id"),
            start_time: r.time("start_time"),
            end_time: r.time("end_time"),
            headway_secs: r.int("headway_secs")?.unwrap_or_default(),
            exact_times: r.code("exact_times")?.unwrap_or_default(),
        })
    }
}

/// Pathway going from a stop to another. See <https://gtfs.org/reference/static/#pathwaystxt>
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pathway {
    /// Uniquely identifies the pathway
    pub id: AgencyAndId,
    /// Location at which the pathway begins
    pub from_stop_id: AgencyAndId,
    /// Location at which the pathway ends
    pub to_stop_id: AgencyAndId,
    /// Type of pathway between the specified (from_stop_id, to_stop_id) pair
    pub mode: PathwayMode,
    /// Indicates in which direction the pathway can be used
    pub is_bidirectional: PathwayDirectionType,
    /// Horizontal length in meters of the pathway from the origin location to the destination location
    pub length: Option<f64>,
    /// Average time in seconds needed to walk through the pathway from the origin location to the destination location
    pub traversal_time: Option<u32>,
    /// Number of stairs of the pathway
    pub stair_count: Option<i32>,
    /// Maximum slope ratio of the pathway
    pub max_slope: Option<f64>,
    /// Minimum width of the pathway in meters
    pub min_width: Option<f64>,
    /// String of text from physical signage visible to transit riders
    pub signposted_as: Option<String>,
    /// Same than the signposted_as field, but when the pathways is used backward
    pub reversed_signposted_as: Option<String>,
}

impl Pathway {
    fn from_record(r: &mut Record) -> Result<Self, Error> {
        Ok(Self {
            id: r.id("pathway_id"),
            from_stop_id: r.id("from_stop_id"),
            to_stop_id: r.id("to_stop_id"),
            mode: r.code("pathway_mode")?.unwrap_or_default(),
            is_bidirectional: r.code("is_bidirectional")?.unwrap_or_default(),
            length: r.opt_float("length"),
            traversal_time: r.int("traversal_time")?,
            stair_count: r.int("stair_count")?,
            max_slope: r.opt_float("max_slope"),
            min_width: r.opt_float("min_width"),
            signposted_as: r.opt_text("signposted_as"),
            reversed_signposted_as: r.opt_text("reversed_signposted_as"),
        })
    }
}

/// Connection between two stops, routes or trips. See <https://gtfs.org/reference/static/#transferstxt>
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transfer {
    /// Row number in the table, assigned by the loader
    pub id: u32,
    pub from_stop_id: Option<AgencyAndId>,
    pub to_stop_id: Option<AgencyAndId>,
    pub from_route_id: Option<AgencyAndId>,
    pub to_route_id: Option<AgencyAndId>,
    pub from_trip_id: Option<AgencyAndId>,
    pub to_trip_id: Option<AgencyAndId>,
    /// Type of the transfer
    pub transfer_type: TransferType,
    /// Minimum time needed to make the transfer in seconds
    pub min_transfer_time: Option<u32>,
}

impl Transfer {
    fn from_record(r: &mut Record) -> Result<Self, Error> {
        Ok(Self {
            id: 0,
            from_stop_id: r.opt_id("from_stop_id"),
            to_stop_id: r.opt_id("to_stop_id"),
            from_route_id: r.opt_id("from_route_id"),
            to_route_id: r.opt_id("to_route_id"),
            from_trip_id: r.opt_id("from_trip_id"),
            to_trip_id: r.opt_id("to_trip_id"),
            transfer_type: r.code("transfer_type")?.unwrap_or_default(),
            min_transfer_time: r.int("min_transfer_time")?,
        })
    }
}

/// Meta-data about the feed. See <https://gtfs.org/reference/static/#feed_infotxt>
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedInfo {
    /// Row number in the table, assigned by the loader
    pub id: u32,
    /// Full name of the organization that publishes the dataset.
    pub name: String,
    /// URL of the dataset publishing organization's website
    pub url: String,
    /// Default language used for the text in this dataset
    pub lang: String,
    /// Defines the language that should be used when the data consumer doesn’t know the language of the rider
    pub default_lang: Option<String>,
    /// The dataset provides complete and reliable schedule information for service in the period from this date
    pub start_date: Option<NaiveDate>,
    ///The dataset provides complete and reliable schedule information for service in the period until this date
    pub end_date: Option<NaiveDate>,
    /// String that indicates the current version of their GTFS dataset
    pub version: Option<String>,
    /// Email address for communication regarding the GTFS dataset and data publishing practices
    pub contact_email: Option<String>,
    /// URL for contact information, a web-form, support desk, or other tools for communication regarding the GTFS dataset and data publishing practices
    pub contact_url: Option<String>,
}

impl FeedInfo {
    fn from_record(r: &mut Record) -> Result<Self, Error> {
        Ok(Self {
            id: 0,
            name: r.text("feed_publisher_name"),
            url: r.text("feed_publisher_url"),
            lang: r.text("feed_lang"),
            default_lang: r.opt_text("default_lang"),
            start_date: r.opt_date("feed_start_date"),
            end_date: r.opt_date("feed_end_date"),
            version: r.opt_text("feed_version"),
            contact_email: r.opt_text("feed_contact_email"),
            contact_url: r.opt_text("feed_contact_url"),
        })
    }
}

impl fmt::Display for FeedInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Passenger counts, extension of the GTFS
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ridership {
    /// Row number in the table, assigned by the loader
    pub id: u32,
    pub agency_id: String,
    pub route_id: Option<String>,
    pub trip_id: Option<String>,
    pub stop_id: Option<String>,
    pub stop_sequence: Option<u32>,
    pub total_boardings: u32,
    pub total_alightings: u32,
    pub average_load: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Ridership {
    fn from_record(r: &mut Record) -> Result<Self, Error> {
        Ok(Self {
            id: 0,
            agency_id: r.text("agency_id"),
            route_id: r.opt_text("route_id"),
            trip_id: r.opt_text("trip_id"),
            stop_id: r.opt_text("stop_id"),
            stop_sequence: r.int("stop_sequence")?,
            total_boardings: r.int("total_boardings")?.unwrap_or_default(),
            total_alightings: r.int("total_alightings")?.unwrap_or_default(),
            average_load: r.opt_float("average_load"),
            start_date: r.opt_date("ridership_start_date"),
            end_date: r.opt_date("ridership_end_date"),
        })
    }
}

/// A translated value of a text field. See <https://gtfs.org/reference/static/#translationstxt>
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Translation {
    /// Row number in the table, assigned by the loader
    pub id: u32,
    pub table_name: String,
    pub field_name: String,
    pub language: String,
    pub translation: String,
    pub record_id: Option<String>,
    pub record_sub_id: Option<String>,
    pub field_value: Option<String>,
}

impl Translation {
    fn from_record(r: &mut Record) -> Result<Self, Error> {
        Ok(Self {
            id: 0,
            table_name: r.text("table_name"),
            field_name: r.text("field_name"),
            language: r.text("language"),
            translation: r.text("translation"),
            record_id: r.opt_text("record_id"),
            record_sub_id: r.opt_text("record_sub_id"),
            field_value: r.opt_text("field_value"),
        })
    }
}

/// A fare zone with its position, extension of the GTFS
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Zone {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub name: Option<String>,
}

impl Zone {
    fn from_record(r: &mut Record) -> Result<Self, Error> {
        Ok(Self {
            id: r.text("zone_id"),
            latitude: r.float("zone_lat"),
            longitude: r.float("zone_lon"),
            name: r.opt_text("zone_name"),
        })
    }
}

/// Implemented by every entity struct, to get it back from an [Entity]
pub trait TypedEntity: Sized {
    const ENTITY_TYPE: EntityType;

    fn from_entity(entity: &Entity) -> Option<&Self>;
}

macro_rules! entities {
    ($($name:ident),* $(,)?) => {
        /// Any decoded row, whatever its table
        #[derive(Debug, Clone, PartialEq)]
        pub enum Entity {
            $($name($name),)*
        }

        impl Entity {
            /// Builds the entity of `entity_type` from a decoded row
            pub fn from_record(entity_type: EntityType, mut record: Record) -> Result<Entity, Error> {
                Ok(match entity_type {
                    $(EntityType::$name => Entity::$name($name::from_record(&mut record)?),)*
                })
            }

            pub fn entity_type(&self) -> EntityType {
                match self {
                    $(Entity::$name(_) => EntityType::$name,)*
                }
            }
        }

        $(
            impl From<$name> for Entity {
                fn from(e: $name) -> Self {
                    Entity::$name(e)
                }
            }

            impl TypedEntity for $name {
                const ENTITY_TYPE: EntityType = EntityType::$name;

                fn from_entity(entity: &Entity) -> Option<&Self> {
                    match entity {
                        Entity::$name(e) => Some(e),
                        _ => None,
                    }
                }
            }
        )*
    };
}

entities!(
    Agency,
    Block,
    ShapePoint,
    Note,
    Area,
    Route,
    Level,
    Stop,
    Trip,
    StopTime,
    ServiceCalendar,
    ServiceCalendarDate,
    FareAttribute,
    FareRule,
    Frequency,
    Pathway,
    Transfer,
    FeedInfo,
    Ridership,
    Translation,
    Zone,
);

impl Entity {
    /// The identifier under which the entity is stored
    pub fn key(&self) -> EntityKey {
        match self {
            Entity::Agency(a) => EntityKey::Local(a.id.clone().unwrap_or_default()),
            Entity::Zone(z) => EntityKey::Local(z.id.clone()),
            Entity::Note(Note { id, .. })
            | Entity::Area(Area { id, .. })
            | Entity::Route(Route { id, .. })
            | Entity::Level(Level { id, .. })
            | Entity::Stop(Stop { id, .. })
            | Entity::Trip(Trip { id, .. })
            | Entity::ServiceCalendar(ServiceCalendar { id, .. })
            | Entity::FareAttribute(FareAttribute { id, .. })
            | Entity::Pathway(Pathway { id, .. }) => EntityKey::Composite(id.clone()),
            Entity::Block(Block { id, .. })
            | Entity::ShapePoint(ShapePoint { id, .. })
            | Entity::StopTime(StopTime { id, .. })
            | Entity::ServiceCalendarDate(ServiceCalendarDate { id, .. })
            | Entity::FareRule(FareRule { id, .. })
            | Entity::Frequency(Frequency { id, .. })
            | Entity::Transfer(Transfer { id, .. })
            | Entity::FeedInfo(FeedInfo { id, .. })
            | Entity::Ridership(Ridership { id, .. })
            | Entity::Translation(Translation { id, .. }) => EntityKey::Row(*id),
        }
    }

    /// The identifier whose local part must be unique among the entities of the same type
    pub fn claimed_id(&self) -> Option<&AgencyAndId> {
        match self {
            Entity::Pathway(Pathway { id, .. })
            | Entity::Level(Level { id, .. })
            | Entity::Route(Route { id, .. })
            | Entity::Trip(Trip { id, .. })
            | Entity::Stop(Stop { id, .. })
            | Entity::FareAttribute(FareAttribute { id, .. })
            | Entity::Note(Note { id, .. })
            | Entity::Area(Area { id, .. }) => Some(id),
            _ => None,
        }
    }

    /// The row number of the entities identified by their position in the table
    pub(crate) fn row_id_mut(&mut self) -> Option<&mut u32> {
        match self {
            Entity::Block(Block { id, .. })
            | Entity::ShapePoint(ShapePoint { id, .. })
            | Entity::StopTime(StopTime { id, .. })
            | Entity::ServiceCalendarDate(ServiceCalendarDate { id, .. })
            | Entity::FareRule(FareRule { id, .. })
            | Entity::Frequency(Frequency { id, .. })
            | Entity::Transfer(Transfer { id, .. })
            | Entity::FeedInfo(FeedInfo { id, .. })
            | Entity::Ridership(Ridership { id, .. })
            | Entity::Translation(Translation { id, .. }) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.entity_type(), self.key())
    }
}
