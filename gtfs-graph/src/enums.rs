use std::convert::TryFrom;
use std::fmt;

/// All the entity types this library loads, one per GTFS table
///
/// The order of [EntityType::LOAD_ORDER] matters: a table can only reference ids claimed
/// by the tables loaded before it.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityType {
    /// [crate::Agency] <https://gtfs.org/reference/static/#agencytxt>
    Agency,
    /// [crate::Block], extension of the GTFS
    Block,
    /// [crate::ShapePoint] <https://gtfs.org/reference/static/#shapestxt>
    ShapePoint,
    /// [crate::Note], extension of the GTFS
    Note,
    /// [crate::Area] <https://gtfs.org/reference/static/#areastxt>
    Area,
    /// [crate::Route] <https://gtfs.org/reference/static/#routestxt>
    Route,
    /// [crate::Level] <https://gtfs.org/reference/static/#levelstxt>
    Level,
    /// [crate::Stop] <https://gtfs.org/reference/static/#stopstxt>
    Stop,
    /// [crate::Trip] <https://gtfs.org/reference/static/#tripstxt>
    Trip,
    /// [crate::StopTime] <https://gtfs.org/reference/static/#stop_timestxt>
    StopTime,
    /// [crate::ServiceCalendar] <https://gtfs.org/reference/static/#calendartxt>
    ServiceCalendar,
    /// [crate::ServiceCalendarDate] <https://gtfs.org/reference/static/#calendar_datestxt>
    ServiceCalendarDate,
    /// [crate::FareAttribute] <https://gtfs.org/reference/static/#fare_attributestxt>
    FareAttribute,
    /// [crate::FareRule] <https://gtfs.org/reference/static/#fare_rulestxt>
    FareRule,
    /// [crate::Frequency] <https://gtfs.org/reference/static/#frequenciestxt>
    Frequency,
    /// [crate::Pathway] <https://gtfs.org/reference/static/#pathwaystxt>
    Pathway,
    /// [crate::Transfer] <https://gtfs.org/reference/static/#transferstxt>
    Transfer,
    /// [crate::FeedInfo] <https://gtfs.org/reference/static/#feed_infotxt>
    FeedInfo,
    /// [crate::Ridership], extension of the GTFS
    Ridership,
    /// [crate::Translation] <https://gtfs.org/reference/static/#translationstxt>
    Translation,
    /// [crate::Zone], extension of the GTFS
    Zone,
}

impl EntityType {
    /// Default load order, referents before the tables referencing them
    pub const LOAD_ORDER: [EntityType; 21] = [
        EntityType::Agency,
        EntityType::Block,
        EntityType::ShapePoint,
        EntityType::Note,
        EntityType::Area,
        EntityType::Route,
        EntityType::Level,
        EntityType::Stop,
        EntityType::Trip,
        EntityType::StopTime,
        EntityType::ServiceCalendar,
        EntityType::ServiceCalendarDate,
        EntityType::FareAttribute,
        EntityType::FareRule,
        EntityType::Frequency,
        EntityType::Pathway,
        EntityType::Transfer,
        EntityType::FeedInfo,
        EntityType::Ridership,
        EntityType::Translation,
        EntityType::Zone,
    ];

    /// Finds a type from its name (`Stop`), its table name (`stops`) or its file name (`stops.txt`)
    pub fn from_name(name: &str) -> Option<EntityType> {
        let table = name.strip_suffix(".txt").unwrap_or(name);
        Self::LOAD_ORDER.iter().copied().find(|t| {
            crate::schema::descriptor_for(*t)
                .map(|d| d.file_name.strip_suffix(".txt") == Some(table))
                .unwrap_or(false)
                || format!("{:?}", t) == name
        })
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Describes the kind of [crate::Stop]. See <https://gtfs.org/reference/static/#stopstxt> `location_type`
#[derive(Derivative, Debug, Copy, Clone, PartialEq, Eq)]
#[derivative(Default(bound = ""))]
pub enum LocationType {
    /// Stop (or Platform). A location where passengers board or disembark from a transit vehicle. Is called a platform when defined within a parent_station
    #[derivative(Default)]
    StopPoint,
    /// Station. A physical structure or area that contains one or more platform
    StopArea,
    /// A location where passengers can enter or exit a station from the street
    StationEntrance,
    /// A location within a station, not matching any other [crate::Stop::location_type], which can be used to link together pathways define in pathways.txt.
    GenericNode,
    /// A specific location on a platform, where passengers can board and/or alight vehicles
    BoardingArea,
    /// An unknown value
    Unknown(i32),
}

impl From<i32> for LocationType {
    fn from(code: i32) -> Self {
        match code {
            0 => LocationType::StopPoint,
            1 => LocationType::StopArea,
            2 => LocationType::StationEntrance,
            3 => LocationType::GenericNode,
            4 => LocationType::BoardingArea,
            i => LocationType::Unknown(i),
        }
    }
}

/// Describes the kind of [crate::Route]. See <https://gtfs.org/reference/static/#routestxt> `route_type`
///
/// Some route types are extended GTFS (<https://developers.google.com/transit/gtfs/reference/extended-route-types>)
#[derive(Debug, Derivative, Copy, Clone, PartialEq, Eq, Hash)]
#[derivative(Default(bound = ""))]
pub enum RouteType {
    /// Tram, Streetcar, Light rail. Any light rail or street level system within a metropolitan area
    Tramway,
    /// Subway, Metro. Any underground rail system within a metropolitan area
    Subway,
    /// Used for intercity or long-distance travel
    Rail,
    /// Used for short- and long-distance bus routes
    #[derivative(Default)]
    Bus,
    /// Used for short- and long-distance boat service
    Ferry,
    /// Used for street-level rail cars where the cable runs beneath the vehicle, e.g., cable car in San Francisco
    CableCar,
    /// Aerial lift, suspended cable car (e.g., gondola lift, aerial tramway)
    Gondola,
    /// Any rail system designed for steep inclines
    Funicular,
    /// (extended) Used for intercity bus services
    Coach,
    /// (extended) Airplanes
    Air,
    /// (extended) Taxi, Cab
    Taxi,
    /// (extended) any other value
    Other(i32),
}

impl From<i32> for RouteType {
    fn from(i: i32) -> Self {
        let hundreds = i / 100;
        match (i, hundreds) {
            (0, _) | (_, 9) => RouteType::Tramway,
            (1, _) | (_, 4) => RouteType::Subway,
            (2, _) | (_, 1) => RouteType::Rail,
            (3, _) | (_, 7) | (_, 8) => RouteType::Bus,
            (4, _) | (_, 10) | (_, 12) => RouteType::Ferry,
            (5, _) => RouteType::CableCar,
            (6, _) | (_, 13) => RouteType::Gondola,
            (7, _) | (_, 14) => RouteType::Funicular,
            (_, 2) => RouteType::Coach,
            (_, 11) => RouteType::Air,
            (_, 15) => RouteType::Taxi,
            _ => RouteType::Other(i),
        }
    }
}

/// Describes if and how a traveller can board or alight the vehicle. See <https://gtfs.org/reference/static/#stop_timestxt> `pickup_type` and `dropoff_type`
#[derive(Debug, Derivative, Copy, Clone, PartialEq, Eq)]
#[derivative(Default(bound = ""))]
pub enum PickupDropOffType {
    /// Regularly scheduled pickup or drop off (default when empty).
    #[derivative(Default)]
    Regular,
    /// No pickup or drop off available.
    NotAvailable,
    /// Must phone agency to arrange pickup or drop off.
    ArrangeByPhone,
    /// Must coordinate with driver to arrange pickup or drop off.
    CoordinateWithDriver,
    /// An unknown value not in the specification
    Unknown(i32),
}

impl From<i32> for PickupDropOffType {
    fn from(code: i32) -> Self {
        match code {
            0 => PickupDropOffType::Regular,
            1 => PickupDropOffType::NotAvailable,
            2 => PickupDropOffType::ArrangeByPhone,
            3 => PickupDropOffType::CoordinateWithDriver,
            i => PickupDropOffType::Unknown(i),
        }
    }
}

/// Indicates whether a rider can board the transit vehicle anywhere along the vehicle’s travel path
#[derive(Debug, Derivative, Copy, Clone, PartialEq, Eq)]
#[derivative(Default(bound = ""))]
pub enum ContinuousPickupDropOff {
    /// Continuous stopping pickup or drop off.
    Continuous,
    /// No continuous stopping pickup or drop off (default when empty).
    #[derivative(Default)]
    NotAvailable,
    /// Must phone agency to arrange continuous stopping pickup or drop off.
    ArrangeByPhone,
    /// Must coordinate with driver to arrange continuous stopping pickup or drop off.
    CoordinateWithDriver,
    /// An unknown value not in the specification
    Unknown(i32),
}

impl From<i32> for ContinuousPickupDropOff {
    fn from(code: i32) -> Self {
        match code {
            0 => ContinuousPickupDropOff::Continuous,
            1 => ContinuousPickupDropOff::NotAvailable,
            2 => ContinuousPickupDropOff::ArrangeByPhone,
            3 => ContinuousPickupDropOff::CoordinateWithDriver,
            i => ContinuousPickupDropOff::Unknown(i),
        }
    }
}

/// Describes if the stop time is exact or not. See <https://gtfs.org/reference/static/#stop_timestxt> `timepoint`
#[derive(Debug, Derivative, Copy, Clone, PartialEq, Eq)]
#[derivative(Default)]
pub enum TimepointType {
    /// Times are considered approximate
    Approximate = 0,
    /// Times are considered exact
    #[derivative(Default)]
    Exact = 1,
}

impl TryFrom<i32> for TimepointType {
    type Error = String;
    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(TimepointType::Approximate),
            1 => Ok(TimepointType::Exact),
            v => Err(format!("invalid value for timepoint: {}", v)),
        }
    }
}

/// Generic enum to define if a service (like wheelchair boarding) is available
#[derive(Debug, Derivative, PartialEq, Eq, Hash, Clone, Copy)]
#[derivative(Default)]
pub enum Availability {
    /// No information if the service is available
    #[derivative(Default)]
    InformationNotAvailable,
    /// The service is available
    Available,
    /// The service is not available
    NotAvailable,
    /// An unknown value not in the specification
    Unknown(i32),
}

impl From<i32> for Availability {
    fn from(code: i32) -> Self {
        match code {
            0 => Availability::InformationNotAvailable,
            1 => Availability::Available,
            2 => Availability::NotAvailable,
            i => Availability::Unknown(i),
        }
    }
}

/// Defines if a [crate::ServiceCalendarDate] is added or deleted from a [crate::ServiceCalendar]
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Exception {
    /// There will be a service on that day
    Added,
    /// There won’t be a service on that day
    Deleted,
}

impl TryFrom<i32> for Exception {
    type Error = String;
    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Exception::Added),
            2 => Ok(Exception::Deleted),
            v => Err(format!("invalid value for exception_type, expected 1 or 2: {}", v)),
        }
    }
}

/// Defines the direction of a [crate::Trip], only for display, not for routing. See <https://gtfs.org/reference/static/#tripstxt> `direction_id`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DirectionType {
    /// Travel in one direction (e.g. outbound travel).
    Outbound,
    /// Travel in the opposite direction (e.g. inbound travel).
    Inbound,
}

impl TryFrom<i32> for DirectionType {
    type Error = String;
    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(DirectionType::Outbound),
            1 => Ok(DirectionType::Inbound),
            v => Err(format!("invalid value for direction_id, expected 0 or 1: {}", v)),
        }
    }
}

/// Is the [crate::Trip] accessible with a bike. See <https://gtfs.org/reference/static/#tripstxt> `bikes_allowed`
#[derive(Debug, Derivative, Copy, Clone, PartialEq, Eq)]
#[derivative(Default())]
pub enum BikesAllowedType {
    /// No bike information for the trip
    #[derivative(Default)]
    NoBikeInfo,
    /// Vehicle being used on this particular trip can accommodate at least one bicycle
    AtLeastOneBike,
    /// No bicycles are allowed on this trip
    NoBikesAllowed,
    /// An unknown value not in the specification
    Unknown(i32),
}

impl From<i32> for BikesAllowedType {
    fn from(code: i32) -> Self {
        match code {
            0 => BikesAllowedType::NoBikeInfo,
            1 => BikesAllowedType::AtLeastOneBike,
            2 => BikesAllowedType::NoBikesAllowed,
            i => BikesAllowedType::Unknown(i),
        }
    }
}

/// Defines where a [crate::FareAttribute] can be paid
#[derive(Debug, Derivative, Copy, Clone, PartialEq, Eq)]
#[derivative(Default)]
pub enum PaymentMethod {
    /// Fare is paid on board
    #[derivative(Default)]
    Aboard,
    /// Fare must be paid before boarding
    PreBoarding,
}

impl TryFrom<i32> for PaymentMethod {
    type Error = String;
    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(PaymentMethod::Aboard),
            1 => Ok(PaymentMethod::PreBoarding),
            v => Err(format!("invalid value for payment_method, expected 0 or 1: {}", v)),
        }
    }
}

/// Defines if the [crate::Frequency] is exact (the vehicle runs exactly every n minutes) or not
#[derive(Debug, Derivative, Copy, Clone, PartialEq, Eq)]
#[derivative(Default)]
pub enum ExactTimes {
    /// Frequency-based trips
    #[derivative(Default)]
    FrequencyBased = 0,
    /// Schedule-based trips with the exact same headway throughout the day.
    ScheduleBased = 1,
}

impl TryFrom<i32> for ExactTimes {
    type Error = String;
    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ExactTimes::FrequencyBased),
            1 => Ok(ExactTimes::ScheduleBased),
            v => Err(format!("Invalid value `{}`, expected 0 or 1", v)),
        }
    }
}

/// Defines how many transfers can be done with on [crate::FareAttribute]
#[derive(Debug, Derivative, Copy, Clone, PartialEq, Eq)]
#[derivative(Default(bound = ""))]
pub enum Transfers {
    /// Unlimited transfers are permitted (empty value)
    #[derivative(Default)]
    Unlimited,
    /// No transfers permitted on this fare
    NoTransfer,
    /// Riders may transfer once
    UniqueTransfer,
    ///Riders may transfer twice
    TwoTransfers,
    /// Other transfer values
    Other(i32),
}

impl From<i32> for Transfers {
    fn from(code: i32) -> Self {
        match code {
            0 => Transfers::NoTransfer,
            1 => Transfers::UniqueTransfer,
            2 => Transfers::TwoTransfers,
            a => Transfers::Other(a),
        }
    }
}

/// Defines the type of a [crate::Transfer]
#[derive(Debug, Derivative, Copy, Clone, PartialEq, Eq)]
#[derivative(Default)]
pub enum TransferType {
    /// Recommended transfer point between routes
    #[derivative(Default)]
    Recommended,
    /// Departing vehicle waits for arriving one
    Timed,
    /// Transfer requires a minimum amount of time between arrival and departure to ensure a connection.
    MinTime,
    /// Transfer is not possible at this location
    Impossible,
    /// Passengers can stay onboard the same vehicle to the next trip (in-seat transfer)
    InSeat,
    /// In-seat transfers are not allowed, the passenger must alight
    InSeatNotAllowed,
}

impl TryFrom<i32> for TransferType {
    type Error = String;
    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(TransferType::Recommended),
            1 => Ok(TransferType::Timed),
            2 => Ok(TransferType::MinTime),
            3 => Ok(TransferType::Impossible),
            4 => Ok(TransferType::InSeat),
            5 => Ok(TransferType::InSeatNotAllowed),
            v => Err(format!("invalid value for transfer_type: {}", v)),
        }
    }
}

/// Type of pathway between its `from_stop_id` and `to_stop_id`
#[derive(Debug, Derivative, Copy, Clone, PartialEq, Eq)]
#[derivative(Default)]
pub enum PathwayMode {
    /// A walkway
    #[derivative(Default)]
    Walkway,
    /// Stairs
    Stairs,
    /// Moving sidewalk / travelator
    MovingSidewalk,
    /// Escalator
    Escalator,
    /// Elevator
    Elevator,
    /// A pathway that crosses into an area of the station where a
    /// proof of payment is required (usually via a physical payment gate)
    FareGate,
    /// Indicates a pathway exiting an area where proof-of-payment is required
    /// into an area where proof-of-payment is no longer required.
    ExitGate,
}

impl TryFrom<i32> for PathwayMode {
    type Error = String;
    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(PathwayMode::Walkway),
            2 => Ok(PathwayMode::Stairs),
            3 => Ok(PathwayMode::MovingSidewalk),
            4 => Ok(PathwayMode::Escalator),
            5 => Ok(PathwayMode::Elevator),
            6 => Ok(PathwayMode::FareGate),
            7 => Ok(PathwayMode::ExitGate),
            v => Err(format!("invalid value for pathway_mode: {}", v)),
        }
    }
}

/// Indicates in which direction the pathway can be used
#[derive(Debug, Derivative, Copy, Clone, PartialEq, Eq)]
#[derivative(Default)]
pub enum PathwayDirectionType {
    /// Unidirectional pathway, it can only be used from `from_stop_id` to `to_stop_id`.
    #[derivative(Default)]
    Unidirectional,
    /// Bidirectional pathway, it can be used in the two directions.
    Bidirectional,
}

impl TryFrom<i32> for PathwayDirectionType {
    type Error = String;
    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(PathwayDirectionType::Unidirectional),
            1 => Ok(PathwayDirectionType::Bidirectional),
            v => Err(format!("invalid value for is_bidirectional, expected 0 or 1: {}", v)),
        }
    }
}
