// Domain layer: calculation records and the schema port they implement.

pub mod model;
pub mod ports;
