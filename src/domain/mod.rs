// Domain layer: the participant/assignment model and the ports the drawing talks through.

pub mod model;
pub mod ports;
