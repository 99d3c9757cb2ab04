// Domain layer: mapping records, run reports and the ports the editor is generic over.

pub mod model;
pub mod ports;
