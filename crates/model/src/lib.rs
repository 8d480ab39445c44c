pub mod route;
pub mod route_state;
pub mod sample;
pub mod trajectory;

pub use route::{Leg, Route, Step};
pub use route_state::RouteState;
pub use sample::{DataPoint, DataPointType, Sample};
pub use trajectory::{Trajectory, TrajectoryError, TrajectoryPoint};
pub use utility::geo::Coordinate;
