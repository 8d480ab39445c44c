use serde::{Deserialize, Serialize};

/// The smallest unit of a route, usually one road segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// encoded polyline, see `utility::polyline`
    pub polyline: String,
    /// seconds
    pub duration: f64,
    /// meters
    pub distance: f64,
}

/// One origin-to-destination part of a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    pub steps: Vec<Step>,
    /// seconds
    pub duration: f64,
    /// meters
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub summary: String,
    pub legs: Vec<Leg>,
}

impl Route {
    /// Total distance in meters, as reported by the legs.
    pub fn distance(&self) -> f64 {
        self.legs.iter().map(|leg| leg.distance).sum()
    }

    /// Total duration in seconds, as the sum of all step durations.
    pub fn duration(&self) -> f64 {
        self.steps().map(|step| step.duration).sum()
    }

    /// All steps in leg-then-step order.
    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.legs.iter().flat_map(|leg| leg.steps.iter())
    }
}
