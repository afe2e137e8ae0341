//! Planning of several routes over one graph.
//!
//! A [`RoutePlan`] is an ordered list of (from, to) pairs. Running it searches
//! the shortest path of every pair and sums the distances into a grand total.
//!
//! # Examples
//!
//! ```
//! use routegraph::{core::Distance, route::RoutePlan, Graph};
//!
//! let graph = Graph::from_triples([("A", "B", 1), ("B", "C", 1), ("A", "C", 5)]).unwrap();
//! let plan = "A:C,C:B".parse::<RoutePlan>().unwrap();
//!
//! let summary = plan.run(&graph).unwrap();
//! assert_eq!(summary.legs()[0].distance, Distance::new(2));
//! assert_eq!(summary.total(), Distance::new(3));
//! ```

use std::{fmt, str::FromStr};

use log::debug;
use serde::Deserialize;

use crate::{
    algo::{Path, ShortestPaths},
    core::{Distance, Error, VertexId},
    graph::Graph,
};

/// A pair of vertex names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct RouteSpec {
    pub from: String,
    pub to: String,
}

impl RouteSpec {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl FromStr for RouteSpec {
    type Err = Error;

    /// Parses `FROM:TO`. Names may contain spaces, but not colons.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::Config(format!("route {s:?} is not in the form FROM:TO"));

        let (from, to) = s.split_once(':').ok_or_else(invalid)?;
        let (from, to) = (from.trim(), to.trim());

        if from.is_empty() || to.is_empty() || to.contains(':') {
            return Err(invalid());
        }

        Ok(Self::new(from, to))
    }
}

impl fmt::Display for RouteSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.from, self.to)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutePlan {
    routes: Vec<RouteSpec>,
}

impl RoutePlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, route: RouteSpec) {
        self.routes.push(route);
    }

    pub fn routes(&self) -> &[RouteSpec] {
        &self.routes
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Searches every route in order.
    ///
    /// Both names of a route are resolved before its search starts, an unknown
    /// name aborts the whole plan with [`Error::NotFound`]. A route whose
    /// destination is not reachable gets infinite distance, which makes the
    /// total infinite as well.
    pub fn run(&self, graph: &Graph) -> Result<RouteSummary, Error> {
        let mut legs = Vec::with_capacity(self.routes.len());
        let mut total = Distance::ZERO;

        for route in &self.routes {
            let from = graph.find(&route.from)?;
            let to = graph.find(&route.to)?;

            let paths = ShortestPaths::on(graph).goal(to).run(from);
            let path = paths.path(to)?;
            let distance = paths.dist(to);

            debug!("route {route} has distance {distance}");

            total += distance;
            legs.push(Leg {
                from,
                to,
                path,
                distance,
            });
        }

        Ok(RouteSummary { legs, total })
    }
}

impl From<Vec<RouteSpec>> for RoutePlan {
    fn from(routes: Vec<RouteSpec>) -> Self {
        Self { routes }
    }
}

impl FromIterator<RouteSpec> for RoutePlan {
    fn from_iter<I: IntoIterator<Item = RouteSpec>>(iter: I) -> Self {
        Self {
            routes: iter.into_iter().collect(),
        }
    }
}

impl FromStr for RoutePlan {
    type Err = Error;

    /// Parses comma separated routes, e.g., `A:B,B:C`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .filter(|route| !route.trim().is_empty())
            .map(str::parse::<RouteSpec>)
            .collect()
    }
}

/// One searched route of a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leg {
    pub from: VertexId,
    pub to: VertexId,
    pub path: Path,
    /// Settled distance of the destination.
    pub distance: Distance,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSummary {
    legs: Vec<Leg>,
    total: Distance,
}

impl RouteSummary {
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Sum of the distances of all legs.
    pub fn total(&self) -> Distance {
        self.total
    }
}
