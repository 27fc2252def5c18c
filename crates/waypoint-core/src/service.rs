//! Map-service collaborator traits.
//!
//! The application never geocodes, routes or fetches imagery itself. It
//! issues requests through these traits and receives the results as events.
//! Each frontend supplies implementations: a platform map SDK in production,
//! seeded in-memory services in simulation.
//!
//! The async methods return `Send` futures so the runtime can poll several
//! lookups concurrently from a single task.

use std::future::Future;

use crate::{Coordinate, ImageryScene, LookupError, Place, Region, Route, TransportType};

/// Free-text place search scoped to a region.
pub trait PlaceSearch: Send + Sync + 'static {
    /// Find places matching `query` near `region`.
    ///
    /// An empty list is a successful answer, not an error.
    fn search(
        &self,
        query: &str,
        region: Region,
    ) -> impl Future<Output = Result<Vec<Place>, LookupError>> + Send;
}

/// Directions between a coordinate and a place.
pub trait DirectionsService: Send + Sync + 'static {
    /// Compute candidate routes, best-ranked first.
    fn routes(
        &self,
        from: Coordinate,
        to: &Place,
        transport: TransportType,
    ) -> impl Future<Output = Result<Vec<Route>, LookupError>> + Send;
}

/// Street-level preview imagery.
pub trait PreviewImagery: Send + Sync + 'static {
    /// Fetch a preview scene for `place`. `None` when no imagery exists.
    fn scene(
        &self,
        place: &Place,
    ) -> impl Future<Output = Result<Option<ImageryScene>, LookupError>> + Send;
}

/// Hand a place off to an external navigation application.
pub trait ExternalNavigation: Send + Sync + 'static {
    /// Open `place` externally. Fire-and-forget: no result is observed.
    fn open(&self, place: &Place);
}
