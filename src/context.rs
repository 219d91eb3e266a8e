//! Entry points for tests
//!
//! [`mock`] and [`mock_at`] hand back a [`RouterMock`]: the router plus a
//! live handle to its current route. [`MockRouterBuilder`] exposes the
//! remaining settings.

use crate::location::Location;
use crate::route::{IntoRoutes, RouteDefinition};
use crate::state::{CurrentRoute, MockRouter, RouterConfig};

/// A router together with its live current route
#[derive(Debug)]
pub struct RouterMock {
    /// The router
    pub router: MockRouter,
    /// Handle updated in place on every navigation
    pub route: CurrentRoute,
}

impl RouterMock {
    fn from_router(router: MockRouter) -> Self {
        let route = router.current_handle();
        Self { router, route }
    }
}

impl Default for RouterMock {
    /// A single `/` route
    fn default() -> Self {
        Self::from_router(MockRouter::default())
    }
}

/// Build a mock router starting at the first route's path
///
/// # Example
///
/// ```
/// use router_mock::mock;
///
/// let mut mock = mock(vec!["/", "/users"]);
/// assert_eq!(mock.route.path(), "/");
///
/// mock.router.push("/users");
/// assert_eq!(mock.route.path(), "/users");
/// ```
pub fn mock(routes: impl IntoRoutes) -> RouterMock {
    MockRouterBuilder::new().routes(routes).build()
}

/// Build a mock router starting at `initial`
///
/// # Example
///
/// ```
/// use router_mock::mock_at;
///
/// let mock = mock_at("/users/:userId", "/users/4#myid?foo=1&bah=2");
/// assert_eq!(mock.route.param("userId").as_deref(), Some("4"));
/// assert_eq!(mock.route.full_path(), "/users/4#myid?foo=1&bah=2");
/// ```
pub fn mock_at(routes: impl IntoRoutes, initial: impl Into<Location>) -> RouterMock {
    MockRouterBuilder::new()
        .routes(routes)
        .initial(initial)
        .build()
}

/// Builder for a [`RouterMock`]
///
/// ```
/// use router_mock::MockRouter;
///
/// let mock = MockRouter::builder()
///     .routes(["/", "/users"])
///     .initial("/users")
///     .history_limit(10)
///     .build();
///
/// assert_eq!(mock.route.path(), "/users");
/// ```
#[derive(Debug, Default)]
pub struct MockRouterBuilder {
    routes: Vec<RouteDefinition>,
    initial: Option<Location>,
    config: RouterConfig,
}

impl MockRouterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append routes to the table
    pub fn routes(mut self, routes: impl IntoRoutes) -> Self {
        self.routes.extend(routes.into_routes());
        self
    }

    /// Start at this location instead of the first route's path
    pub fn initial(mut self, initial: impl Into<Location>) -> Self {
        self.initial = Some(initial.into());
        self
    }

    /// Cap the number of history entries (0 = unlimited)
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = limit;
        self
    }

    /// Capacity of the path match cache
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.config.cache_capacity = capacity;
        self
    }

    /// Replace all runtime settings at once
    pub fn config(mut self, config: RouterConfig) -> Self {
        self.config = config;
        self
    }

    /// Load routes from a JSON route table
    #[cfg(feature = "serde")]
    pub fn routes_json(self, json: &str) -> Result<Self, crate::error::RouteError> {
        Ok(self.routes(crate::table::routes_from_json(json)?))
    }

    pub fn build(self) -> RouterMock {
        RouterMock::from_router(MockRouter::new(self.routes, self.initial, &self.config))
    }
}

impl MockRouter {
    /// Start building a [`RouterMock`]
    pub fn builder() -> MockRouterBuilder {
        MockRouterBuilder::new()
    }
}
