//! Application state shared by every handler.

use std::sync::Arc;

use robomart_workflow::ports::{OrderLedger, OrderStore, ProductCatalog, UserDirectory};
use robomart_workflow::workflows::delivery::PlanPolicy;

use crate::session::SessionStore;

// =============================================================================
// AppState
// =============================================================================

/// Dependency container handed to the router.
///
/// Generic over the port implementations so the same handlers serve the
/// MySQL adapters in production and the in-memory adapters in tests.
pub struct AppState<Store, Catalog, Users>
where
    Store: OrderStore + OrderLedger,
    Catalog: ProductCatalog,
    Users: UserDirectory,
{
    pub store: Arc<Store>,
    pub catalog: Arc<Catalog>,
    pub users: Arc<Users>,
    pub sessions: Arc<SessionStore>,
    pub robot_api_key: Arc<str>,
    pub plan_policy: PlanPolicy,
}

impl<Store, Catalog, Users> AppState<Store, Catalog, Users>
where
    Store: OrderStore + OrderLedger,
    Catalog: ProductCatalog,
    Users: UserDirectory,
{
    #[must_use]
    pub fn new(
        store: Store,
        catalog: Catalog,
        users: Users,
        sessions: Arc<SessionStore>,
        robot_api_key: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            store: Arc::new(store),
            catalog: Arc::new(catalog),
            users: Arc::new(users),
            sessions,
            robot_api_key: robot_api_key.into(),
            plan_policy: PlanPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_plan_policy(mut self, plan_policy: PlanPolicy) -> Self {
        self.plan_policy = plan_policy;
        self
    }
}

// Arc fields clone cheaply regardless of the port types, so Clone is
// implemented manually instead of derived with spurious bounds.
impl<Store, Catalog, Users> Clone for AppState<Store, Catalog, Users>
where
    Store: OrderStore + OrderLedger,
    Catalog: ProductCatalog,
    Users: UserDirectory,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            catalog: Arc::clone(&self.catalog),
            users: Arc::clone(&self.users),
            sessions: Arc::clone(&self.sessions),
            robot_api_key: Arc::clone(&self.robot_api_key),
            plan_policy: self.plan_policy,
        }
    }
}
