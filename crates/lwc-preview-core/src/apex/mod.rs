//! Apex method invocation through the org's Aura action endpoint.

mod invoker;
mod middleware;

pub use invoker::{ApexInvoker, APEX_EXECUTE_PATH, APEX_PAGE_URI};
pub use middleware::{apex_proxy_middleware, ApexProxy, APEX_EXECUTE_ROUTE};
