// Panel API endpoint modules
//
// Typed facades over `PanelClient`, one file per resource group. These
// are pure request builders: no caching, no retries, no business rules.
// Quota and permission enforcement lives in the backend; errors come
// back through the gateway's envelope handling.

pub mod accounts;
pub mod auth;
pub mod dashboard;
pub mod databases;
pub mod domains;
pub mod packages;
pub mod queue;
pub mod system;
pub mod users;
