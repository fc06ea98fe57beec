//! Service layer for the site backend.
//! - `site::repository` is the storage seam; the SeaORM adapter is the production impl.
//! - `site::service` applies the admin guard and the degrade-to-default rules.
//! - `auth` holds the shared-secret guard.

pub mod errors;
pub mod auth;
pub mod site;
#[cfg(test)]
pub mod test_support;
