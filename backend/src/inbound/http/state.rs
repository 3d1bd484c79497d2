//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only
//! depend on driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    Accounts, Administration, Applications, NoticeBoard, PortalSettings, ReferenceData,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn Accounts>,
    pub applications: Arc<dyn Applications>,
    pub notice_board: Arc<dyn NoticeBoard>,
    pub settings: Arc<dyn PortalSettings>,
    pub administration: Arc<dyn Administration>,
    pub reference: Arc<dyn ReferenceData>,
}
