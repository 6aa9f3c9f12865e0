pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, LoginResult};
pub use auth_service_impl::SeaOrmAuthService;

pub mod reference_service;
pub mod reference_service_impl;
pub use reference_service::{ReferenceError, ReferenceService};
pub use reference_service_impl::SeaOrmReferenceService;

pub mod report_service;
pub mod report_service_impl;
pub use report_service::{ReportError, ReportService};
pub use report_service_impl::SeaOrmReportService;
