pub mod health;
pub mod helpers;
pub mod links;
pub mod qr;
pub mod redirect;

pub use health::{AppStartTime, HealthService, health_routes};
pub use links::{LinkApi, api_routes};
pub use qr::{QrService, qr_routes};
pub use redirect::{RedirectService, redirect_routes};
