//! Application layer for Itinera.
//!
//! Use cases that coordinate the domain, the key-value repositories and the
//! travel agent: accounts and the signed-in session, trip planning, chat and
//! history.

pub mod account_usecase;
pub mod app_context;
pub mod session_context;
pub mod trip_planner_usecase;

pub use account_usecase::AccountUseCase;
pub use app_context::AppContext;
pub use session_context::SessionContext;
pub use trip_planner_usecase::{PlannedTrip, TripPlannerUseCase};
