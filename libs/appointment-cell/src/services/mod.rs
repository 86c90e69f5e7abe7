pub mod booking;
pub mod dashboard;
pub mod flow;
pub mod store;
pub mod submission;

pub use booking::BookingService;
pub use dashboard::DashboardService;
pub use flow::BookingFlow;
pub use store::BookingFlowStore;
pub use submission::{BookingSubmitter, SimulatedSubmitter};
