pub mod coordinate;
pub mod crowd;
pub mod favorite;
pub mod filter;
pub mod location;
pub mod report;
pub mod user;

pub use coordinate::Coordinate;
pub use crowd::CrowdLevel;
pub use favorite::Favorite;
pub use filter::FilterCriteria;
pub use location::{Location, LocationId, LocationSnapshot};
pub use report::{NewReport, RecentReportsQuery, Report, ReportId};
pub use user::{User, UserId};
