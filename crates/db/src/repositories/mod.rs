//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod alert_read_repo;
pub mod alert_repo;
pub mod assessment_repo;
pub mod compliance_repo;
pub mod dashboard_repo;
pub mod farm_repo;
pub mod preference_repo;
pub mod profile_repo;
pub mod role_repo;
pub mod session_repo;
pub mod training_module_repo;
pub mod training_progress_repo;
pub mod user_repo;

pub use alert_read_repo::AlertReadRepo;
pub use alert_repo::AlertRepo;
pub use assessment_repo::AssessmentRepo;
pub use compliance_repo::ComplianceRepo;
pub use dashboard_repo::DashboardRepo;
pub use farm_repo::FarmRepo;
pub use preference_repo::PreferenceRepo;
pub use profile_repo::ProfileRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use training_module_repo::TrainingModuleRepo;
pub use training_progress_repo::TrainingProgressRepo;
pub use user_repo::UserRepo;
