//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod ai_interaction_repo;
pub mod course_repo;
pub mod learning_session_repo;
pub mod profile_repo;
pub mod progress_repo;
pub mod quiz_repo;
pub mod roadmap_repo;
pub mod skill_repo;
pub mod team_repo;
pub mod trend_insight_repo;

pub use ai_interaction_repo::AiInteractionRepo;
pub use course_repo::CourseRepo;
pub use learning_session_repo::LearningSessionRepo;
pub use profile_repo::ProfileRepo;
pub use progress_repo::ProgressRepo;
pub use quiz_repo::QuizRepo;
pub use roadmap_repo::RoadmapRepo;
pub use skill_repo::SkillRepo;
pub use team_repo::TeamRepo;
pub use trend_insight_repo::TrendInsightRepo;
