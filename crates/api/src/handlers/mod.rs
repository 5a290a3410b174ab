pub mod insights;
pub mod profile;
pub mod progress;
pub mod quizzes;
pub mod roadmaps;
pub mod sessions;
pub mod skills;
pub mod teams;
