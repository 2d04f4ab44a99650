pub mod user_profile_repo;

pub use user_profile_repo::UserProfileRepository;
