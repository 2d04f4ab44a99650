pub mod rating_repo;

pub use rating_repo::RatingRepository;
