pub mod matchups;
pub mod recommender;
pub mod scoring;
