pub mod community;

pub use community::InMemoryCommunityRepository;
