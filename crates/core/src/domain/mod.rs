pub mod feedback;
pub mod item;
pub mod outfit;
pub mod preferences;
pub mod season;
pub mod tags;
pub mod weather;
