pub mod place;

pub use place::Category;
pub use place::Place;
