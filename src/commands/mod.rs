mod link;

pub use link::link;
