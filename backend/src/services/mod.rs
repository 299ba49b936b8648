pub mod images;
pub mod registrations;
