pub mod auth;
pub mod classes;
pub mod grades;
pub mod landing;
pub mod messages;
pub mod subjects;
pub mod users;
