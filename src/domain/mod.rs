pub mod catalog;
pub mod media;
pub mod question;
pub mod selection;
