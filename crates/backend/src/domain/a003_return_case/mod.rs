pub mod liability;
pub mod posting;
pub mod repository;
pub mod review;
pub mod service;
pub mod timeline_repository;
