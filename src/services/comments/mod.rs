pub mod comment_service;
