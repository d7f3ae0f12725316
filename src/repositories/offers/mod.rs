pub mod offer_repo;
