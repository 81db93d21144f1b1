pub mod normalize;

// Pure computation over parsed feed tables
pub mod bulletin_service;
pub mod detail_service;
pub mod holdings_service;
