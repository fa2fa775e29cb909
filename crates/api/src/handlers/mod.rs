pub mod campaigns;
pub mod fallback;
pub mod feeds;
pub mod info;
pub mod planets;
pub mod reference;
pub mod statistics;
pub mod war;
