// tile arena the agent moves through
pub mod arena;

// footprint box and wall-contact flags
pub mod collision;
