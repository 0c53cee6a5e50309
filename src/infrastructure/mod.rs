// Infrastructure layer
// Database adapters implementing the domain repository contracts

pub mod repositories;
