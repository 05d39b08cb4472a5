pub mod discovery_service;
