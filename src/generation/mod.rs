pub mod land;
