//! Integration test modules

mod config_test;
mod transform_test;
mod uploader_test;
