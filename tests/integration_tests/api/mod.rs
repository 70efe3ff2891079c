#[path = "mod_api.rs"]
mod api_tests;
#[path = "mod_api_negative.rs"]
mod api_negative_tests;
