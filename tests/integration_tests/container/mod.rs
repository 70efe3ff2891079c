#[path = "mod_embed_extract.rs"]
mod embed_extract_tests;
#[path = "mod_consumer_view.rs"]
mod consumer_view_tests;
