#[path = "container/prop_container.rs"]
mod container_props;
