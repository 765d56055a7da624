pub mod bindings;
pub mod queue;
