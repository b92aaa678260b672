pub mod component_router;
pub mod interaction_router;
