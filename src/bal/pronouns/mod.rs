pub mod reconciler;
pub mod role_map;
