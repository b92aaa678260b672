pub mod role_manager;
