pub mod interaction_request;
pub mod interaction_response;
pub mod statsfm;
