pub mod statsfm_dao;
