/// Storage functions against SeaORM's mock connection
pub mod mock_tests;

/// CRUD and association tests against a live database
pub mod crud_tests;
