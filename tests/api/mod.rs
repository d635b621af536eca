//! REST API endpoint tests

mod accounts_tests;
mod chats_tests;
mod health_tests;
