//! Integration Tests
//!
//! End-to-end tests for the conversation engine using a scripted LLM
//! backend and in-memory data/object stores. No network calls are made.


mod engine_test;
