//! Descriptor system tests
