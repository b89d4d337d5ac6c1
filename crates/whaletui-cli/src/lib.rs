//! Library half of the whaletui binary, so commands can be tested
//! against a mock provider.

pub mod commands;
