//! Integration tests for wfor
//!
//! These tests run real conditions against local listeners and temporary
//! directories, and drive the `wfor` binary end to end.

#![allow(deprecated)]

pub mod aggregation;
pub mod helpers;
pub mod network_conditions;
