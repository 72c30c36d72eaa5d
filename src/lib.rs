// File: lib.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

#![allow(clippy::uninlined_format_args)]
#![allow(clippy::bool_assert_comparison)]
#![allow(clippy::new_without_default)]

pub mod baseline;
pub mod cli;
pub mod comparator;
pub mod config;
pub mod getstate;
pub mod http;
pub mod probe;
pub mod report;
pub mod scanner;
pub mod similarity;
