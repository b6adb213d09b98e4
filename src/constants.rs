// ABOUTME: Application constants re-exported from workout-core
// ABOUTME: Token scopes, validation limits, configuration defaults, and error messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use workout_core::constants::*;
