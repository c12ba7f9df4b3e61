// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Generic custom resource adapter: apply, read, delete, wait and render.

pub mod manifest;
pub mod options;
pub mod path;
pub mod resource;
pub mod wait;

pub use manifest::render_manifest;
pub use options::{OperationOptions, WaitCondition, WaitTimeout};
pub use resource::TypedResourceAdapter;
pub use path::JsonPath;
pub use wait::WaitPoller;
