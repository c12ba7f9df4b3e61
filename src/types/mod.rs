// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Descriptors, documents and identities shared by every kind.

pub mod descriptor;
pub mod document;
pub mod identity;

pub use descriptor::ResourceDescriptor;
pub use document::{DocumentMetadata, ResourceDocument};
pub use identity::ResourceIdentity;
