// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes client creation and the provider context shared by adapters.

pub mod client;

pub use client::{create_client, ProviderContext};
