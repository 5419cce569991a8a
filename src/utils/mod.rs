// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod net;
pub mod secret;

pub use net::{is_safe_url, read_body_limited, BodyError};
pub use secret::SecretString;
