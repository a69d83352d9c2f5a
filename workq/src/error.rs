// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Work queue Error implementation

/// Work queue Error type
#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    InvalidArgument(&'static str),
    Unavailable(&'static str),
    Channel(&'static str),
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::InvalidArgument(description) => write!(f, "Invalid argument, {}", description),
            Error::Unavailable(description) => write!(f, "Unavailable, {}", description),
            Error::Channel(description) => write!(f, "Channel error, {}", description),
        }
    }
}
