// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(feature = "tracing")]
macro_rules! twarn {
    ($($tt:tt)*) => {
        tracing::warn!(target: "trellis_reuse", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! twarn {
    ($($tt:tt)*) => {};
}
