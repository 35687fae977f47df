// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Overlay rendering — draws document geometry over the page image so the
// effect of a simplification can be judged by eye.

pub mod renderer;

pub use renderer::OverlayRenderer;
