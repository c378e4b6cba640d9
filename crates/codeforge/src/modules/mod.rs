// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Prompting modules built on top of [`Predict`](crate::predict::Predict).

pub mod chain_of_thought;
pub mod react;

pub use chain_of_thought::ChainOfThought;
pub use react::{ParsedStep, ReAct, TrajectoryStep};
