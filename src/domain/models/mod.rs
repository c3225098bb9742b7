// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod crawl_outcome;
pub mod crawl_target;

pub use crawl_outcome::{BatchOutcome, CrawlOutcome};
pub use crawl_target::{CrawlTarget, ExtractMode};
