// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod crawl_use_case;

pub use crawl_use_case::{BatchError, CrawlUseCase};
