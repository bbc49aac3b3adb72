//! # xams
//!
//! Library behind the `xams` project-scaffolding tool. The binary is a thin
//! wrapper; everything it does is reachable from here.
//!
//! ## Quick Example
//!
//! ```
//! use xams::options::{normalize, OptionValue, RawOption, RawOptions};
//! use xams::clone::CloneRequest;
//!
//! let mut raw = RawOptions::new();
//! raw.insert("remove", RawOption::Value(OptionValue::Bool(true)));
//!
//! let options = normalize(&["checkout", "remove"], &raw);
//! let request = CloneRequest::from_options("https://example.com/tpl.git", "myapp", &options).unwrap();
//!
//! assert!(request.destination.is_absolute());
//! assert!(request.remove_metadata);
//! assert_eq!(request.checkout, None);
//! ```
//!
//! ## Core Concepts
//!
//! - **Registry (`registry`)**: static declarations of every subcommand and
//!   its options, used both to build the clap command tree and as the
//!   normalizer's allow-list.
//! - **Normalization (`options`)**: turns parser output into a clean
//!   camel-case option map.
//! - **Dispatch (`dispatch`)**: routes an invocation to a [`dispatch::Handlers`]
//!   implementation, handling unknown commands and bare invocations.
//! - **Clone workflow (`clone`, `git`, `progress`)**: fetches a template
//!   through a [`git::RemoteClone`] adapter while a [`progress::Reporter`]
//!   shows a spinner, then optionally strips `.git`.
//! - **Collaborators (`serve`, `diagnostics`)**: the dev-server launcher and
//!   the environment report.

pub mod clone;
pub mod defaults;
pub mod diagnostics;
pub mod dispatch;
pub mod error;
pub mod git;
pub mod options;
pub mod output;
pub mod progress;
pub mod registry;
pub mod serve;

#[cfg(test)]
mod options_proptest;
