//! Build driver for sitekit
//!
//! A build is a fixed sequence of phases run one after another:
//! - **Clean**: remove the output directory (and any extra disposable directories)
//! - **Install**: fetch external dependencies (`npm install`)
//! - **Styles**: generate the output stylesheet
//! - **Generate**: run the primary program (the built-in site generator or an
//!   external command)
//!
//! # Example
//!
//! ```ignore
//! use sitekit::build::{BuildContext, BuildPipeline};
//! use sitekit::config::load_config;
//! use sitekit::exec::ProcessRunner;
//!
//! let config = load_config(None)?;
//! let pipeline = BuildPipeline::new(BuildContext::new(config, project_root));
//! let result = pipeline.run(&mut ProcessRunner)?;
//! println!("{}", result.summary());
//! ```

pub mod context;
pub mod phase;
pub mod pipeline;
pub mod result;

pub use context::*;
pub use phase::*;
pub use pipeline::*;
pub use result::*;
