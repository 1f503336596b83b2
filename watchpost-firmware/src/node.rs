//! Node configuration compiled in from `node.toml`
//!
//! `build.rs` validates the file and emits `NODE_CONFIG`; an invalid
//! file fails the build, so there is no runtime fallback.

use watchpost_core::config::{
    ClimateConfig, DisplayConfig, MotionConfig, NodeConfig, PinConfig, RangingConfig, TaskPlan,
};

include!(concat!(env!("OUT_DIR"), "/node_config.rs"));
