//! 应用层 - 命令
//!
//! 问诊流水线的入口命令

mod consult_commands;

pub mod handlers;

pub use consult_commands::*;
