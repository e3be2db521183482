//! tmpfiles.d creation engine.
//!
//! Reads `tmpfiles.d` directive files, resolves `%` specifiers, orders the
//! directives so parents come before children, and applies the creation
//! side of each action: files, directories, symlinks, device nodes, copies,
//! removals, ownership and permissions, file attributes and ACLs.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]**: locate directive files and parse directive lines
//! - **[`specifier`]**: the `%x` substitution table
//! - **[`processing`]**: filter, order and group directives, then apply them
//! - **[`resources`]**: one apply function per action kind
//! - **[`exec`]**: the helper-program seam (`mknod`, `chattr`, `setfacl`)
//! - **[`commands`]**: phase selection and the `--create` run
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod processing;
pub mod resources;
pub mod specifier;
