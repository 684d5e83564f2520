//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod deploy;

pub(crate) use build::BuildArgs;
pub(crate) use deploy::DeployArgs;
