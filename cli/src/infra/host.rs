//! Host facts: implements `HostProbe` against the local filesystem and the
//! system user database.

use std::path::Path;

use anyhow::{Context, Result};
use nix::unistd::{Group, User};

use crate::application::ports::HostProbe;

/// Production `HostProbe`.
pub struct SystemHost;

impl HostProbe for SystemHost {
    fn is_readable(&self, path: &Path) -> bool {
        if path.is_dir() {
            std::fs::read_dir(path).is_ok()
        } else {
            std::fs::File::open(path).is_ok()
        }
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn user_exists(&self, name: &str) -> Result<bool> {
        let user = User::from_name(name).with_context(|| format!("looking up user {name}"))?;
        Ok(user.is_some())
    }

    fn group_exists(&self, name: &str) -> Result<bool> {
        let group = Group::from_name(name).with_context(|| format!("looking up group {name}"))?;
        Ok(group.is_some())
    }
}
