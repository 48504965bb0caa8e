//! Monitored targets, fixed at startup.

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

/// Primary targets also expose DRPC inventory; secondaries never do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Primary,
    Secondary,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Primary => f.write_str("primary"),
            Role::Secondary => f.write_str("secondary"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub role: Role,
    /// Path to the kubeconfig used to reach this cluster.
    pub descriptor: String,
}

impl Target {
    pub fn new(name: impl Into<String>, role: Role, descriptor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role,
            descriptor: descriptor.into(),
        }
    }

    pub fn is_primary(&self) -> bool {
        self.role == Role::Primary
    }
}

/// Position of a target in its registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub usize);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("no targets configured")]
    Empty,
    #[error("duplicate target name {0:?}")]
    DuplicateName(String),
    #[error("exactly one primary target is required, found {0}")]
    PrimaryCount(usize),
}

#[derive(Debug)]
pub struct TargetRegistry {
    targets: Vec<Target>,
    primary: TargetId,
}

impl TargetRegistry {
    pub fn new(targets: Vec<Target>) -> Result<Self, RegistryError> {
        if targets.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = HashSet::new();
        for target in &targets {
            if !seen.insert(target.name.as_str()) {
                return Err(RegistryError::DuplicateName(target.name.clone()));
            }
        }

        let primaries: Vec<usize> = targets
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_primary())
            .map(|(i, _)| i)
            .collect();
        let &[primary] = primaries.as_slice() else {
            return Err(RegistryError::PrimaryCount(primaries.len()));
        };

        Ok(Self {
            targets,
            primary: TargetId(primary),
        })
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn get(&self, id: TargetId) -> Option<&Target> {
        self.targets.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TargetId, &Target)> {
        self.targets
            .iter()
            .enumerate()
            .map(|(i, t)| (TargetId(i), t))
    }

    pub fn primary(&self) -> (TargetId, &Target) {
        (self.primary, &self.targets[self.primary.0])
    }

    pub fn secondaries(&self) -> impl Iterator<Item = (TargetId, &Target)> {
        self.iter().filter(|(_, t)| !t.is_primary())
    }
}
