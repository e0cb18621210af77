//! LaunchId - 1 回の起動を識別する ULID
//!
//! ログ行とワーカースレッド名に使う。

use std::fmt;

use ulid::Ulid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LaunchId(Ulid);

impl LaunchId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    pub fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl Default for LaunchId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Ulid> for LaunchId {
    fn from(ulid: Ulid) -> Self {
        Self(ulid)
    }
}

impl fmt::Display for LaunchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "launch-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_ids_are_unique_and_prefixed() {
        let a = LaunchId::new();
        let b = LaunchId::new();
        assert_ne!(a, b);
        assert!(a.to_string().starts_with("launch-"));
    }

    #[test]
    fn display_wraps_ulid() {
        let ulid = Ulid::from_parts(0, 1);
        assert_eq!(LaunchId::from(ulid).to_string(), format!("launch-{ulid}"));
    }
}
