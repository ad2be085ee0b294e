//! Link entity representing a short path to long URL mapping.

/// A stored short link with its creation metadata.
///
/// Links are written once by the path generator and never updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub short_path: String,
    pub long_url: String,
    /// Creation time in Unix seconds.
    pub create_ts: i64,
    pub create_ip: String,
    pub create_forwarded_for: String,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        short_path: String,
        long_url: String,
        create_ts: i64,
        create_ip: String,
        create_forwarded_for: String,
    ) -> Self {
        Self {
            short_path,
            long_url,
            create_ts,
            create_ip,
            create_forwarded_for,
        }
    }
}

/// Input data for reserving a short path.
///
/// The insert either stores the row or fails with a unique violation when the
/// short path is already taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub short_path: String,
    pub long_url: String,
    pub create_ts: i64,
    pub create_ip: String,
    pub create_forwarded_for: String,
}

impl From<NewLink> for Link {
    fn from(new_link: NewLink) -> Self {
        Link::new(
            new_link.short_path,
            new_link.long_url,
            new_link.create_ts,
            new_link.create_ip,
            new_link.create_forwarded_for,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_creation() {
        let link = Link::new(
            "AbCd-_12".to_string(),
            "https://lemurs.win".to_string(),
            1_700_000_000,
            "127.0.0.1".to_string(),
            String::new(),
        );

        assert_eq!(link.short_path, "AbCd-_12");
        assert_eq!(link.long_url, "https://lemurs.win");
        assert_eq!(link.create_ts, 1_700_000_000);
        assert!(link.create_forwarded_for.is_empty());
    }

    #[test]
    fn test_new_link_into_link() {
        let new_link = NewLink {
            short_path: "xyz78901".to_string(),
            long_url: "https://rust-lang.org".to_string(),
            create_ts: 42,
            create_ip: "10.0.0.1".to_string(),
            create_forwarded_for: "203.0.113.7".to_string(),
        };

        let link: Link = new_link.clone().into();
        assert_eq!(link.short_path, new_link.short_path);
        assert_eq!(link.create_forwarded_for, "203.0.113.7");
    }
}
