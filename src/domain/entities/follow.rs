//! Follow entity representing a single redirect through a short link.

/// A recorded visit of a short path.
///
/// `short_path` refers to a link row, but the reference is not enforced by
/// the schema. Follows are append-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Follow {
    pub short_path: String,
    /// Visit time in Unix seconds.
    pub ts: i64,
    pub ip: String,
    pub forwarded_for: String,
}

/// Input data for appending a follow row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFollow {
    pub short_path: String,
    pub ts: i64,
    pub ip: String,
    pub forwarded_for: String,
}
