/// Primary keys are PostgreSQL `INTEGER GENERATED ALWAYS AS IDENTITY`.
pub type DbId = i32;

/// All timestamps are stored as `timestamptz` and read back in UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
