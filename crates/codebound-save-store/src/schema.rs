//! Save store database schema.

/// SQL to create the saves table.
pub const CREATE_SAVES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS saves (
    save_id    UUID PRIMARY KEY,
    user_id    VARCHAR(255) NOT NULL,
    save_name  VARCHAR(255) NOT NULL,
    save_date  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    payload    JSONB NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_saves_user_id
    ON saves (user_id, save_date DESC);
";
