use crate::application::repos::RepoError;

/// Translate driver errors into the repository taxonomy. Postgres does not
/// expose structured causes for most of these, so the mapping keys off the
/// message text.
pub fn map_sqlx_error(err: sqlx::Error) -> RepoError {
    match err {
        sqlx::Error::RowNotFound => RepoError::NotFound,
        sqlx::Error::Database(db) => {
            let message = db.message().to_string();
            if message.contains("duplicate key") {
                RepoError::Duplicate {
                    constraint: db.constraint().unwrap_or("unknown").to_string(),
                }
            } else if message.contains("violates foreign key constraint")
                || message.contains("invalid input syntax")
            {
                RepoError::InvalidInput { message }
            } else if message.contains("canceling statement due to user request") {
                RepoError::Timeout
            } else if message.contains("violates") {
                RepoError::Integrity { message }
            } else {
                RepoError::Persistence(message)
            }
        }
        other => RepoError::from_persistence(other),
    }
}
