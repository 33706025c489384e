use sqlx::Postgres;
use uuid::Uuid;

use crate::DbConn;
use crate::{
    error::{Error, Result},
    models::users::{NewUser, User},
};

const USER_COLUMNS: &str =
    "id, email, password_hash, first_name, last_name, created_at, updated_at";

/// Creates a new user in the database.
pub async fn create_user(conn: &mut DbConn, new_user: &NewUser) -> Result<User> {
    let sql = format!(
        "INSERT INTO users (email, password_hash, first_name, last_name) \
         VALUES ($1, $2, $3, $4) \
         RETURNING {USER_COLUMNS}"
    );

    let user = sqlx::query_as::<Postgres, User>(&sql)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(new_user.first_name.as_ref())
        .bind(new_user.last_name.as_ref())
        .fetch_one(conn)
        .await
        .map_err(|e| {
            // Unique violation on users.email races with the pre-insert
            // existence check; both report the same conflict.
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                Error::Conflict("User with this email already exists".to_string())
            } else {
                Error::Sqlx(e)
            }
        })?;

    Ok(user)
}

/// Gets a single user by their ID. The user may not exist.
pub async fn get_user_by_id(conn: &mut DbConn, id: Uuid) -> Result<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

    let user = sqlx::query_as::<Postgres, User>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;

    Ok(user)
}

/// Gets a single user by their email address. The user may not exist.
pub async fn get_user_by_email(conn: &mut DbConn, email: &str) -> Result<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

    let user = sqlx::query_as::<Postgres, User>(&sql)
        .bind(email)
        .fetch_optional(conn)
        .await?;

    Ok(user)
}
