use async_trait::async_trait;
use sqlx::PgPool;

use crate::account::errors::AuthError;
use crate::domain::account::models::Account;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::ports::UserStore;

pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    email: String,
    password_hash: String,
    confirmation_code: Option<String>,
    confirmed: bool,
}

impl TryFrom<AccountRow> for Account {
    type Error = AuthError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            email: EmailAddress::new(row.email)?,
            password_hash: row.password_hash,
            confirmation_code: row.confirmation_code,
            confirmed: row.confirmed,
        })
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn create(&self, account: Account) -> Result<(), AuthError> {
        sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, confirmation_code, confirmed)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .bind(account.confirmation_code.as_deref())
        .bind(account.confirmed)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    if db_err.constraint() == Some("users_pkey") {
                        return AuthError::EmailTaken(account.email.as_str().to_string());
                    }
                    if db_err.constraint() == Some("users_confirmation_code_key") {
                        // Codes are globally unique; a collision must fail
                        // loudly rather than attach the code to two accounts
                        return AuthError::StoreError(format!(
                            "confirmation code collision for {}",
                            account.email.as_str()
                        ));
                    }
                }
            }
            AuthError::StoreError(e.to_string())
        })?;

        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AuthError> {
        let row: Option<AccountRow> = sqlx::query_as(
            r#"
            SELECT email, password_hash, confirmation_code, confirmed
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::StoreError(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(r.try_into()?)),
            None => Ok(None),
        }
    }

    async fn confirm(&self, email: &str, code: &str) -> Result<Account, AuthError> {
        // Single conditional update: the row lock makes a concurrent
        // duplicate redemption observe the cleared code and match nothing
        let row: Option<AccountRow> = sqlx::query_as(
            r#"
            UPDATE users
            SET confirmed = TRUE, confirmation_code = NULL
            WHERE email = $1 AND confirmation_code = $2
            RETURNING email, password_hash, confirmation_code, confirmed
            "#,
        )
        .bind(email)
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::StoreError(e.to_string()))?;

        match row {
            Some(r) => r.try_into(),
            None => Err(AuthError::InvalidConfirmationToken),
        }
    }
}
