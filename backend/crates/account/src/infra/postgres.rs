//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::AccountId;
use platform::password::HashedPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::account::{Account, AccountPatch};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    account_state::AccountState,
    email::Email,
    login::Login,
    profile::{Age, PersonName},
    role::Role,
};
use crate::error::{AccountError, AccountResult};

/// SQLSTATE `unique_violation`
const PG_UNIQUE_VIOLATION: &str = "23505";

/// Columns of [`AccountRow`], with the role resolved through `roles`
const SELECT_ACCOUNT: &str = r#"
    SELECT
        u.id,
        u.login,
        u.email,
        u.name,
        u.age,
        u.password_hash,
        u.refresh_token,
        r.name AS role,
        u.deleted,
        u.created_at,
        u.updated_at
    FROM users u
    JOIN roles r ON r.id = u.role_id
"#;

/// PostgreSQL-backed account repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Zero affected rows means the account is absent or deleted
fn expect_one_row(rows_affected: u64) -> AccountResult<()> {
    if rows_affected == 0 {
        Err(AccountError::NotFound)
    } else {
        Ok(())
    }
}

fn map_insert_error(err: sqlx::Error) -> AccountError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(PG_UNIQUE_VIOLATION) => {
            AccountError::DuplicateLogin
        }
        _ => AccountError::Persistence(err),
    }
}

impl AccountRepository for PgAccountRepository {
    async fn create(&self, account: &Account) -> AccountResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id,
                login,
                email,
                name,
                age,
                password_hash,
                refresh_token,
                role_id,
                deleted,
                created_at,
                updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7,
                (SELECT id FROM roles WHERE name = $8),
                $9, $10, $11
            )
            "#,
        )
        .bind(account.id.as_uuid())
        .bind(account.login.as_str())
        .bind(account.email.as_str())
        .bind(account.name.as_str())
        .bind(account.age.value())
        .bind(account.password_hash.as_phc_string())
        .bind(account.refresh_token.as_deref())
        .bind(account.role.code())
        .bind(account.is_deleted())
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(())
    }

    async fn get_by_login(&self, login: &Login) -> AccountResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "{SELECT_ACCOUNT} WHERE u.login = $1 AND u.deleted = false"
        ))
        .bind(login.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn get_by_id(&self, id: &AccountId) -> AccountResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "{SELECT_ACCOUNT} WHERE u.id = $1 AND u.deleted = false"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn update(&self, id: &AccountId, patch: &AccountPatch) -> AccountResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                email = COALESCE($2, email),
                name = COALESCE($3, name),
                age = COALESCE($4, age),
                updated_at = now()
            WHERE id = $1 AND deleted = false
            "#,
        )
        .bind(id.as_uuid())
        .bind(patch.email.as_ref().map(Email::as_str))
        .bind(patch.name.as_ref().map(PersonName::as_str))
        .bind(patch.age.map(|a| a.value()))
        .execute(&self.pool)
        .await?;

        expect_one_row(result.rows_affected())
    }

    async fn refresh_token(&self, id: &AccountId, token: &str) -> AccountResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                refresh_token = $2,
                updated_at = now()
            WHERE id = $1 AND deleted = false
            "#,
        )
        .bind(id.as_uuid())
        .bind(token)
        .execute(&self.pool)
        .await?;

        expect_one_row(result.rows_affected())
    }

    async fn delete(&self, id: &AccountId) -> AccountResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                deleted = true,
                refresh_token = NULL,
                updated_at = now()
            WHERE id = $1 AND deleted = false
            "#,
        )
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await?;

        expect_one_row(result.rows_affected())
    }

    async fn ping(&self) -> AccountResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    login: String,
    email: String,
    name: String,
    age: i32,
    password_hash: String,
    refresh_token: Option<String>,
    role: String,
    deleted: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> AccountResult<Account> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash).map_err(|e| {
            AccountError::Internal(format!("Invalid password hash for {}: {}", self.id, e))
        })?;

        let role = Role::from_code(&self.role)
            .ok_or_else(|| AccountError::Internal(format!("Unknown role: {}", self.role)))?;

        Ok(Account {
            id: AccountId::from_uuid(self.id),
            login: Login::from_db(self.login),
            email: Email::from_db(self.email),
            name: PersonName::from_db(self.name),
            age: Age::from_db(self.age),
            password_hash,
            refresh_token: self.refresh_token,
            role,
            state: AccountState::from_deleted_flag(self.deleted),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expect_one_row() {
        assert!(expect_one_row(1).is_ok());
        assert!(matches!(expect_one_row(0), Err(AccountError::NotFound)));
    }

    #[test]
    fn test_non_unique_errors_stay_persistence() {
        let err = map_insert_error(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, AccountError::Persistence(_)));
    }
}
