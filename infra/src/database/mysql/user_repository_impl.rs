//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use se_core::domain::entities::user::{User, UserRole};
use se_core::errors::DomainError;
use se_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Database(format!("Failed to get id: {e}")))?;

        let role_str: String = row
            .try_get("role")
            .map_err(|e| DomainError::Database(format!("Failed to get role: {e}")))?;
        let role = UserRole::parse(&role_str)
            .ok_or_else(|| DomainError::Database(format!("Unknown role: {role_str}")))?;

        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::Database(format!("Invalid UUID: {e}")))?,
            name: row
                .try_get("name")
                .map_err(|e| DomainError::Database(format!("Failed to get name: {e}")))?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::Database(format!("Failed to get email: {e}")))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| DomainError::Database(format!("Failed to get password_hash: {e}")))?,
            role,
            avatar: row
                .try_get("avatar")
                .map_err(|e| DomainError::Database(format!("Failed to get avatar: {e}")))?,
            phone: row
                .try_get("phone")
                .map_err(|e| DomainError::Database(format!("Failed to get phone: {e}")))?,
            bio: row
                .try_get("bio")
                .map_err(|e| DomainError::Database(format!("Failed to get bio: {e}")))?,
            is_verified: row
                .try_get("is_verified")
                .map_err(|e| DomainError::Database(format!("Failed to get is_verified: {e}")))?,
            otp: row
                .try_get("otp")
                .map_err(|e| DomainError::Database(format!("Failed to get otp: {e}")))?,
            otp_expires_at: row
                .try_get::<Option<DateTime<Utc>>, _>("otp_expires_at")
                .map_err(|e| DomainError::Database(format!("Failed to get otp_expires_at: {e}")))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Database(format!("Failed to get created_at: {e}")))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Database(format!("Failed to get updated_at: {e}")))?,
        })
    }
}

const USER_COLUMNS: &str = r#"id, name, email, password_hash, role, avatar, phone, bio,
       is_verified, otp, otp_expires_at, created_at, updated_at"#;

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ? LIMIT 1"
        );

        let result = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database query failed: {e}")))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ? LIMIT 1");

        let result = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database query failed: {e}")))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (id, name, email, password_hash, role, avatar, phone, bio,
                               is_verified, otp, otp_expires_at, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(&user.avatar)
            .bind(&user.phone)
            .bind(&user.bio)
            .bind(user.is_verified)
            .bind(&user.otp)
            .bind(user.otp_expires_at)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Failed to create user: {e}")))?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users
            SET name = ?, email = ?, password_hash = ?, role = ?, avatar = ?, phone = ?,
                bio = ?, is_verified = ?, otp = ?, otp_expires_at = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(&user.avatar)
            .bind(&user.phone)
            .bind(&user.bio)
            .bind(user.is_verified)
            .bind(&user.otp)
            .bind(user.otp_expires_at)
            .bind(user.updated_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Failed to update user: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("User"));
        }

        Ok(user)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("SELECT 1 FROM users WHERE email = ? LIMIT 1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("Database query failed: {e}")))?;

        Ok(result.is_some())
    }
}
