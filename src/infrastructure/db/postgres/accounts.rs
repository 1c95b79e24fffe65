use async_trait::async_trait;
use chrono::Utc;

use crate::{
    entities::{
        session::Session,
        user::{AdminUser, AdminUserUpsert, Customer, CustomerInsert, CustomerUpdate},
    },
    errors::AppError,
    repositories::{
        session::SessionRepository,
        user::{AdminUserRepository, CustomerRepository},
    },
};

use super::PgStore;

#[async_trait]
impl CustomerRepository for PgStore {
    async fn create_customer(&self, customer: &CustomerInsert) -> Result<Customer, AppError> {
        sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO users (
                username, email, password, first_name, last_name,
                phone, is_active, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&customer.username)
        .bind(&customer.email)
        .bind(&customer.password)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.phone)
        .bind(customer.is_active)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => AppError::Conflict("Username or email already in use".into()),
            other => other,
        })
    }

    async fn get_customer_by_id(&self, id: i64) -> Result<Option<Customer>, AppError> {
        sqlx::query_as::<_, Customer>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn get_customer_by_username(&self, username: &str) -> Result<Option<Customer>, AppError> {
        sqlx::query_as::<_, Customer>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, AppError> {
        sqlx::query_as::<_, Customer>("SELECT * FROM users ORDER BY created_at DESC, id DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn update_customer(&self, id: i64, update: &CustomerUpdate) -> Result<Customer, AppError> {
        sqlx::query_as::<_, Customer>(
            r#"
            UPDATE users
            SET
                email = COALESCE($2, email),
                first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                phone = COALESCE($5, phone),
                is_active = COALESCE($6, is_active),
                updated_at = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&update.email)
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.phone)
        .bind(update.is_active)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Customer not found".into()))
    }
}

#[async_trait]
impl AdminUserRepository for PgStore {
    async fn get_admin_user_by_id(&self, id: &str) -> Result<Option<AdminUser>, AppError> {
        sqlx::query_as::<_, AdminUser>("SELECT * FROM admin_users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn upsert_admin_user(&self, admin: &AdminUserUpsert) -> Result<AdminUser, AppError> {
        sqlx::query_as::<_, AdminUser>(
            r#"
            INSERT INTO admin_users (
                id, email, first_name, last_name, profile_image_url,
                role, is_active, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET
                email = COALESCE(EXCLUDED.email, admin_users.email),
                first_name = COALESCE(EXCLUDED.first_name, admin_users.first_name),
                last_name = COALESCE(EXCLUDED.last_name, admin_users.last_name),
                profile_image_url = COALESCE(EXCLUDED.profile_image_url, admin_users.profile_image_url),
                role = EXCLUDED.role,
                is_active = EXCLUDED.is_active,
                updated_at = EXCLUDED.updated_at
            RETURNING *
            "#,
        )
        .bind(&admin.id)
        .bind(&admin.email)
        .bind(&admin.first_name)
        .bind(&admin.last_name)
        .bind(&admin.profile_image_url)
        .bind(&admin.role)
        .bind(admin.is_active)
        .bind(admin.created_at)
        .bind(admin.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)
    }
}

#[async_trait]
impl SessionRepository for PgStore {
    async fn create_session(&self, session: &Session) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (sid, sess, expire)
            VALUES ($1, $2, $3)
            ON CONFLICT (sid) DO UPDATE SET sess = EXCLUDED.sess, expire = EXCLUDED.expire
            "#,
        )
        .bind(&session.sid)
        .bind(&session.sess)
        .bind(session.expire)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_session(&self, sid: &str) -> Result<Option<Session>, AppError> {
        sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE sid = $1 AND expire > $2")
            .bind(sid)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn destroy_session(&self, sid: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM sessions WHERE sid = $1")
            .bind(sid)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn purge_expired_sessions(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expire <= $1")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
